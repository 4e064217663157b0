//! Structured search filters and their query-string encoding.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FilterError {
	#[error("unknown search filter field `{0}`")]
	UnknownField(String),
	#[error("unknown search filter relation `{0}`")]
	UnknownRelation(String),
}

/// The indexed field a filter applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchField {
	Type,
	UserCount,
}

impl SearchField {
	pub fn key(self) -> &'static str {
		match self {
			Self::Type => "type",
			Self::UserCount => "user_count",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Type => "Instance type",
			Self::UserCount => "User count",
		}
	}
}

impl FromStr for SearchField {
	type Err = FilterError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"type" => Ok(Self::Type),
			"user_count" => Ok(Self::UserCount),
			other => Err(FilterError::UnknownField(other.to_string())),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
	Eq,
	Gt,
	Gte,
	Lt,
	Lte,
}

impl Relation {
	pub fn key(self) -> &'static str {
		match self {
			Self::Eq => "eq",
			Self::Gt => "gt",
			Self::Gte => "gte",
			Self::Lt => "lt",
			Self::Lte => "lte",
		}
	}

	pub fn symbol(self) -> &'static str {
		match self {
			Self::Eq => "=",
			Self::Gt => ">",
			Self::Gte => ">=",
			Self::Lt => "<",
			Self::Lte => "<=",
		}
	}
}

impl FromStr for Relation {
	type Err = FilterError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"eq" => Ok(Self::Eq),
			"gt" => Ok(Self::Gt),
			"gte" => Ok(Self::Gte),
			"lt" => Ok(Self::Lt),
			"lte" => Ok(Self::Lte),
			other => Err(FilterError::UnknownRelation(other.to_string())),
		}
	}
}

/// Identity of a filter. Equal filters share an id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FilterId(String);

impl fmt::Display for FilterId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchFilter {
	pub field: SearchField,
	pub relation: Relation,
	pub value: String,
	/// What the filter tag shows, e.g. `Instance type = mastodon`.
	pub display_value: String,
}

impl SearchFilter {
	pub fn new(field: SearchField, relation: Relation, value: impl Into<String>) -> Self {
		let value = value.into();
		let display_value = format!("{} {} {}", field.label(), relation.symbol(), value);
		Self {
			field,
			relation,
			value,
			display_value,
		}
	}

	/// Builds a filter from raw keys, e.g. ones read back from a URL.
	pub fn parse(field: &str, relation: &str, value: &str) -> Result<Self, FilterError> {
		Ok(Self::new(field.parse()?, relation.parse()?, value))
	}

	pub fn id(&self) -> FilterId {
		FilterId(self.query_fragment())
	}

	/// `field_relation`, e.g. `type_eq`.
	pub fn query_key(&self) -> String {
		format!("{}_{}", self.field.key(), self.relation.key())
	}

	/// `field_relation=value`, e.g. `type_eq=mastodon`.
	pub fn query_fragment(&self) -> String {
		format!("{}={}", self.query_key(), self.value)
	}
}

/// `&`-joined query fragments of all filters.
pub fn encode_filters(filters: &[SearchFilter]) -> String {
	filters
		.iter()
		.map(SearchFilter::query_fragment)
		.collect::<Vec<_>>()
		.join("&")
}

/// The filters currently applied to a search. They are ANDed by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectedFilters {
	filters: Vec<SearchFilter>,
}

impl From<Vec<SearchFilter>> for SelectedFilters {
	fn from(filters: Vec<SearchFilter>) -> Self {
		let mut selected = Self::default();
		for filter in filters {
			selected.select(filter);
		}
		selected
	}
}

impl SelectedFilters {
	/// Adds a filter unless an equal one is already selected. Returns whether anything changed.
	pub fn select(&mut self, filter: SearchFilter) -> bool {
		if self.filters.contains(&filter) {
			return false;
		}
		self.filters.push(filter);
		true
	}

	pub fn deselect(&mut self, id: &FilterId) -> bool {
		let before = self.filters.len();
		self.filters.retain(|f| &f.id() != id);
		self.filters.len() != before
	}

	pub fn has_field(&self, field: SearchField) -> bool {
		self.filters.iter().any(|f| f.field == field)
	}

	pub fn as_slice(&self) -> &[SearchFilter] {
		&self.filters
	}

	pub fn to_vec(&self) -> Vec<SearchFilter> {
		self.filters.clone()
	}

	pub fn clear(&mut self) {
		self.filters.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn mastodon() -> SearchFilter {
		SearchFilter::new(SearchField::Type, Relation::Eq, "mastodon")
	}

	#[test]
	fn encodes_field_relation_value() {
		assert_eq!(mastodon().query_key(), "type_eq");
		assert_eq!(mastodon().query_fragment(), "type_eq=mastodon");
		let big = SearchFilter::new(SearchField::UserCount, Relation::Gte, "1000");
		assert_eq!(encode_filters(&[mastodon(), big]), "type_eq=mastodon&user_count_gte=1000");
		assert_eq!(encode_filters(&[]), "");
	}

	#[test]
	fn display_value_uses_translations() {
		assert_eq!(mastodon().display_value, "Instance type = mastodon");
		let small = SearchFilter::new(SearchField::UserCount, Relation::Lt, "10");
		assert_eq!(small.display_value, "User count < 10");
	}

	#[test]
	fn unknown_keys_are_rejected() {
		assert_eq!(
			SearchFilter::parse("color", "eq", "red"),
			Err(FilterError::UnknownField("color".into()))
		);
		assert_eq!(
			SearchFilter::parse("type", "like", "m%"),
			Err(FilterError::UnknownRelation("like".into()))
		);
		assert_eq!(SearchFilter::parse("type", "eq", "mastodon"), Ok(mastodon()));
	}

	#[test]
	fn selecting_the_same_filter_twice_keeps_one() {
		let mut selected = SelectedFilters::default();
		assert!(selected.select(mastodon()));
		assert!(!selected.select(mastodon()));
		assert_eq!(selected.as_slice(), &[mastodon()]);
	}

	#[test]
	fn deselect_matches_by_id_only() {
		let mut selected = SelectedFilters::default();
		selected.select(mastodon());
		selected.select(SearchFilter::new(SearchField::UserCount, Relation::Gt, "5"));

		let mut lookalike = mastodon();
		lookalike.value = "pleroma".into();
		assert!(!selected.deselect(&lookalike.id()));
		assert!(selected.deselect(&mastodon().id()));
		assert_eq!(selected.as_slice().len(), 1);
		assert!(!selected.has_field(SearchField::Type));
		assert!(selected.has_field(SearchField::UserCount));
	}

	#[test]
	fn restores_from_a_stored_list_without_duplicates() {
		let big = SearchFilter::new(SearchField::UserCount, Relation::Gt, "5");
		let selected = SelectedFilters::from(vec![mastodon(), big.clone(), mastodon()]);
		assert_eq!(selected.as_slice(), &[mastodon(), big]);
		assert_eq!(SelectedFilters::from(Vec::new()), SelectedFilters::default());
	}
}
