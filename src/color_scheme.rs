//! Mapping node data fields to colors.

use std::collections::BTreeMap;

use crate::api::{GraphNodeData, InstanceType};
use crate::components::force_graph::scale::{bucket_index, get_buckets};
use crate::config::{QUALITATIVE_COLOR_SCHEME, QUANTITATIVE_COLOR_SCHEME};

#[derive(Clone, Debug, PartialEq)]
pub enum ColorScheme {
	/// One palette color per listed value, by index.
	Qualitative {
		name: &'static str,
		data_key: &'static str,
		values: Vec<&'static str>,
	},
	/// Buckets over the field's `[min, max]` range, one palette color each.
	Quantitative {
		name: &'static str,
		data_key: &'static str,
		exponential: bool,
	},
}

/// One row of the graph key.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyEntry {
	pub color: &'static str,
	pub label: String,
}

impl ColorScheme {
	pub fn name(&self) -> &'static str {
		match self {
			Self::Qualitative { name, .. } | Self::Quantitative { name, .. } => *name,
		}
	}

	pub fn data_key(&self) -> &'static str {
		match self {
			Self::Qualitative { data_key, .. } | Self::Quantitative { data_key, .. } => *data_key,
		}
	}

	/// Bucket boundaries for a quantitative scheme, given the graph's field ranges.
	pub fn buckets(&self, ranges: &BTreeMap<String, [f64; 2]>) -> Option<(Vec<f64>, f64)> {
		let Self::Quantitative {
			data_key,
			exponential,
			..
		} = self
		else {
			return None;
		};
		let [min, max] = *ranges.get(*data_key)?;
		Some((
			get_buckets(min, max, QUANTITATIVE_COLOR_SCHEME.len(), *exponential),
			max,
		))
	}

	/// The palette color for a node, or `None` when the node has no value in range.
	pub fn color_for(
		&self,
		node: &GraphNodeData,
		buckets: Option<&(Vec<f64>, f64)>,
	) -> Option<&'static str> {
		match self {
			Self::Qualitative {
				data_key, values, ..
			} => {
				let value = node.qualitative_value(data_key)?;
				let idx = values.iter().position(|v| *v == value)?;
				QUALITATIVE_COLOR_SCHEME.get(idx).copied()
			}
			Self::Quantitative { data_key, .. } => {
				let value = node.quantitative_value(data_key)?;
				let (boundaries, max) = buckets?;
				let idx = bucket_index(value, boundaries, *max)?;
				QUANTITATIVE_COLOR_SCHEME.get(idx).copied()
			}
		}
	}

	pub fn key(&self, ranges: &BTreeMap<String, [f64; 2]>) -> Vec<KeyEntry> {
		match self {
			Self::Qualitative { values, .. } => values
				.iter()
				.zip(QUALITATIVE_COLOR_SCHEME.iter().copied())
				.map(|(value, color)| KeyEntry {
					color,
					label: crate::util::capitalize(value),
				})
				.collect(),
			Self::Quantitative { .. } => {
				let Some((boundaries, max)) = self.buckets(ranges) else {
					return Vec::new();
				};
				boundaries
					.iter()
					.enumerate()
					.zip(QUANTITATIVE_COLOR_SCHEME.iter().copied())
					.map(|((i, lower), color)| {
						let upper = boundaries.get(i + 1).copied().unwrap_or(max);
						KeyEntry {
							color,
							label: format!(
								"{} - {}",
								crate::util::format_decimal(*lower),
								crate::util::format_decimal(upper)
							),
						}
					})
					.collect()
			}
		}
	}
}

pub fn type_color_scheme() -> ColorScheme {
	ColorScheme::Qualitative {
		name: "Instance type",
		data_key: "type",
		values: InstanceType::ALL.iter().map(|t| t.as_str()).collect(),
	}
}

pub fn activity_color_scheme() -> ColorScheme {
	ColorScheme::Quantitative {
		name: "Activity",
		data_key: "statusesPerDay",
		exponential: true,
	}
}

pub fn activity_per_user_color_scheme() -> ColorScheme {
	ColorScheme::Quantitative {
		name: "Activity per user",
		data_key: "statusesPerUserPerDay",
		exponential: true,
	}
}

pub fn insularity_color_scheme() -> ColorScheme {
	ColorScheme::Quantitative {
		name: "Insularity",
		data_key: "insularity",
		exponential: false,
	}
}

/// Every scheme offered in the graph tools, in menu order.
pub fn color_schemes() -> Vec<ColorScheme> {
	vec![
		type_color_scheme(),
		activity_color_scheme(),
		activity_per_user_color_scheme(),
		insularity_color_scheme(),
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(instance_type: Option<InstanceType>, insularity: Option<f64>) -> GraphNodeData {
		GraphNodeData {
			id: "n".into(),
			label: "n".into(),
			size: 1.0,
			instance_type,
			insularity,
			statuses_per_day: None,
			statuses_per_user_per_day: None,
		}
	}

	fn insularity_ranges() -> BTreeMap<String, [f64; 2]> {
		BTreeMap::from([("insularity".to_string(), [0.0, 1.0])])
	}

	#[test]
	fn every_instance_type_gets_its_own_color() {
		let scheme = type_color_scheme();
		let ranges = BTreeMap::new();
		let key = scheme.key(&ranges);
		assert_eq!(key.len(), InstanceType::ALL.len());
		let colors: std::collections::HashSet<_> = key.iter().map(|e| e.color).collect();
		assert_eq!(colors.len(), InstanceType::ALL.len());
		assert_eq!(key.last().map(|e| e.label.as_str()), Some("Smithereen"));
		assert!(
			scheme
				.color_for(&node(Some(InstanceType::Smithereen), None), None)
				.is_some()
		);
	}

	#[test]
	fn qualitative_colors_follow_value_order() {
		let scheme = type_color_scheme();
		assert_eq!(
			scheme.color_for(&node(Some(InstanceType::Pleroma), None), None),
			Some(QUALITATIVE_COLOR_SCHEME[1])
		);
		assert_eq!(scheme.color_for(&node(Some(InstanceType::Other), None), None), None);
		assert_eq!(scheme.color_for(&node(None, None), None), None);
	}

	#[test]
	fn quantitative_colors_cover_the_whole_range() {
		let scheme = insularity_color_scheme();
		let ranges = insularity_ranges();
		let buckets = scheme.buckets(&ranges);
		let palette = QUANTITATIVE_COLOR_SCHEME;

		assert_eq!(
			scheme.color_for(&node(None, Some(0.0)), buckets.as_ref()),
			Some(palette[0])
		);
		assert_eq!(
			scheme.color_for(&node(None, Some(1.0)), buckets.as_ref()),
			Some(palette[palette.len() - 1])
		);
		assert_eq!(scheme.color_for(&node(None, None), buckets.as_ref()), None);
	}

	#[test]
	fn quantitative_scheme_without_range_has_no_buckets() {
		let scheme = activity_color_scheme();
		assert_eq!(scheme.buckets(&insularity_ranges()), None);
		assert!(scheme.key(&insularity_ranges()).is_empty());
		assert_eq!(type_color_scheme().buckets(&insularity_ranges()), None);
	}

	#[test]
	fn key_has_one_entry_per_bucket() {
		let key = insularity_color_scheme().key(&insularity_ranges());
		assert_eq!(key.len(), QUANTITATIVE_COLOR_SCHEME.len());
		assert_eq!(key[0].label, "0.00 - 0.14");
		assert!(key.last().unwrap().label.ends_with("1.00"));

		let key = type_color_scheme().key(&insularity_ranges());
		assert_eq!(key[0].label, "Mastodon");
	}
}
