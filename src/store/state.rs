use std::sync::Arc;

use super::actions::Action;
use crate::api::{
	GraphResponse, InstanceDetails, InstanceListResponse, InstanceSort, SearchResultInstance,
};
use crate::search_filters::SearchFilter;

/// A fetched resource.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Remote<T> {
	#[default]
	Idle,
	Loading,
	Loaded(T),
	Error,
}

impl<T> Remote<T> {
	pub fn is_loading(&self) -> bool {
		matches!(self, Self::Loading)
	}

	pub fn has_error(&self) -> bool {
		matches!(self, Self::Error)
	}

	pub fn value(&self) -> Option<&T> {
		match self {
			Self::Loaded(value) => Some(value),
			_ => None,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphLoadState {
	pub graph: Remote<Arc<GraphResponse>>,
	/// Instance the graph is scoped to, `None` for the whole fediverse.
	pub domain: Option<String>,
	pub request: u64,
}

impl GraphLoadState {
	fn reduce(&mut self, action: &Action) {
		match action {
			Action::RequestGraph { domain } => {
				self.request += 1;
				self.domain = domain.clone();
				self.graph = Remote::Loading;
			}
			Action::ReceiveGraph { request, graph } if *request == self.request => {
				self.graph = Remote::Loaded(graph.clone());
			}
			Action::GraphLoadError { request } if *request == self.request => {
				self.graph = Remote::Error;
			}
			_ => {}
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum CurrentInstance {
	#[default]
	Empty,
	Loading {
		name: String,
	},
	Loaded {
		name: String,
		details: Arc<InstanceDetails>,
	},
	Error {
		name: String,
	},
}

impl CurrentInstance {
	pub fn name(&self) -> Option<&str> {
		match self {
			Self::Empty => None,
			Self::Loading { name } | Self::Loaded { name, .. } | Self::Error { name } => Some(name.as_str()),
		}
	}

	pub fn details(&self) -> Option<&Arc<InstanceDetails>> {
		match self {
			Self::Loaded { details, .. } => Some(details),
			_ => None,
		}
	}

	pub fn is_loading(&self) -> bool {
		matches!(self, Self::Loading { .. })
	}

	pub fn has_error(&self) -> bool {
		matches!(self, Self::Error { .. })
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurrentInstanceState {
	pub instance: CurrentInstance,
	pub request: u64,
}

impl CurrentInstanceState {
	/// Whether selecting `domain` needs a fetch. A failed load is retried.
	pub fn needs_load(&self, domain: &str) -> bool {
		self.instance.name() != Some(domain) || self.instance.has_error()
	}

	fn reduce(&mut self, action: &Action) {
		match action {
			Action::RequestInstanceDetails { domain } => {
				self.request += 1;
				self.instance = CurrentInstance::Loading {
					name: domain.clone(),
				};
			}
			Action::ReceiveInstanceDetails { request, details } if *request == self.request => {
				if let CurrentInstance::Loading { name } = &self.instance {
					self.instance = CurrentInstance::Loaded {
						name: name.clone(),
						details: details.clone(),
					};
				}
			}
			Action::InstanceLoadError { request } if *request == self.request => {
				if let CurrentInstance::Loading { name } = &self.instance {
					self.instance = CurrentInstance::Error { name: name.clone() };
				}
			}
			Action::DeselectInstance => {
				// Invalidates anything still in flight.
				self.request += 1;
				self.instance = CurrentInstance::Empty;
			}
			_ => {}
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstanceListState {
	pub response: Option<Arc<InstanceListResponse>>,
	pub sort: InstanceSort,
	pub is_loading: bool,
	pub error: bool,
	pub request: u64,
}

impl InstanceListState {
	/// Page and sort for the next list request, or `None` while one is in flight.
	///
	/// Missing arguments keep the current page and sort. A new sort always starts at page 1.
	pub fn next_request(
		&self,
		page: Option<u32>,
		sort: Option<InstanceSort>,
	) -> Option<(u32, InstanceSort)> {
		if self.is_loading {
			return None;
		}
		let sort = sort.unwrap_or(self.sort);
		let page = if sort != self.sort {
			1
		} else {
			page.or(self.response.as_ref().map(|r| r.page_number))
				.unwrap_or(1)
		};
		Some((page, sort))
	}

	fn reduce(&mut self, action: &Action) {
		match action {
			Action::RequestInstanceList { sort, .. } => {
				self.request += 1;
				self.sort = *sort;
				self.is_loading = true;
				self.error = false;
			}
			Action::ReceiveInstanceList { request, response } if *request == self.request => {
				self.response = Some(response.clone());
				self.is_loading = false;
			}
			Action::InstanceListLoadError { request } if *request == self.request => {
				self.is_loading = false;
				self.error = true;
			}
			_ => {}
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
	pub query: String,
	pub filters: Vec<SearchFilter>,
	pub results: Vec<SearchResultInstance>,
	/// Cursor for the next page of results; empty when there is none.
	pub next: String,
	pub is_loading: bool,
	pub error: bool,
	/// Result the pointer is over, highlighted in the graph.
	pub hovering_over: Option<String>,
	pub request: u64,
}

impl SearchState {
	/// Whether searching `query` with `filters` continues the current result list.
	pub fn is_same_search(&self, query: &str, filters: &[SearchFilter]) -> bool {
		self.query == query && self.filters == filters
	}

	pub fn has_more_results(&self) -> bool {
		!self.next.is_empty()
	}

	/// The `after` cursor for searching `query` with `filters`, or `None` when nothing
	/// should be sent: a request is in flight or the current search is exhausted.
	pub fn next_cursor(&self, query: &str, filters: &[SearchFilter]) -> Option<Option<String>> {
		if self.is_loading {
			return None;
		}
		if !self.is_same_search(query, filters) {
			return Some(None);
		}
		if self.has_more_results() {
			Some(Some(self.next.clone()))
		} else if self.results.is_empty() {
			Some(None)
		} else {
			None
		}
	}

	fn reduce(&mut self, action: &Action) {
		match action {
			Action::RequestSearchResults { query, filters } => {
				self.request += 1;
				if !self.is_same_search(query, filters) {
					self.query = query.clone();
					self.filters = filters.clone();
					self.results.clear();
					self.next.clear();
				}
				self.is_loading = true;
				self.error = false;
			}
			Action::ReceiveSearchResults { request, response } if *request == self.request => {
				self.results.extend(response.results.iter().cloned());
				self.next = response.next.clone().unwrap_or_default();
				self.is_loading = false;
			}
			Action::SearchResultsError { request } if *request == self.request => {
				self.is_loading = false;
				self.error = true;
			}
			Action::ResetSearch => {
				*self = Self {
					request: self.request + 1,
					..Self::default()
				};
			}
			Action::SetSearchResultHover(domain) => {
				self.hovering_over = domain.clone();
			}
			_ => {}
		}
	}
}

/// Root of the client state; each slice reacts only to its own actions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
	pub graph: GraphLoadState,
	pub current_instance: CurrentInstanceState,
	pub instance_list: InstanceListState,
	pub search: SearchState,
}

impl AppState {
	pub fn reduce(&mut self, action: &Action) {
		self.graph.reduce(action);
		self.current_instance.reduce(action);
		self.instance_list.reduce(action);
		self.search.reduce(action);
	}
}
