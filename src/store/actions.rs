use std::sync::Arc;

use crate::api::{GraphResponse, InstanceDetails, InstanceListResponse, InstanceSort, SearchResponse};
use crate::search_filters::SearchFilter;

/// Everything that can change [`AppState`](super::AppState).
///
/// Responses carry the `request` generation they answer; a response for an
/// older generation than the slice's current one is dropped.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
	RequestGraph {
		domain: Option<String>,
	},
	ReceiveGraph {
		request: u64,
		graph: Arc<GraphResponse>,
	},
	GraphLoadError {
		request: u64,
	},

	RequestInstanceDetails {
		domain: String,
	},
	ReceiveInstanceDetails {
		request: u64,
		details: Arc<InstanceDetails>,
	},
	InstanceLoadError {
		request: u64,
	},
	DeselectInstance,

	RequestInstanceList {
		page: u32,
		sort: InstanceSort,
	},
	ReceiveInstanceList {
		request: u64,
		response: Arc<InstanceListResponse>,
	},
	InstanceListLoadError {
		request: u64,
	},

	RequestSearchResults {
		query: String,
		filters: Vec<SearchFilter>,
	},
	ReceiveSearchResults {
		request: u64,
		response: SearchResponse,
	},
	SearchResultsError {
		request: u64,
	},
	ResetSearch,
	SetSearchResultHover(Option<String>),
}

impl Action {
	/// Short name for logs; payloads can be large.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::RequestGraph { .. } => "REQUEST_GRAPH",
			Self::ReceiveGraph { .. } => "RECEIVE_GRAPH",
			Self::GraphLoadError { .. } => "GRAPH_LOAD_ERROR",
			Self::RequestInstanceDetails { .. } => "REQUEST_INSTANCE_DETAILS",
			Self::ReceiveInstanceDetails { .. } => "RECEIVE_INSTANCE_DETAILS",
			Self::InstanceLoadError { .. } => "INSTANCE_LOAD_ERROR",
			Self::DeselectInstance => "DESELECT_INSTANCE",
			Self::RequestInstanceList { .. } => "REQUEST_INSTANCE_LIST",
			Self::ReceiveInstanceList { .. } => "RECEIVE_INSTANCE_LIST",
			Self::InstanceListLoadError { .. } => "INSTANCE_LIST_LOAD_ERROR",
			Self::RequestSearchResults { .. } => "REQUEST_SEARCH_RESULTS",
			Self::ReceiveSearchResults { .. } => "RECEIVE_SEARCH_RESULTS",
			Self::SearchResultsError { .. } => "SEARCH_RESULTS_ERROR",
			Self::ResetSearch => "RESET_SEARCH",
			Self::SetSearchResultHover(_) => "SET_SEARCH_RESULT_HOVER",
		}
	}
}
