use std::sync::Arc;

use leptos::task::spawn_local;
use log::{debug, info, warn};

use super::{Action, Store};
use crate::api::InstanceSort;
use crate::config::INSTANCE_DOMAIN_PATH_PREFIX;
use crate::search_filters::{SearchFilter, encode_filters};

// Each loader issues at most one request per resource at a time and turns
// every API failure into an error action.
impl Store {
	pub fn load_graph(self, domain: Option<String>) {
		if self.with_untracked(|s| s.graph.graph.is_loading()) {
			return;
		}
		self.dispatch(Action::RequestGraph {
			domain: domain.clone(),
		});
		let request = self.with_untracked(|s| s.graph.request);
		let client = self.client();
		spawn_local(async move {
			match client.graph(domain.as_deref()).await {
				Ok(graph) => {
					info!(
						"graph loaded: {} nodes, {} edges",
						graph.graph.nodes.len(),
						graph.graph.edges.len()
					);
					self.dispatch(Action::ReceiveGraph {
						request,
						graph: Arc::new(graph),
					});
				}
				Err(err) => {
					warn!("failed to load graph: {err}");
					self.dispatch(Action::GraphLoadError { request });
				}
			}
		});
	}

	/// Selects an instance, or clears the selection with `None`.
	///
	/// Clearing while on an instance page also navigates back to `/`.
	pub fn load_instance(self, domain: Option<String>, current_path: &str, navigate: impl Fn(&str)) {
		let Some(domain) = domain else {
			self.dispatch(Action::DeselectInstance);
			if current_path.starts_with(INSTANCE_DOMAIN_PATH_PREFIX) {
				navigate("/");
			}
			return;
		};
		if !self.with_untracked(|s| s.current_instance.needs_load(&domain)) {
			return;
		}

		self.dispatch(Action::RequestInstanceDetails {
			domain: domain.clone(),
		});
		let request = self.with_untracked(|s| s.current_instance.request);
		let client = self.client();
		spawn_local(async move {
			match client.instance(&domain).await {
				Ok(details) => self.dispatch(Action::ReceiveInstanceDetails {
					request,
					details: Arc::new(details),
				}),
				Err(err) => {
					warn!("failed to load {domain}: {err}");
					self.dispatch(Action::InstanceLoadError { request });
				}
			}
		});
	}

	/// Loads a page of the instance table. A new sort always starts at page 1.
	pub fn load_instance_list(self, page: Option<u32>, sort: Option<InstanceSort>) {
		let Some((page, sort)) = self.with_untracked(|s| s.instance_list.next_request(page, sort)) else {
			return;
		};

		self.dispatch(Action::RequestInstanceList { page, sort });
		let request = self.with_untracked(|s| s.instance_list.request);
		let client = self.client();
		spawn_local(async move {
			match client.instance_list(page, sort).await {
				Ok(response) => self.dispatch(Action::ReceiveInstanceList {
					request,
					response: Arc::new(response),
				}),
				Err(err) => {
					warn!("failed to load instance list: {err}");
					self.dispatch(Action::InstanceListLoadError { request });
				}
			}
		});
	}

	/// Runs a search. Repeating the current search fetches its next page.
	pub fn update_search(self, query: String, filters: Vec<SearchFilter>) {
		if query.is_empty() && filters.is_empty() {
			self.dispatch(Action::ResetSearch);
			return;
		}
		let Some(after) = self.with_untracked(|s| s.search.next_cursor(&query, &filters)) else {
			return;
		};
		debug!("searching {query:?} [{}]", encode_filters(&filters));

		self.dispatch(Action::RequestSearchResults {
			query: query.clone(),
			filters: filters.clone(),
		});
		let request = self.with_untracked(|s| s.search.request);
		let client = self.client();
		spawn_local(async move {
			match client.search(&query, &filters, after.as_deref()).await {
				Ok(response) => self.dispatch(Action::ReceiveSearchResults { request, response }),
				Err(err) => {
					warn!("search for {query:?} failed: {err}");
					self.dispatch(Action::SearchResultsError { request });
				}
			}
		});
	}

	pub fn set_search_result_hover(self, domain: Option<String>) {
		self.dispatch(Action::SetSearchResultHover(domain));
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use leptos::prelude::Owner;

	use super::*;
	use crate::api::{ApiClient, InstanceDetails};
	use crate::config::ApiConfig;
	use crate::store::CurrentInstance;

	fn store() -> Store {
		Store::new(ApiClient::new(ApiConfig::new("http://localhost:4000/api")))
	}

	#[test]
	fn deselecting_on_an_instance_page_navigates_home() {
		let owner = Owner::new();
		owner.set();
		let store = store();
		store.dispatch(Action::RequestInstanceDetails {
			domain: "a.social".into(),
		});
		store.dispatch(Action::ReceiveInstanceDetails {
			request: store.with_untracked(|s| s.current_instance.request),
			details: Arc::new(InstanceDetails::default()),
		});

		let visited = RefCell::new(Vec::new());
		store.load_instance(None, "/instance/a.social", |to| visited.borrow_mut().push(to.to_string()));
		assert_eq!(visited.into_inner(), ["/"]);
		assert_eq!(
			store.with_untracked(|s| s.current_instance.instance.clone()),
			CurrentInstance::Empty
		);
	}

	#[test]
	fn deselecting_elsewhere_stays_put() {
		let owner = Owner::new();
		owner.set();
		let store = store();
		let visited = RefCell::new(Vec::new());
		store.load_instance(None, "/", |to| visited.borrow_mut().push(to.to_string()));
		assert!(visited.into_inner().is_empty());
	}

	#[test]
	fn empty_search_resets_without_a_request() {
		let owner = Owner::new();
		owner.set();
		let store = store();
		store.dispatch(Action::RequestSearchResults {
			query: "cats".into(),
			filters: Vec::new(),
		});
		store.update_search(String::new(), Vec::new());
		store.with_untracked(|s| {
			assert_eq!(s.search.query, "");
			assert!(!s.search.is_loading);
		});
	}
}
