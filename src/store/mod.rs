//! Client state: an action enum, pure per-slice reducers, and a signal-backed store.

mod actions;
mod state;
mod thunks;

use leptos::prelude::*;
use log::debug;

pub use actions::Action;
pub use state::{
	AppState, CurrentInstance, CurrentInstanceState, GraphLoadState, InstanceListState, Remote,
	SearchState,
};

use crate::api::ApiClient;

/// Handle to the app state, shared through context.
#[derive(Clone, Copy)]
pub struct Store {
	state: RwSignal<AppState>,
	client: StoredValue<ApiClient>,
}

impl Store {
	pub fn new(client: ApiClient) -> Self {
		Self {
			state: RwSignal::new(AppState::default()),
			client: StoredValue::new(client),
		}
	}

	pub fn dispatch(&self, action: Action) {
		debug!("dispatch {}", action.kind());
		self.state.update(|state| state.reduce(&action));
	}

	/// Reads state, subscribing the current reactive scope.
	pub fn with<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
		self.state.with(f)
	}

	pub fn with_untracked<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
		self.state.with_untracked(f)
	}

	pub fn client(&self) -> ApiClient {
		self.client.get_value()
	}
}

pub fn provide_store(client: ApiClient) -> Store {
	let store = Store::new(client);
	provide_context(store);
	store
}

pub fn use_store() -> Store {
	expect_context::<Store>()
}
