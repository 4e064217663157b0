//! Leptos client-side app for exploring the fediverse instance graph.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
pub mod api;
pub mod auth;
pub mod color_scheme;
mod components;
pub mod config;
pub mod neighbors;
mod pages;
pub mod pagination;
pub mod search_filters;
pub mod store;
pub mod util;

use crate::api::ApiClient;
use crate::components::instance_detail::InstanceScreen;
use crate::components::nav::Nav;
use crate::components::search::SearchScreen;
use crate::config::ApiConfig;
use crate::store::provide_store;

// Top-Level pages
use crate::pages::about::AboutPage;
use crate::pages::admin::AdminPage;
use crate::pages::home::GraphPage;
use crate::pages::instances::InstancesPage;
use crate::pages::login::LoginPage;
use crate::pages::not_found::NotFound;
use crate::pages::verify::VerifyPage;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// The app shell: nav bar plus routes for the graph, table, about and admin pages.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let config = ApiConfig::from_env();
	info!("using API at {}", config.root);
	provide_context(config.clone());
	provide_store(ApiClient::new(config));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="fediverse.space" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Nav />
			<main>
				<ErrorBoundary fallback=|errors| {
					view! {
						<h1>"Uh oh! Something went wrong!"</h1>

						<p>"Errors: "</p>
						<ul>
							{move || {
								errors
									.get()
									.into_iter()
									.map(|(_, e)| view! { <li>{e.to_string()}</li> })
									.collect_view()
							}}
						</ul>
					}
				}>
					<Routes fallback=|| view! { <NotFound /> }>
						// The graph stays mounted while the sidebar switches panels.
						<ParentRoute path=path!("/") view=GraphPage>
							<Route path=path!("") view=SearchScreen />
							<Route path=path!("instance/:domain") view=InstanceScreen />
						</ParentRoute>
						<Route path=path!("/instances") view=InstancesPage />
						<Route path=path!("/about") view=AboutPage />
						<Route path=path!("/admin") view=AdminPage />
						<Route path=path!("/admin/login") view=LoginPage />
						<Route path=path!("/admin/verify") view=VerifyPage />
					</Routes>
				</ErrorBoundary>
			</main>
		</Router>
	}
}
