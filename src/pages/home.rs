use leptos::prelude::*;
use leptos_router::components::Outlet;
use leptos_router::hooks::{use_location, use_navigate};

use crate::color_scheme::ColorScheme;
use crate::config::INSTANCE_DOMAIN_PATH_PREFIX;
use crate::components::error_state::{ErrorState, NonIdealState, Spinner};
use crate::components::force_graph::{GraphCanvas, Layout};
use crate::components::graph_tools::GraphTools;
use crate::components::sidebar::Sidebar;
use crate::store::{Remote, use_store};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GraphStatus {
	Loading,
	Error,
	Ready,
}

/// Graph with a sidebar. The sidebar shows search at `/` and details at `/instance/:domain`.
#[component]
pub fn GraphPage() -> impl IntoView {
	let store = use_store();
	let location = use_location();
	let navigate = use_navigate();

	let domain = Memo::new(move |_| {
		location.pathname.with(|path| {
			path.strip_prefix(INSTANCE_DOMAIN_PATH_PREFIX)
				.map(|d| d.trim_end_matches('/').to_string())
				.filter(|d| !d.is_empty())
		})
	});

	if store.with_untracked(|s| matches!(s.graph.graph, Remote::Idle)) {
		store.load_graph(None);
	}

	let nav = navigate.clone();
	Effect::new(move |_| {
		let domain = domain.get();
		let path = location.pathname.get_untracked();
		store.load_instance(domain, &path, |to| nav(to, Default::default()));
	});

	let color_scheme = RwSignal::new(None::<ColorScheme>);
	let layout = RwSignal::new(Layout::default());
	let show_edges = RwSignal::new(true);
	let reset = RwSignal::new(0u32);

	// Keyed by request generation so unrelated dispatches don't rebuild the view.
	let graph_key = Memo::new(move |_| store.with(|s| (s.graph.request, s.graph.graph.value().is_some())));
	let data = Signal::derive(move || {
		graph_key.track();
		store.with_untracked(|s| s.graph.graph.value().cloned())
	});
	let ranges = Memo::new(move |_| {
		store.with(|s| {
			s.graph
				.graph
				.value()
				.map(|g| g.metadata.ranges.clone())
				.unwrap_or_default()
		})
	});
	let search_results = Memo::new(move |_| {
		store.with(|s| s.search.results.iter().map(|r| r.name.clone()).collect::<Vec<_>>())
	});
	let hovering_over = Memo::new(move |_| store.with(|s| s.search.hovering_over.clone()));

	let on_select = Callback::new(move |id: Option<String>| {
		let to = match id {
			Some(domain) => format!("/instance/{domain}"),
			None => "/".to_string(),
		};
		navigate(&to, Default::default());
	});

	// Only a status change may rebuild the canvas.
	let status = Memo::new(move |_| {
		store.with(|s| match s.graph.graph {
			Remote::Idle | Remote::Loading => GraphStatus::Loading,
			Remote::Error => GraphStatus::Error,
			Remote::Loaded(_) => GraphStatus::Ready,
		})
	});

	let graph = move || match status.get() {
		GraphStatus::Error => view! { <ErrorState /> }.into_any(),
		GraphStatus::Loading => view! {
			<NonIdealState title="Loading...">
				<Spinner />
			</NonIdealState>
		}
		.into_any(),
		GraphStatus::Ready => view! {
			<GraphCanvas
				data=data
				selected=domain
				color_scheme=color_scheme
				show_edges=show_edges
				search_results=search_results
				hovering_over=hovering_over
				reset=reset
				on_select=on_select
				layout=layout
			/>
			<GraphTools
				color_scheme=color_scheme
				layout=layout
				show_edges=show_edges
				ranges=ranges
				on_reset=move |_| reset.update(|r| *r += 1)
			/>
		}
		.into_any(),
	};

	view! {
		<div class="graph-page">
			<div class="graph-container">{graph}</div>
			<Sidebar>
				<Outlet />
			</Sidebar>
		</div>
	}
}
