use leptos::prelude::*;

use crate::util::is_small_screen;

/// Collapsible panel next to the graph. Starts closed on small screens.
#[component]
pub fn Sidebar(children: Children) -> impl IntoView {
	let open = RwSignal::new(!is_small_screen());

	view! {
		<aside class="sidebar" class:closed=move || !open.get()>
			<button
				class="sidebar-toggle"
				aria-label="Toggle sidebar"
				on:click=move |_| open.update(|o| *o = !*o)
			>
				{move || if open.get() { "›" } else { "‹" }}
			</button>
			<div class="sidebar-content">{children()}</div>
		</aside>
	}
}
