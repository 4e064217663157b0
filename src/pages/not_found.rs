use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::error_state::NonIdealState;

#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="page">
			<NonIdealState title="Page not found" description="There's nothing at this address.">
				<A href="/">"Back to the graph"</A>
			</NonIdealState>
		</div>
	}
}
