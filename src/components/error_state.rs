use leptos::prelude::*;

/// Placeholder for a panel with nothing useful to show.
#[component]
pub fn NonIdealState(
	#[prop(into)] title: String,
	#[prop(optional, into)] description: Option<String>,
	#[prop(optional)] children: Option<Children>,
) -> impl IntoView {
	view! {
		<div class="non-ideal-state">
			<h4>{title}</h4>
			{description.map(|d| view! { <p>{d}</p> })}
			{children.map(|c| c())}
		</div>
	}
}

#[component]
pub fn ErrorState(#[prop(optional, into)] description: Option<String>) -> impl IntoView {
	let description = description.unwrap_or_else(|| "Please try again later.".to_string());
	view! { <NonIdealState title="Something went wrong." description=description /> }
}

#[component]
pub fn Spinner() -> impl IntoView {
	view! { <div class="spinner" aria-label="Loading" /> }
}
