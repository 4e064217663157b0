use std::collections::BTreeMap;

use leptos::prelude::*;

use super::force_graph::Layout;
use crate::color_scheme::{ColorScheme, color_schemes};

/// Floating controls over the graph: color scheme picker and key, layout, edge toggle, reset.
#[component]
pub fn GraphTools(
	color_scheme: RwSignal<Option<ColorScheme>>,
	layout: RwSignal<Layout>,
	show_edges: RwSignal<bool>,
	#[prop(into)] ranges: Signal<BTreeMap<String, [f64; 2]>>,
	#[prop(into)] on_reset: Callback<()>,
) -> impl IntoView {
	let on_change = move |ev: leptos::ev::Event| {
		let name = event_target_value(&ev);
		let scheme = color_schemes().into_iter().find(|s| s.name() == name);
		color_scheme.set(scheme);
	};

	let key = move || {
		let scheme = color_scheme.get()?;
		let entries = ranges.with(|ranges| scheme.key(ranges));
		Some(view! {
			<ul class="graph-key">
				{entries
					.into_iter()
					.map(|entry| {
						view! {
							<li>
								<span class="swatch" style:background-color=entry.color />
								{entry.label}
							</li>
						}
					})
					.collect_view()}
			</ul>
		})
	};

	view! {
		<div class="graph-tools">
			<div class="floating-card">
				<label for="color-scheme">"Color coding"</label>
				<select id="color-scheme" on:change=on_change>
					<option value="" selected=move || color_scheme.with(Option::is_none)>
						"No color coding"
					</option>
					{color_schemes()
						.into_iter()
						.map(|scheme| {
							let name = scheme.name();
							view! {
								<option
									value=name
									selected=move || {
										color_scheme.with(|s| s.as_ref().is_some_and(|s| s.name() == name))
									}
								>
									{name}
								</option>
							}
						})
						.collect_view()}
				</select>
				{key}
			</div>
			<div class="floating-card">
				<label for="layout">"Layout"</label>
				<select
					id="layout"
					on:change=move |ev| {
						let force = event_target_value(&ev) == "force";
						layout.set(if force { Layout::Force } else { Layout::Preset });
					}
				>
					<option value="preset" selected=move || layout.get() == Layout::Preset>
						"Precomputed"
					</option>
					<option value="force" selected=move || layout.get() == Layout::Force>
						"Force-directed"
					</option>
				</select>
			</div>
			<div class="floating-card graph-buttons">
				<button on:click=move |_| show_edges.update(|s| *s = !*s)>
					{move || if show_edges.get() { "Hide edges" } else { "Show edges" }}
				</button>
				<button on:click=move |_| on_reset.run(())>"Reset"</button>
			</div>
		</div>
	}
}
