use leptos::prelude::*;

use crate::components::instance_table::InstanceTable;

#[component]
pub fn InstancesPage() -> impl IntoView {
	view! {
		<div class="page full-width">
			<h1>"Instances"</h1>
			<InstanceTable />
		</div>
	}
}
