use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::auth::is_logged_in;

#[component]
pub fn Nav() -> impl IntoView {
	let location = use_location();
	// Session storage isn't reactive; re-check on every navigation.
	let admin_href = move || {
		location.pathname.track();
		if is_logged_in() {
			"/admin"
		} else {
			"/admin/login"
		}
	};

	view! {
		<nav class="nav">
			<span class="nav-heading">"fediverse.space"</span>
			<A href="/">"Home"</A>
			<A href="/instances">"Instances"</A>
			<A href="/about">"About"</A>
			<span class="nav-spacer" />
			<a href=admin_href>"Administration"</a>
		</nav>
	}
}
