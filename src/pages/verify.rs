use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::auth::set_auth_token;

/// Landing page of the emailed/DMed login link: stores `?token=` and moves on.
#[component]
pub fn VerifyPage() -> impl IntoView {
	let query = use_query_map();
	let navigate = use_navigate();

	Effect::new(move |_| {
		let token = query.with(|q| q.get("token")).filter(|t| !t.is_empty());
		let to = match token {
			Some(token) => {
				set_auth_token(&token);
				"/admin"
			}
			None => "/admin/login",
		};
		navigate(
			to,
			NavigateOptions {
				replace: true,
				..Default::default()
			},
		);
	});

	view! { <div class="page" /> }
}
