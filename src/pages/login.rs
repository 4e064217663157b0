use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use log::warn;

use crate::api::{LoginRequest, LoginType, LoginTypes, normalize_domain};
use crate::auth::is_logged_in;
use crate::components::error_state::ErrorState;
use crate::store::use_store;

/// What to tell the admin once the login link is on its way.
fn post_login_message(types: &LoginTypes, login_type: LoginType) -> String {
	match login_type {
		LoginType::Email => format!(
			"Check {} for a login link",
			types.email.as_deref().unwrap_or("your email")
		),
		LoginType::FediverseAccount => format!(
			"Check {}'s DMs for a login link.",
			types.fediverse_account.as_deref().unwrap_or("your account")
		),
	}
}

#[derive(Clone, Debug, PartialEq)]
enum Step {
	ChooseInstance,
	ChooseLoginType(LoginTypes),
	Sent(String),
	Failed,
}

/// Admin login: pick an instance, then an authentication method.
#[component]
pub fn LoginPage() -> impl IntoView {
	let store = use_store();
	let navigate = use_navigate();
	if is_logged_in() {
		navigate("/admin", Default::default());
	}

	let domain = RwSignal::new(String::new());
	let step = RwSignal::new(Step::ChooseInstance);
	let is_busy = RwSignal::new(false);
	let lookup_error = RwSignal::new(None::<String>);

	let get_login_types = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		let input = domain.get_untracked();
		let target = normalize_domain(&input).to_string();
		if target.is_empty() {
			return;
		}
		let client = store.client();
		is_busy.set(true);
		lookup_error.set(None);
		spawn_local(async move {
			match client.login_types(&target).await {
				Ok(types) => step.set(Step::ChooseLoginType(types)),
				Err(err) => {
					warn!("no login types for {target}: {err}");
					lookup_error.set(Some(err.to_string()));
				}
			}
			is_busy.set(false);
		});
	};

	let login = move |types: LoginTypes, login_type: LoginType| {
		let client = store.client();
		let request = LoginRequest {
			domain: types.domain.clone(),
			login_type,
		};
		is_busy.set(true);
		spawn_local(async move {
			match client.request_login(&request).await {
				Ok(_) => step.set(Step::Sent(post_login_message(&types, login_type))),
				Err(err) => {
					warn!("login request for {} failed: {err}", request.domain);
					step.set(Step::Failed);
				}
			}
			is_busy.set(false);
		});
	};

	let content = move || match step.get() {
		Step::Failed => view! {
			<ErrorState description="This could be because the instance is down. If not, please reload the page and try again." />
		}
		.into_any(),
		Step::Sent(message) => view! {
			<div class="post-login">
				<p class="text-large">{message}</p>
			</div>
		}
		.into_any(),
		Step::ChooseLoginType(types) => {
			let email = types.email.clone().map(|email| {
				let types = types.clone();
				view! {
					<button
						class="large"
						disabled=move || is_busy.get()
						on:click=move |_| login(types.clone(), LoginType::Email)
					>
						{format!("Email {email}")}
					</button>
				}
			});
			let dm = types.fediverse_account.clone().map(|account| {
				let types = types.clone();
				view! {
					<button
						class="large"
						disabled=move || is_busy.get()
						on:click=move |_| login(types.clone(), LoginType::FediverseAccount)
					>
						{format!("DM {account}")}
					</button>
				}
			});
			view! {
				<h2>"Choose an authentication method"</h2>
				<div class="login-types">{email} {dm}</div>
			}
			.into_any()
		}
		Step::ChooseInstance => view! {
			<form on:submit=get_login_types>
				<label for="domain-input">"Instance domain"</label>
				<input
					id="domain-input"
					placeholder="mastodon.social"
					disabled=move || is_busy.get()
					prop:value=move || domain.get()
					on:input=move |ev| domain.set(event_target_value(&ev))
				/>
				<button type="submit" class="primary" disabled=move || is_busy.get()>
					"→"
				</button>
				{move || lookup_error.get().map(|e| view! { <p class="notice danger">{e}</p> })}
			</form>
		}
		.into_any(),
	};

	view! {
		<div class="page">
			<h1>"Login"</h1>
			<p class="running-text">
				"You must be the instance admin to manage how fediverse.space interacts with your instance."
			</p>
			<p class="running-text">
				"It's currently only possible to administrate Mastodon and Pleroma instances. If you want to login with a direct message, your instance must federate with mastodon.social and vice versa."
			</p>
			<p class="running-text">
				"If you run another server type, you can manually opt in or out by writing to "
				<a href="https://mastodon.social/@fediversespace">"@fediversespace"</a>
				"."
			</p>
			<div class="form-container">{content}</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn post_login_message_names_the_destination() {
		let types = LoginTypes {
			domain: "a.social".into(),
			email: Some("admin@a.social".into()),
			fediverse_account: Some("@admin@a.social".into()),
		};
		assert_eq!(
			post_login_message(&types, LoginType::Email),
			"Check admin@a.social for a login link"
		);
		assert_eq!(
			post_login_message(&types, LoginType::FediverseAccount),
			"Check @admin@a.social's DMs for a login link."
		);
	}
}
