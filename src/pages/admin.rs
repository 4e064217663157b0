use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use log::{info, warn};

use crate::api::{AdminSettings, AdminSettingsUpdate};
use crate::auth::{get_auth_token, unset_auth_token};
use crate::components::error_state::{ErrorState, Spinner};
use crate::store::use_store;

#[derive(Clone, Debug, PartialEq)]
enum Notice {
	Updated,
	UpdateFailed,
}

/// Opt-in/opt-out settings for the logged-in instance admin.
#[component]
pub fn AdminPage() -> impl IntoView {
	let store = use_store();
	let navigate = use_navigate();
	let settings = RwSignal::new(None::<AdminSettings>);
	let load_failed = RwSignal::new(false);
	let is_updating = RwSignal::new(false);
	let notice = RwSignal::new(None::<Notice>);

	let Some(token) = get_auth_token() else {
		navigate("/admin/login", Default::default());
		return ().into_any();
	};

	{
		let (client, token) = (store.client(), token.clone());
		spawn_local(async move {
			match client.admin_settings(&token).await {
				Ok(loaded) => settings.set(Some(loaded)),
				Err(err) => {
					warn!("failed to load admin settings: {err}");
					unset_auth_token();
					load_failed.set(true);
				}
			}
		});
	}

	let on_submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		let Some(current) = settings.get_untracked() else {
			return;
		};
		let update = AdminSettingsUpdate {
			opt_in: current.opt_in,
			opt_out: current.opt_out,
		};
		let (client, token) = (store.client(), token.clone());
		is_updating.set(true);
		spawn_local(async move {
			match client.update_admin_settings(&token, update).await {
				Ok(updated) => {
					settings.set(Some(updated));
					notice.set(Some(Notice::Updated));
				}
				Err(err) => {
					warn!("failed to update admin settings: {err}");
					notice.set(Some(Notice::UpdateFailed));
				}
			}
			is_updating.set(false);
		});
	};

	let logout = move |_: leptos::ev::MouseEvent| {
		unset_auth_token();
		info!("logged out");
		navigate("/admin/login", Default::default());
	};

	let loaded = Memo::new(move |_| settings.with(Option::is_some));
	let summary = move || {
		settings.with(|s| {
			s.as_ref().map(|s| {
				let statuses = s
					.status_count
					.map(|n| n.to_string())
					.unwrap_or_else(|| "(unknown)".to_string());
				format!("{} users with {statuses} statuses.", s.user_count)
			})
		})
	};

	let form = move || {
		loaded.get().then(|| view! {
			<h2>{move || settings.with(|s| s.as_ref().map(|s| s.domain.clone()))}</h2>
			<p>{summary}</p>
			<Show when=move || settings.with(|s| s.as_ref().is_some_and(AdminSettings::can_opt_in))>
				<div class="form-group">
					<label>
						<input
							type="checkbox"
							id="opt-in-switch"
							prop:checked=move || settings.with(|s| s.as_ref().is_some_and(|s| s.opt_in))
							disabled=move || is_updating.get()
							on:change=move |ev| {
								let checked = event_target_checked(&ev);
								settings.update(|s| *s = s.take().map(|s| s.with_opt_in(checked)));
							}
						/>
						"Opt in"
					</label>
					<p class="helper">
						"Check this if you'd like your personal instance to be crawled by fediverse.space. This takes up to 24 hours to take effect."
					</p>
				</div>
			</Show>
			<div class="form-group">
				<label>
					<input
						type="checkbox"
						id="opt-out-switch"
						prop:checked=move || settings.with(|s| s.as_ref().is_some_and(|s| s.opt_out))
						disabled=move || is_updating.get()
						on:change=move |ev| {
							let checked = event_target_checked(&ev);
							settings.update(|s| *s = s.take().map(|s| s.with_opt_out(checked)));
						}
					/>
					"Opt out"
				</label>
				<p class="helper">
					"Check this if you don't want your instance to be crawled. You won't appear on fediverse.space. The change is immediate."
				</p>
			</div>
		})
	};

	view! {
		<div class="page">
			<h1>"Instance administration"</h1>
			{move || {
				if load_failed.get() {
					view! { <ErrorState description="Failed to load settings." /> }.into_any()
				} else if settings.with(Option::is_none) {
					view! { <Spinner /> }.into_any()
				} else {
					().into_any()
				}
			}}
			<form on:submit=on_submit>
				{form}
				{move || {
					notice
						.get()
						.map(|n| match n {
							Notice::Updated => {
								view! { <p class="notice success">"Successfully updated settings."</p> }.into_any()
							}
							Notice::UpdateFailed => {
								view! { <p class="notice danger">"Failed to update settings."</p> }.into_any()
							}
						})
				}}
				<div class="button-container">
					<button
						type="submit"
						class="primary"
						disabled=move || is_updating.get() || settings.with(Option::is_none)
					>
						"Update settings"
					</button>
					<button type="button" class="danger" on:click=logout>
						"Log out"
					</button>
				</div>
			</form>
		</div>
	}
	.into_any()
}
