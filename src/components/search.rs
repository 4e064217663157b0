use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::error_state::{NonIdealState, Spinner};
use crate::api::{InstanceType, SearchResultInstance};
use crate::search_filters::{Relation, SearchField, SearchFilter, SelectedFilters};
use crate::store::use_store;
use crate::util::{capitalize, format_count, is_small_screen, strip_html};

/// Longest description excerpt shown under a result.
const EXCERPT_LEN: usize = 200;

fn excerpt(description: &str) -> String {
	let text = strip_html(description);
	match text.char_indices().nth(EXCERPT_LEN) {
		Some((cut, _)) => format!("{}…", &text[..cut]),
		None => text,
	}
}

/// Tags for the applied filters plus a menu to add an instance-type filter.
#[component]
fn SearchFilters(filters: RwSignal<SelectedFilters>, #[prop(into)] on_change: Callback<()>) -> impl IntoView {
	let menu_open = RwSignal::new(false);
	let has_type_filter = move || filters.with(|f| f.has_field(SearchField::Type));

	let select_type = move |instance_type: InstanceType| {
		menu_open.set(false);
		let filter = SearchFilter::new(SearchField::Type, Relation::Eq, instance_type.as_str());
		if filters.try_update(|f| f.select(filter)).unwrap_or(false) {
			on_change.run(());
		}
	};

	view! {
		<div class="search-filters">
			<div class="tags">
				{move || {
					filters
						.with(|f| f.to_vec())
						.into_iter()
						.map(|filter| {
							let id = filter.id();
							view! {
								<span class="tag">
									{filter.display_value}
									<button
										aria-label="Remove filter"
										on:click=move |_| {
											if filters.try_update(|f| f.deselect(&id)).unwrap_or(false) {
												on_change.run(());
											}
										}
									>
										"×"
									</button>
								</span>
							}
						})
						.collect_view()
				}}
			</div>
			<button class="minimal" on:click=move |_| menu_open.update(|o| *o = !*o)>
				"Add filter"
			</button>
			<Show when=move || menu_open.get()>
				<ul class="menu">
					<li class="menu-heading" class:disabled=has_type_filter>
						"Instance type"
					</li>
					{InstanceType::ALL
						.into_iter()
						.map(|t| {
							view! {
								<li>
									<button
										disabled=has_type_filter
										on:click=move |_| select_type(t)
									>
										{capitalize(t.as_str())}
									</button>
								</li>
							}
						})
						.collect_view()}
				</ul>
			</Show>
		</div>
	}
}

#[component]
fn SearchResult(result: SearchResultInstance) -> impl IntoView {
	let store = use_store();
	let navigate = use_navigate();
	let (enter_name, click_name) = (result.name.clone(), result.name.clone());

	view! {
		<button
			class="search-result"
			on:mouseenter=move |_| store.set_search_result_hover(Some(enter_name.clone()))
			on:mouseleave=move |_| store.set_search_result_hover(None)
			on:click=move |_| {
				store.set_search_result_hover(None);
				navigate(&format!("/instance/{click_name}"), Default::default());
			}
		>
			<h4>{result.name}</h4>
			<p class="muted">
				{result.instance_type.map(|t| capitalize(t.as_str()))}
				{result.user_count.map(|n| format!(" · {} users", format_count(n)))}
			</p>
			{result.description.map(|d| view! { <p class="excerpt">{excerpt(&d)}</p> })}
		</button>
	}
}

/// Search panel shown in the sidebar when no instance is selected.
#[component]
pub fn SearchScreen() -> impl IntoView {
	let store = use_store();
	// Query and filters both come back from the store on remount.
	let (stored_query, stored_filters) =
		store.with_untracked(|s| (s.search.query.clone(), s.search.filters.clone()));
	let query = RwSignal::new(stored_query);
	let filters = RwSignal::new(SelectedFilters::from(stored_filters));

	let search = move || store.update_search(query.get_untracked(), filters.with_untracked(|f| f.to_vec()));
	let clear = move || {
		query.set(String::new());
		filters.update(SelectedFilters::clear);
		store.update_search(String::new(), Vec::new());
	};

	let on_submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		if store.with_untracked(|s| s.search.query != query.get_untracked()) {
			search();
		}
	};

	let is_loading = Memo::new(move |_| store.with(|s| s.search.is_loading));
	let has_query = Memo::new(move |_| store.with(|s| !s.search.query.is_empty()));
	let has_error = Memo::new(move |_| store.with(|s| s.search.error));

	// Hover changes must not re-render the list under the pointer.
	let snapshot = Memo::new(move |_| {
		store.with(|s| {
			let search = &s.search;
			(
				search.error,
				!search.is_loading && !search.query.is_empty() && search.results.is_empty(),
				search.results.clone(),
				!search.is_loading && search.has_more_results(),
			)
		})
	});
	let content = move || {
		let (error, no_results, results, more) = snapshot.get();
		if error {
			view! { <NonIdealState title="Something went wrong." /> }.into_any()
		} else if no_results {
			view! {
				<NonIdealState title="No search results" description="Try searching for something else." />
			}
			.into_any()
		} else if !results.is_empty() {
			view! {
				<div class="search-results">
					{results
						.into_iter()
						.map(|result| view! { <SearchResult result=result /> })
						.collect_view()}
					<Show when=move || is_loading.get()>
						<Spinner />
					</Show>
					<Show when=move || more>
						<button class="minimal" on:click=move |_| search()>
							"Load more results"
						</button>
					</Show>
				</div>
			}
			.into_any()
		} else {
			().into_any()
		}
	};

	view! {
		<Show when=move || is_small_screen() && store.with(|s| s.search.results.is_empty())>
			<div class="callout warning">
				<h5>"Desktop site"</h5>
				"This is a desktop-optimized site with large visualizations. You can view a simplified version on smaller devices, but for the full experience, open it on a computer."
			</div>
		</Show>
		<div class="search-bar" class:has-results=move || has_query.get() || has_error.get()>
			<h2>"Find an instance"</h2>
			<form on:submit=on_submit>
				<input
					type="search"
					placeholder="Search instance names and descriptions"
					aria-label="Search instance names and descriptions"
					prop:value=move || query.get()
					on:input=move |ev| query.set(event_target_value(&ev))
				/>
				{move || {
					if is_loading.get() {
						view! { <Spinner /> }.into_any()
					} else if has_query.get() || has_error.get() {
						view! {
							<button type="button" aria-label="Clear search" on:click=move |_| clear()>
								"×"
							</button>
						}
							.into_any()
					} else {
						view! {
							<button type="submit" disabled=move || query.with(String::is_empty)>
								"→"
							</button>
						}
							.into_any()
					}
				}}
			</form>
			<SearchFilters filters=filters on_change=move |_| search() />
		</div>
		{content}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn excerpts_strip_markup_and_truncate() {
		assert_eq!(excerpt("<p>Hello <b>world</b></p>"), "Hello world");
		let long = "a".repeat(EXCERPT_LEN + 10);
		let cut = excerpt(&long);
		assert_eq!(cut.chars().count(), EXCERPT_LEN + 1);
		assert!(cut.ends_with('…'));
	}
}
