use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::error_state::{ErrorState, Spinner};
use crate::api::{InstanceSort, SortDirection, SortField};
use crate::pagination::{PageItem, get_pages_to_display, next_sort, page_items, showing_range};
use crate::store::use_store;
use crate::util::{capitalize, format_count, format_percent};

fn sort_indicator(sort: InstanceSort, field: SortField) -> &'static str {
	if sort.field != field {
		"↕"
	} else if sort.direction == SortDirection::Asc {
		"↑"
	} else {
		"↓"
	}
}

#[component]
fn SortableHeader(label: &'static str, field: SortField) -> impl IntoView {
	let store = use_store();
	let sort = Memo::new(move |_| store.with(|s| s.instance_list.sort));
	let sort = move || sort.get();

	view! {
		<th>
			{label}
			<button
				class="minimal"
				class:active=move || sort().field == field
				on:click=move |_| {
					store.load_instance_list(None, Some(next_sort(sort(), field)));
				}
			>
				{move || sort_indicator(sort(), field)}
			</button>
		</th>
	}
}

#[component]
fn Pagination() -> impl IntoView {
	let store = use_store();
	let response = Memo::new(move |_| store.with(|s| s.instance_list.response.clone()));

	move || {
		let response = response.get()?;
		let (first, last) = showing_range(&response);
		let current = response.page_number;
		let pages = get_pages_to_display(response.total_pages, current);
		let buttons = page_items(&pages, current, response.total_pages)
			.into_iter()
			.map(|item| match item {
				PageItem::Page { number, current } => view! {
					<button
						class:primary=current
						disabled=current
						on:click=move |_| store.load_instance_list(Some(number), None)
					>
						{number}
					</button>
				}
				.into_any(),
				PageItem::Ellipsis => view! { <button disabled=true>"..."</button> }.into_any(),
			})
			.collect_view();

		Some(view! {
			<div class="pagination">
				<p>
					{format!(
						"Showing {first}-{last} of {} known active instances",
						response.total_entries,
					)}
				</p>
				<div class="button-group">{buttons}</div>
			</div>
		})
	}
}

/// Sortable, paginated table of every known instance.
#[component]
pub fn InstanceTable() -> impl IntoView {
	let store = use_store();
	let navigate = use_navigate();

	let needs_load = store.with_untracked(|s| {
		let list = &s.instance_list;
		!list.is_loading && list.response.is_none() && !list.error
	});
	if needs_load {
		store.load_instance_list(None, None);
	}

	let response = Memo::new(move |_| store.with(|s| s.instance_list.response.clone()));
	let rows = move || {
		let response = response.get()?;
		let navigate = navigate.clone();
		Some(
			response
				.instances
				.iter()
				.map(|i| {
					let (name, navigate) = (i.name.clone(), navigate.clone());
					view! {
						<tr on:click=move |_| navigate(&format!("/instance/{name}"), Default::default())>
							<td>{i.name.clone()}</td>
							<td>{i.instance_type.map(|t| capitalize(t.as_str()))}</td>
							<td>{i.version.clone().map(|v| view! { <code>{v}</code> })}</td>
							<td>{i.user_count.map(format_count)}</td>
							<td>{i.status_count.map(format_count)}</td>
							<td>{i.insularity.map(format_percent)}</td>
						</tr>
					}
				})
				.collect_view(),
		)
	};

	let status = Memo::new(move |_| {
		store.with(|s| {
			let list = &s.instance_list;
			(list.error, list.is_loading || list.response.is_none())
		})
	});
	move || {
		let (error, loading) = status.get();
		if error {
			return view! { <ErrorState /> }.into_any();
		}
		if loading {
			return view! { <Spinner /> }.into_any();
		}
		view! {
			<table class="striped bordered interactive instance-table">
				<thead>
					<tr>
						<SortableHeader label="Instance" field=SortField::Domain />
						<th>"Server type"</th>
						<th>"Version"</th>
						<SortableHeader label="Users" field=SortField::UserCount />
						<SortableHeader label="Statuses" field=SortField::StatusCount />
						<SortableHeader label="Insularity" field=SortField::Insularity />
					</tr>
				</thead>
				<tbody>{rows.clone()}</tbody>
			</table>
			<Pagination />
		}
		.into_any()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn indicator_marks_the_sorted_column() {
		let sort = InstanceSort {
			field: SortField::Insularity,
			direction: SortDirection::Asc,
		};
		assert_eq!(sort_indicator(sort, SortField::Insularity), "↑");
		assert_eq!(sort_indicator(sort, SortField::Domain), "↕");
		let desc = InstanceSort::default();
		assert_eq!(sort_indicator(desc, SortField::UserCount), "↓");
	}
}
