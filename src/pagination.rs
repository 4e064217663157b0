//! Page-button window and sort toggling for the instance table.

use crate::api::{InstanceListResponse, InstanceSort, SortDirection, SortField};

/// Fewer pages than this are all shown.
const FULL_LIST_THRESHOLD: u32 = 10;

/// Page numbers to render as buttons, ascending and unique.
///
/// Long lists show the first two pages, the pages around `current_page`,
/// and the last two pages.
pub fn get_pages_to_display(total_pages: u32, current_page: u32) -> Vec<u32> {
	if total_pages < FULL_LIST_THRESHOLD {
		return (1..=total_pages).collect();
	}

	let first_pages = 1..3;
	let surrounding = current_page.saturating_sub(1).max(1)..current_page.saturating_add(2).min(total_pages);
	let last_pages = total_pages - 1..=total_pages;

	let mut pages: Vec<u32> = first_pages.chain(surrounding).chain(last_pages).collect();
	pages.sort_unstable();
	pages.dedup();
	pages
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
	Page { number: u32, current: bool },
	/// Disabled placeholder between non-adjacent pages.
	Ellipsis,
}

pub fn page_items(pages: &[u32], current_page: u32, total_pages: u32) -> Vec<PageItem> {
	let mut items = Vec::with_capacity(pages.len() * 2);
	for (i, &page) in pages.iter().enumerate() {
		items.push(PageItem::Page {
			number: page,
			current: page == current_page,
		});
		if let Some(&next) = pages.get(i + 1) {
			if next - page > 1 && page != total_pages {
				items.push(PageItem::Ellipsis);
			}
		}
	}
	items
}

/// Clicking a column header: a descending column flips to ascending, anything else sorts descending.
pub fn next_sort(current: InstanceSort, field: SortField) -> InstanceSort {
	let direction = if current.field == field && current.direction == SortDirection::Desc {
		SortDirection::Asc
	} else {
		SortDirection::Desc
	};
	InstanceSort { field, direction }
}

/// First and last 1-based entry numbers on the current page.
pub fn showing_range(response: &InstanceListResponse) -> (u32, u32) {
	let first = response.page_number.saturating_sub(1) * response.page_size + 1;
	let last = (response.page_number * response.page_size).min(response.total_entries);
	(first, last)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_lists_show_every_page() {
		assert_eq!(get_pages_to_display(5, 3), vec![1, 2, 3, 4, 5]);
		assert_eq!(get_pages_to_display(9, 9), (1..=9).collect::<Vec<_>>());
		assert!(get_pages_to_display(0, 1).is_empty());
	}

	#[test]
	fn long_lists_show_ends_and_window() {
		assert_eq!(get_pages_to_display(20, 10), vec![1, 2, 9, 10, 11, 19, 20]);
	}

	#[test]
	fn window_at_the_edges_stays_in_range() {
		assert_eq!(get_pages_to_display(20, 1), vec![1, 2, 19, 20]);
		assert_eq!(get_pages_to_display(20, 2), vec![1, 2, 3, 19, 20]);
		assert_eq!(get_pages_to_display(20, 20), vec![1, 2, 19, 20]);
		assert_eq!(get_pages_to_display(10, 5), vec![1, 2, 4, 5, 6, 9, 10]);
	}

	#[test]
	fn ellipses_fill_gaps() {
		let pages = get_pages_to_display(20, 10);
		let items = page_items(&pages, 10, 20);
		let rendered: Vec<String> = items
			.iter()
			.map(|item| match item {
				PageItem::Page {
					number,
					current: true,
				} => format!("[{number}]"),
				PageItem::Page { number, .. } => number.to_string(),
				PageItem::Ellipsis => "...".into(),
			})
			.collect();
		assert_eq!(rendered, ["1", "2", "...", "9", "[10]", "11", "...", "19", "20"]);
	}

	#[test]
	fn no_ellipsis_between_adjacent_pages() {
		let items = page_items(&[1, 2, 3], 1, 3);
		assert!(!items.contains(&PageItem::Ellipsis));
	}

	#[test]
	fn sort_toggles_direction_on_the_same_column() {
		let by_users = InstanceSort::default();
		assert_eq!(by_users.direction, SortDirection::Desc);

		let flipped = next_sort(by_users, SortField::UserCount);
		assert_eq!(flipped.direction, SortDirection::Asc);
		assert_eq!(next_sort(flipped, SortField::UserCount).direction, SortDirection::Desc);

		let other = next_sort(flipped, SortField::Domain);
		assert_eq!(
			other,
			InstanceSort {
				field: SortField::Domain,
				direction: SortDirection::Desc
			}
		);
	}

	#[test]
	fn showing_range_clamps_to_total() {
		let response = InstanceListResponse {
			page_number: 3,
			total_pages: 3,
			total_entries: 45,
			page_size: 20,
			instances: Vec::new(),
		};
		assert_eq!(showing_range(&response), (41, 45));
		let first = InstanceListResponse {
			page_number: 1,
			..response
		};
		assert_eq!(showing_range(&first), (1, 20));
	}
}
