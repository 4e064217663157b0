use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use super::error_state::{ErrorState, NonIdealState, Spinner};
use crate::api::{CrawlStatus, InstanceDetails};
use crate::neighbors::{Neighbor, derive_neighborhood};
use crate::store::{CurrentInstance, use_store};
use crate::util::{format_count, format_percent, strip_html};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
	Description,
	Details,
	Neighbors,
	Peers,
	Federation,
}

impl Tab {
	fn label(self) -> &'static str {
		match self {
			Self::Description => "Description",
			Self::Details => "Details",
			Self::Neighbors => "Neighbors",
			Self::Peers => "Known peers",
			Self::Federation => "Federation",
		}
	}
}

/// Tabs worth showing for these details, in display order.
fn available_tabs(details: &InstanceDetails) -> Vec<Tab> {
	let mut tabs = Vec::new();
	if details.description.as_deref().is_some_and(|d| !d.trim().is_empty()) {
		tabs.push(Tab::Description);
	}
	if details.has_stats() {
		tabs.push(Tab::Details);
	}
	tabs.push(Tab::Neighbors);
	tabs.push(Tab::Peers);
	if details
		.federation_restrictions
		.as_ref()
		.is_some_and(|r| !r.sections().is_empty())
	{
		tabs.push(Tab::Federation);
	}
	tabs
}

/// Whether `s` has the given shape, `d` standing for any ASCII digit.
fn has_shape(s: &str, shape: &str) -> bool {
	s.len() == shape.len()
		&& s.bytes().zip(shape.bytes()).all(|(c, p)| match p {
			b'd' => c.is_ascii_digit(),
			_ => c == p,
		})
}

/// `2019-07-24T12:34:56.789` as `2019-07-24 12:34 UTC`. Anything else is shown as received.
fn format_timestamp(timestamp: &str) -> String {
	let parts = (timestamp.get(..10), timestamp.get(10..11), timestamp.get(11..16));
	match parts {
		(Some(date), Some("T"), Some(time))
			if has_shape(date, "dddd-dd-dd") && has_shape(time, "dd:dd") =>
		{
			format!("{date} {time} UTC")
		}
		_ => timestamp.to_string(),
	}
}

fn or_unknown(value: Option<String>) -> String {
	value.unwrap_or_else(|| "Unknown".to_string())
}

fn domain_link(domain: String) -> impl IntoView {
	view! {
		<A href=format!("/instance/{domain}") attr:class="button minimal">
			{domain}
		</A>
	}
}

fn description_panel(details: &InstanceDetails) -> impl IntoView {
	let text = details.description.as_deref().map(strip_html);
	view! { <p class="running-text">{text}</p> }
}

fn details_panel(details: &InstanceDetails) -> impl IntoView {
	let rows = [
		("Version", or_unknown(details.version.clone())),
		("Users", or_unknown(details.user_count.map(format_count))),
		("Statuses", or_unknown(details.status_count.map(format_count))),
		("Insularity", or_unknown(details.insularity.map(format_percent))),
		("Known peers", or_unknown(details.domain_count.map(format_count))),
		(
			"Last updated",
			or_unknown(details.last_updated.as_deref().map(format_timestamp)),
		),
	];
	view! {
		<table class="striped">
			<tbody>
				{rows
					.into_iter()
					.map(|(name, value)| {
						let help = (name == "Insularity")
							.then_some(
								"The percentage of mentions that are directed toward users on the same instance.",
							);
						view! {
							<tr>
								<td title=help>{name}</td>
								<td>{value}</td>
							</tr>
						}
					})
					.collect_view()}
			</tbody>
		</table>
	}
}

fn neighbors_panel(neighbors: Vec<Neighbor>) -> impl IntoView {
	view! {
		<div>
			<p class="muted">
				"The mention ratio is the average of how many times the two instances mention each other per status. A mention ratio of 1 would mean that every single status contained a mention of a user on the other instance."
			</p>
			<table class="striped">
				<thead>
					<tr>
						<th>"Instance"</th>
						<th>"Mention ratio"</th>
					</tr>
				</thead>
				<tbody>
					{neighbors
						.into_iter()
						.map(|n| {
							view! {
								<tr>
									<td>{domain_link(n.neighbor)}</td>
									<td>{format!("{:.4}", n.weight)}</td>
								</tr>
							}
						})
						.collect_view()}
				</tbody>
			</table>
		</div>
	}
}

fn peers_panel(details: &InstanceDetails) -> impl IntoView {
	let peers = details.peers.clone().unwrap_or_default();
	view! {
		<div>
			<p class="muted">
				{format!("All the instances, past and present, that {} knows about.", details.name)}
			</p>
			<table class="striped">
				<tbody>
					{peers
						.into_iter()
						.map(|peer| view! { <tr><td>{domain_link(peer.name)}</td></tr> })
						.collect_view()}
				</tbody>
			</table>
		</div>
	}
}

fn federation_panel(details: &InstanceDetails) -> impl IntoView {
	let sections = details
		.federation_restrictions
		.as_ref()
		.map(|r| r.sections())
		.unwrap_or_default();
	sections
		.into_iter()
		.map(|(title, domains)| {
			view! {
				<h3>{title}</h3>
				<ul>
					{domains
						.into_iter()
						.map(|d| view! { <li>{domain_link(d)}</li> })
						.collect_view()}
				</ul>
			}
		})
		.collect_view()
}

#[component]
fn InstanceTabs(details: Arc<InstanceDetails>) -> impl IntoView {
	let store = use_store();
	let tabs = available_tabs(&details);
	let selected = RwSignal::new(tabs[0]);

	let name = details.name.clone();
	let neighbors = Memo::new(move |_| {
		store.with(|s| {
			s.graph
				.graph
				.value()
				.map(|g| derive_neighborhood(&g.graph.edges, &name))
		})
	});
	let is_insular = move || neighbors.with(|n| n.as_ref().is_some_and(Vec::is_empty));

	let panel = move || {
		let details = &details;
		match selected.get() {
			Tab::Description => description_panel(details).into_any(),
			Tab::Details => details_panel(details).into_any(),
			Tab::Neighbors => neighbors_panel(neighbors.get().unwrap_or_default()).into_any(),
			Tab::Peers => peers_panel(details).into_any(),
			Tab::Federation => federation_panel(details).into_any(),
		}
	};

	view! {
		<Show when=is_insular>
			<div class="callout">
				<h5>"Insular instance"</h5>
				<p>
					"This instance doesn't have any neighbors that we know of, so it's hidden from the graph."
				</p>
			</div>
		</Show>
		<div class="tabs" role="tablist">
			{tabs
				.into_iter()
				.map(|tab| {
					view! {
						<button
							role="tab"
							class:selected=move || selected.get() == tab
							on:click=move |_| selected.set(tab)
						>
							{tab.label()}
						</button>
					}
				})
				.collect_view()}
		</div>
		<div class="tab-panel">{panel}</div>
	}
}

fn crawl_status_view(details: Arc<InstanceDetails>) -> AnyView {
	match details.crawl_status() {
		CrawlStatus::Success => view! { <InstanceTabs details=details /> }.into_any(),
		CrawlStatus::PersonalInstance => view! {
			<NonIdealState
				title="No data"
				description="This instance has fewer than 10 users. It was not crawled in order to protect their privacy, but if it's your instance you can opt in."
			>
				<A href="/admin/login" attr:class="button">
					"Log in to opt in"
				</A>
			</NonIdealState>
		}
		.into_any(),
		CrawlStatus::RobotsTxt => view! {
			<NonIdealState
				title="No data"
				description="This instance was not crawled because its robots.txt did not allow us to."
			/>
		}
		.into_any(),
		CrawlStatus::Failed => view! {
			<NonIdealState
				title="No data"
				description="This instance could not be crawled. Either it was down or it's an instance type we don't support yet."
			/>
			<span class="sidebar-hidden-instance-status" style="display: none">
				{details.status.clone()}
			</span>
		}
		.into_any(),
	}
}

/// Sidebar panel for the instance at `/instance/:domain`.
#[component]
pub fn InstanceScreen() -> impl IntoView {
	let store = use_store();
	let navigate = use_navigate();
	let instance = Memo::new(move |_| store.with(|s| s.current_instance.instance.clone()));
	let name = move || instance.with(|i| i.name().map(str::to_string));

	let content = move || match instance.get() {
		CurrentInstance::Empty => view! {
			<NonIdealState
				title="No instance selected"
				description="Select an instance from the graph or the search results to see its details."
			/>
		}
		.into_any(),
		CurrentInstance::Loading { .. } => view! { <Spinner /> }.into_any(),
		CurrentInstance::Error { .. } => view! { <ErrorState /> }.into_any(),
		CurrentInstance::Loaded { details, .. } => crawl_status_view(details),
	};

	view! {
		<div class="instance-screen">
			<div class="heading">
				<h2>{name}</h2>
				{move || {
					name()
						.map(|name| {
							view! {
								<a
									href=format!("https://{name}")
									target="_blank"
									rel="noopener noreferrer"
									title="Open link in new tab"
								>
									"↗"
								</a>
							}
						})
				}}
				<button
					class="close"
					aria-label="Close"
					on:click=move |_| navigate("/", Default::default())
				>
					"×"
				</button>
			</div>
			<hr />
			{content}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::FederationRestrictions;

	#[test]
	fn tabs_follow_available_data() {
		let mut details = InstanceDetails {
			name: "a.social".into(),
			status: "success".into(),
			..Default::default()
		};
		assert_eq!(available_tabs(&details), vec![Tab::Neighbors, Tab::Peers]);

		details.description = Some("<p>hi</p>".into());
		details.user_count = Some(12);
		details.federation_restrictions = Some(FederationRestrictions {
			reject: Some(vec!["bad.example".into()]),
			..Default::default()
		});
		assert_eq!(
			available_tabs(&details),
			vec![
				Tab::Description,
				Tab::Details,
				Tab::Neighbors,
				Tab::Peers,
				Tab::Federation
			]
		);
	}

	#[test]
	fn blank_descriptions_and_empty_restrictions_get_no_tab() {
		let details = InstanceDetails {
			description: Some("   ".into()),
			federation_restrictions: Some(FederationRestrictions {
				reject: Some(vec![]),
				..Default::default()
			}),
			..Default::default()
		};
		let tabs = available_tabs(&details);
		assert!(!tabs.contains(&Tab::Description));
		assert!(!tabs.contains(&Tab::Federation));
	}

	#[test]
	fn timestamps_are_shortened() {
		assert_eq!(format_timestamp("2019-07-24T12:34:56.789"), "2019-07-24 12:34 UTC");
		assert_eq!(format_timestamp("2019-07-24T12:34"), "2019-07-24 12:34 UTC");
		assert_eq!(format_timestamp("yesterday"), "yesterday");
		// Sixteen chars but more than sixteen bytes.
		assert_eq!(format_timestamp("2019-07-24T12:3é"), "2019-07-24T12:3é");
		assert_eq!(format_timestamp("ééééééééééééééééé"), "ééééééééééééééééé");
	}
}
