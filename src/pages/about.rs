use leptos::prelude::*;

#[component]
fn ExternalLink(href: &'static str, children: Children) -> impl IntoView {
	view! {
		<a href=href target="_blank" rel="noopener noreferrer">
			{children()}
		</a>
	}
}

#[component]
pub fn AboutPage() -> impl IntoView {
	view! {
		<div class="page">
			<h1>"About"</h1>
			<p class="running-text">
				"fediverse.space is a tool to visualize networks and communities on the "
				<ExternalLink href="https://en.wikipedia.org/wiki/Fediverse">"fediverse"</ExternalLink>
				". It works by crawling every instance it can find and aggregating statistics on communication between these."
			</p>
			<p>
				"You can follow the project on "
				<ExternalLink href="https://mastodon.social/@fediversespace">"Mastodon"</ExternalLink>
				"."
			</p>

			<h2>"FAQ"</h2>
			<h3>"Why can't I see details about my instance?"</h3>
			<p class="running-text">
				"fediverse.space only supports servers using the Mastodon API, the Misskey API, the GNU Social API, or Nodeinfo. Instances with 10 or fewer users won't be crawled; it's a tool for understanding communities, not individuals."
			</p>
			<h3>"How do I add my personal instance?"</h3>
			<p class="running-text">
				"Click on the Administration link in the top right to opt in."
			</p>
			<h3>"How do you calculate the strength of relationships between instances?"</h3>
			<p class="running-text">
				"fediverse.space looks at public statuses from within the last month on the public timeline of each instance. It calculates the ratio of "
				<code>"mentions of an instance / total statuses"</code>
				". It uses a ratio rather than an absolute number of mentions to reflect that smaller instances can play a large role in a community."
			</p>

			<h2>"Inspiration"</h2>
			<ul>
				<li>
					<ExternalLink href="https://the-federation.info/">"the-federation.info"</ExternalLink>
				</li>
				<li>
					<ExternalLink href="http://fediverse.network/">"fediverse.network"</ExternalLink>
				</li>
				<li>
					<ExternalLink href="https://lucahammer.at/vis/fediverse/2018-08-30-mastoverse_hashtags/">
						"Mastodon hashtag network"
					</ExternalLink>
				</li>
			</ul>
		</div>
	}
}
