use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Server software an instance runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceType {
	Mastodon,
	Pleroma,
	Misskey,
	Gab,
	Pixelfed,
	Gnusocial,
	Writefreely,
	Peertube,
	Friendica,
	Hubzilla,
	Plume,
	Wordpress,
	Smithereen,
	/// Anything the backend knows about that this build doesn't.
	#[serde(other)]
	Other,
}

impl InstanceType {
	pub const ALL: [InstanceType; 13] = [
		Self::Mastodon,
		Self::Pleroma,
		Self::Misskey,
		Self::Gab,
		Self::Pixelfed,
		Self::Gnusocial,
		Self::Writefreely,
		Self::Peertube,
		Self::Friendica,
		Self::Hubzilla,
		Self::Plume,
		Self::Wordpress,
		Self::Smithereen,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Mastodon => "mastodon",
			Self::Pleroma => "pleroma",
			Self::Misskey => "misskey",
			Self::Gab => "gab",
			Self::Pixelfed => "pixelfed",
			Self::Gnusocial => "gnusocial",
			Self::Writefreely => "writefreely",
			Self::Peertube => "peertube",
			Self::Friendica => "friendica",
			Self::Hubzilla => "hubzilla",
			Self::Plume => "plume",
			Self::Wordpress => "wordpress",
			Self::Smithereen => "smithereen",
			Self::Other => "other",
		}
	}
}

impl fmt::Display for InstanceType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNodeData {
	pub id: String,
	pub label: String,
	/// log10 of the user count.
	pub size: f64,
	#[serde(rename = "type", default)]
	pub instance_type: Option<InstanceType>,
	#[serde(default)]
	pub insularity: Option<f64>,
	#[serde(default)]
	pub statuses_per_day: Option<f64>,
	#[serde(default)]
	pub statuses_per_user_per_day: Option<f64>,
}

impl GraphNodeData {
	/// Categorical value used by qualitative color schemes.
	pub fn qualitative_value(&self, key: &str) -> Option<&'static str> {
		match key {
			"type" => self.instance_type.map(InstanceType::as_str),
			_ => None,
		}
	}

	/// Numeric value used by quantitative color schemes.
	pub fn quantitative_value(&self, key: &str) -> Option<f64> {
		match key {
			"insularity" => self.insularity,
			"statusesPerDay" => self.statuses_per_day,
			"statusesPerUserPerDay" => self.statuses_per_user_per_day,
			_ => None,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	pub data: GraphNodeData,
	#[serde(default)]
	pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdgeData {
	#[serde(default)]
	pub id: Option<String>,
	pub source: String,
	pub target: String,
	/// Mention ratio between the two instances.
	pub weight: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
	pub data: GraphEdgeData,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphMetadata {
	/// `[min, max]` of each quantitative field across the whole graph.
	#[serde(default)]
	pub ranges: BTreeMap<String, [f64; 2]>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphResponse {
	pub graph: Graph,
	#[serde(default)]
	pub metadata: GraphMetadata,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Peer {
	pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FederationRestrictions {
	pub reject: Option<Vec<String>>,
	pub accept: Option<Vec<String>>,
	pub media_removal: Option<Vec<String>>,
	pub media_nsfw: Option<Vec<String>>,
	pub report_removal: Option<Vec<String>>,
	pub federated_timeline_removal: Option<Vec<String>>,
	pub banner_removal: Option<Vec<String>>,
	pub avatar_removal: Option<Vec<String>>,
}

impl FederationRestrictions {
	/// Non-empty restriction lists with their headings, domains sorted.
	pub fn sections(&self) -> Vec<(&'static str, Vec<String>)> {
		[
			("Blocked instances", &self.reject),
			("Reports ignored", &self.report_removal),
			("Media removed", &self.media_removal),
			("Media marked as NSFW", &self.media_nsfw),
			("Hidden from federated timeline", &self.federated_timeline_removal),
			("Banners removed", &self.banner_removal),
			("Avatars removed", &self.avatar_removal),
			("Whitelisted", &self.accept),
		]
		.into_iter()
		.filter_map(|(title, domains)| {
			let mut domains = domains.clone().filter(|d| !d.is_empty())?;
			domains.sort();
			Some((title, domains))
		})
		.collect()
	}
}

/// How the crawler fared with an instance, parsed from the free-form `status` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrawlStatus {
	Success,
	PersonalInstance,
	RobotsTxt,
	Failed,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstanceDetails {
	pub name: String,
	pub description: Option<String>,
	pub version: Option<String>,
	pub user_count: Option<u64>,
	pub status_count: Option<u64>,
	pub domain_count: Option<u64>,
	pub insularity: Option<f64>,
	pub statuses_per_day: Option<f64>,
	pub peers: Option<Vec<Peer>>,
	pub last_updated: Option<String>,
	pub status: String,
	#[serde(rename = "type")]
	pub instance_type: Option<InstanceType>,
	pub federation_restrictions: Option<FederationRestrictions>,
}

impl InstanceDetails {
	pub fn crawl_status(&self) -> CrawlStatus {
		let status = self.status.to_lowercase();
		if status.contains("personal instance") {
			CrawlStatus::PersonalInstance
		} else if status.contains("robots.txt") {
			CrawlStatus::RobotsTxt
		} else if status == "success" {
			CrawlStatus::Success
		} else {
			CrawlStatus::Failed
		}
	}

	pub fn has_stats(&self) -> bool {
		self.version.is_some()
			|| self.user_count.is_some()
			|| self.status_count.is_some()
			|| self.domain_count.is_some()
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
	Domain,
	#[default]
	UserCount,
	StatusCount,
	Insularity,
}

impl SortField {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Domain => "domain",
			Self::UserCount => "userCount",
			Self::StatusCount => "statusCount",
			Self::Insularity => "insularity",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	Asc,
	#[default]
	Desc,
}

impl SortDirection {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceSort {
	pub field: SortField,
	pub direction: SortDirection,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceListResponse {
	pub page_number: u32,
	pub total_pages: u32,
	pub total_entries: u32,
	pub page_size: u32,
	pub instances: Vec<InstanceDetails>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultInstance {
	pub name: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub user_count: Option<u64>,
	#[serde(rename = "type", default)]
	pub instance_type: Option<InstanceType>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
	pub results: Vec<SearchResultInstance>,
	#[serde(default)]
	pub next: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettings {
	pub domain: String,
	#[serde(default)]
	pub opt_in: bool,
	#[serde(default)]
	pub opt_out: bool,
	#[serde(default)]
	pub user_count: u64,
	#[serde(default)]
	pub status_count: Option<u64>,
}

impl AdminSettings {
	/// Opting in and opting out are mutually exclusive.
	pub fn with_opt_in(self, opt_in: bool) -> Self {
		Self {
			opt_in,
			opt_out: self.opt_out && !opt_in,
			..self
		}
	}

	pub fn with_opt_out(self, opt_out: bool) -> Self {
		Self {
			opt_out,
			opt_in: self.opt_in && !opt_out,
			..self
		}
	}

	/// Only personal instances need to opt in to being crawled.
	pub fn can_opt_in(&self) -> bool {
		self.user_count < 10
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettingsUpdate {
	pub opt_in: bool,
	pub opt_out: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginTypes {
	pub domain: String,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub fediverse_account: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoginType {
	Email,
	FediverseAccount,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginRequest {
	pub domain: String,
	#[serde(rename = "type")]
	pub login_type: LoginType,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_a_graph_response() {
		let json = r#"{
			"graph": {
				"nodes": [
					{"data": {"id": "a.social", "label": "a.social", "size": 3.2, "type": "mastodon", "statusesPerDay": 12.5},
					 "position": {"x": 10.0, "y": -4.0}},
					{"data": {"id": "b.social", "label": "b.social", "size": 1.0, "type": "someday-software"}}
				],
				"edges": [{"data": {"id": "e1", "source": "a.social", "target": "b.social", "weight": 0.25}}]
			},
			"metadata": {"ranges": {"statusesPerDay": [0.0, 500.0]}}
		}"#;
		let response: GraphResponse = serde_json::from_str(json).unwrap();

		assert_eq!(response.graph.nodes.len(), 2);
		let a = &response.graph.nodes[0];
		assert_eq!(a.data.instance_type, Some(InstanceType::Mastodon));
		assert_eq!(a.position, Position { x: 10.0, y: -4.0 });
		assert_eq!(a.data.quantitative_value("statusesPerDay"), Some(12.5));
		assert_eq!(a.data.qualitative_value("type"), Some("mastodon"));
		assert_eq!(response.graph.nodes[1].data.instance_type, Some(InstanceType::Other));
		assert_eq!(response.graph.edges[0].data.weight, 0.25);
		assert_eq!(response.metadata.ranges["statusesPerDay"], [0.0, 500.0]);
	}

	#[test]
	fn crawl_status_is_parsed_case_insensitively() {
		let with_status = |status: &str| InstanceDetails {
			status: status.into(),
			..Default::default()
		};
		assert_eq!(with_status("success").crawl_status(), CrawlStatus::Success);
		assert_eq!(
			with_status("Personal instance").crawl_status(),
			CrawlStatus::PersonalInstance
		);
		assert_eq!(
			with_status("Robots.txt disallows crawling").crawl_status(),
			CrawlStatus::RobotsTxt
		);
		assert_eq!(with_status("timeout").crawl_status(), CrawlStatus::Failed);
	}

	#[test]
	fn decodes_instance_details_with_missing_fields() {
		let json = r#"{"name": "c.town", "status": "success", "userCount": 42,
			"peers": [{"name": "a.social"}],
			"federationRestrictions": {"reject": ["z.bad", "b.bad"], "accept": []}}"#;
		let details: InstanceDetails = serde_json::from_str(json).unwrap();

		assert_eq!(details.user_count, Some(42));
		assert!(details.has_stats());
		assert_eq!(details.peers.as_deref().map(<[Peer]>::len), Some(1));
		let sections = details.federation_restrictions.unwrap().sections();
		assert_eq!(
			sections,
			vec![("Blocked instances", vec!["b.bad".to_string(), "z.bad".to_string()])]
		);
	}

	#[test]
	fn opting_in_and_out_are_mutually_exclusive() {
		let settings = AdminSettings {
			domain: "tiny.place".into(),
			opt_in: false,
			opt_out: true,
			user_count: 3,
			status_count: None,
		};
		let opted_in = settings.clone().with_opt_in(true);
		assert!(opted_in.opt_in && !opted_in.opt_out);

		let opted_out = opted_in.with_opt_out(true);
		assert!(opted_out.opt_out && !opted_out.opt_in);
		assert!(settings.can_opt_in());
	}

	#[test]
	fn login_request_uses_backend_field_names() {
		let request = LoginRequest {
			domain: "a.social".into(),
			login_type: LoginType::FediverseAccount,
		};
		assert_eq!(
			serde_json::to_string(&request).unwrap(),
			r#"{"domain":"a.social","type":"fediverseAccount"}"#
		);
	}
}
