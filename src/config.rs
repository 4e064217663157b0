//! Build-time configuration and visual constants.

/// Screen widths below this are treated as mobile.
pub const DESKTOP_WIDTH_THRESHOLD: f64 = 1000.0;

pub const DEFAULT_NODE_COLOR: &str = "#CED9E0";
pub const SELECTED_NODE_COLOR: &str = "#48AFF0";
pub const SEARCH_RESULT_COLOR: &str = "#FFC940";
pub const BACKGROUND_COLOR: &str = "#293742";

/// Categorical palette. A qualitative scheme can color at most this many values.
pub const QUALITATIVE_COLOR_SCHEME: &[&str] = &[
	"#2965CC", "#29A634", "#D99E0B", "#D13913", "#8F398F", "#00B3A4", "#DB2C6F", "#9BBF30",
	"#96622D", "#7157D9", "#669EFF", "#C274C2", "#D1F26D",
];

/// Sequential palette, light to dark. Its length is the bucket count.
pub const QUANTITATIVE_COLOR_SCHEME: &[&str] = &[
	"#FFE39F", "#FFC940", "#F29D49", "#D9822B", "#DB3737", "#C23030", "#A82A2A",
];

pub const INSTANCE_DOMAIN_PATH_PREFIX: &str = "/instance/";

/// Session storage key holding the admin token.
pub const AUTH_TOKEN_KEY: &str = "adminToken";

const DEV_API_ROOT: &str = "http://localhost:4000/api/";
const PROD_API_ROOT: &str = "https://api.fediverse.space/api/";

/// Where the backend lives. Provided to the component tree as context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
	pub root: String,
}

impl ApiConfig {
	/// `FEDIVERSE_API_ROOT` at compile time, else a per-profile default.
	pub fn from_env() -> Self {
		let root = option_env!("FEDIVERSE_API_ROOT").unwrap_or(if cfg!(debug_assertions) {
			DEV_API_ROOT
		} else {
			PROD_API_ROOT
		});
		Self::new(root)
	}

	pub fn new(root: &str) -> Self {
		let root = if root.ends_with('/') {
			root.to_string()
		} else {
			format!("{root}/")
		};
		Self { root }
	}

	/// Joins an API path onto the root.
	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.root, path.trim_start_matches('/'))
	}
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self::from_env()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn root_always_ends_with_a_slash() {
		assert_eq!(ApiConfig::new("https://example.com/api").root, "https://example.com/api/");
		assert_eq!(ApiConfig::new("https://example.com/api/").root, "https://example.com/api/");
	}

	#[test]
	fn url_joins_without_doubling_slashes() {
		let config = ApiConfig::new("https://example.com/api/");
		assert_eq!(config.url("/graph"), "https://example.com/api/graph");
		assert_eq!(config.url("instances/a.b"), "https://example.com/api/instances/a.b");
	}
}
