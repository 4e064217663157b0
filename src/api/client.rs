use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::types::*;
use crate::config::ApiConfig;
use crate::search_filters::SearchFilter;

/// Header carrying the admin session token.
const TOKEN_HEADER: &str = "token";

/// Thin JSON client over the backend API.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
	config: ApiConfig,
}

impl ApiClient {
	pub fn new(config: ApiConfig) -> Self {
		Self { config }
	}

	pub async fn get<T: DeserializeOwned>(
		&self,
		path: &str,
		token: Option<&str>,
	) -> Result<T, ApiError> {
		let request = with_token(Request::get(&self.config.url(path)), token);
		read_json(request.send().await?).await
	}

	/// GET with query parameters, encoded by the browser's `URLSearchParams`.
	pub async fn get_with_query<T: DeserializeOwned>(
		&self,
		path: &str,
		params: &[(String, String)],
	) -> Result<T, ApiError> {
		let request = Request::get(&self.config.url(path))
			.query(params.iter().map(|(key, value)| (key.as_str(), value)));
		read_json(request.send().await?).await
	}

	pub async fn post<B: Serialize, T: DeserializeOwned>(
		&self,
		path: &str,
		body: &B,
		token: Option<&str>,
	) -> Result<T, ApiError> {
		let request = with_token(Request::post(&self.config.url(path)), token).json(body)?;
		read_json(request.send().await?).await
	}

	pub async fn graph(&self, domain: Option<&str>) -> Result<GraphResponse, ApiError> {
		let path = match domain {
			Some(domain) => format!("graph/{domain}"),
			None => "graph".to_string(),
		};
		self.get(&path, None).await
	}

	pub async fn instance(&self, domain: &str) -> Result<InstanceDetails, ApiError> {
		self.get(&format!("instances/{domain}"), None).await
	}

	pub async fn instance_list(
		&self,
		page: u32,
		sort: InstanceSort,
	) -> Result<InstanceListResponse, ApiError> {
		self.get_with_query("instances", &instance_list_params(page, sort))
			.await
	}

	pub async fn search(
		&self,
		query: &str,
		filters: &[SearchFilter],
		after: Option<&str>,
	) -> Result<SearchResponse, ApiError> {
		self.get_with_query("search/", &search_params(query, filters, after))
			.await
	}

	pub async fn admin_settings(&self, token: &str) -> Result<AdminSettings, ApiError> {
		self.get("admin", Some(token)).await
	}

	pub async fn update_admin_settings(
		&self,
		token: &str,
		update: AdminSettingsUpdate,
	) -> Result<AdminSettings, ApiError> {
		self.post("admin", &update, Some(token)).await
	}

	pub async fn login_types(&self, domain: &str) -> Result<LoginTypes, ApiError> {
		self.get(&format!("admin/login/{}", normalize_domain(domain)), None)
			.await
	}

	pub async fn request_login(&self, request: &LoginRequest) -> Result<Value, ApiError> {
		self.post("admin/login", request, None).await
	}
}

fn with_token(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
	match token {
		Some(token) => request.header(TOKEN_HEADER, token),
		None => request,
	}
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
	if !response.ok() {
		return Err(ApiError::Status {
			status: response.status(),
			text: response.status_text(),
		});
	}
	decode(response.json::<Value>().await?)
}

/// Turns a JSON body into `T`, surfacing backend `error`/`errors` payloads as errors.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
	if let Some(message) = body.get("error") {
		let message = message
			.as_str()
			.map(str::to_string)
			.unwrap_or_else(|| message.to_string());
		return Err(ApiError::Backend(message));
	}
	if let Some(errors) = body.get("errors") {
		return Err(ApiError::Backend(errors.to_string()));
	}
	Ok(serde_json::from_value(body)?)
}

/// Strips a leading `https://` and surrounding whitespace from user input.
pub fn normalize_domain(input: &str) -> &str {
	let input = input.trim();
	input.strip_prefix("https://").unwrap_or(input).trim()
}

pub fn instance_list_params(page: u32, sort: InstanceSort) -> Vec<(String, String)> {
	vec![
		("page".into(), page.to_string()),
		("sortField".into(), sort.field.as_str().into()),
		("sortDirection".into(), sort.direction.as_str().into()),
	]
}

/// `query`, then `after` when paging, then one `field_relation=value` pair per filter.
pub fn search_params(
	query: &str,
	filters: &[SearchFilter],
	after: Option<&str>,
) -> Vec<(String, String)> {
	let mut params = vec![("query".to_string(), query.to_string())];
	if let Some(after) = after.filter(|a| !a.is_empty()) {
		params.push(("after".into(), after.into()));
	}
	params.extend(filters.iter().map(|f| (f.query_key(), f.value.clone())));
	params
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::search_filters::{Relation, SearchField};

	fn pairs(params: &[(String, String)]) -> Vec<(&str, &str)> {
		params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
	}

	#[test]
	fn builds_instance_list_params() {
		let sort = InstanceSort {
			field: SortField::Insularity,
			direction: SortDirection::Asc,
		};
		assert_eq!(
			pairs(&instance_list_params(3, sort)),
			[("page", "3"), ("sortField", "insularity"), ("sortDirection", "asc")]
		);
	}

	#[test]
	fn search_params_keep_raw_values_for_the_encoder() {
		let filters = [
			SearchFilter::new(SearchField::Type, Relation::Eq, "pleroma"),
			SearchFilter::new(SearchField::UserCount, Relation::Gte, "1 000&x"),
		];
		assert_eq!(
			pairs(&search_params("cats & dogs", &filters, Some("abc"))),
			[
				("query", "cats & dogs"),
				("after", "abc"),
				("type_eq", "pleroma"),
				("user_count_gte", "1 000&x"),
			]
		);
		assert_eq!(pairs(&search_params("", &[], Some(""))), [("query", "")]);
	}

	#[test]
	fn decode_surfaces_backend_errors() {
		let err = decode::<LoginTypes>(json!({"error": "Instance not found"})).unwrap_err();
		assert_eq!(err, ApiError::Backend("Instance not found".into()));
		assert!(matches!(
			decode::<Value>(json!({"errors": {"domain": ["is invalid"]}})),
			Err(ApiError::Backend(_))
		));
	}

	#[test]
	fn decode_reports_shape_mismatches() {
		assert!(matches!(
			decode::<LoginTypes>(json!({"email": 3})),
			Err(ApiError::Decode(_))
		));
		let types: LoginTypes = decode(json!({"domain": "a.social", "email": "admin@a.social"})).unwrap();
		assert_eq!(types.fediverse_account, None);
	}

	#[test]
	fn normalizes_login_domains() {
		assert_eq!(normalize_domain("  https://mastodon.social "), "mastodon.social");
		assert_eq!(normalize_domain("pleroma.site"), "pleroma.site");
	}
}
