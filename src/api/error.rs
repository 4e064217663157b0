use thiserror::Error;

/// Everything that can go wrong between issuing a request and holding a typed response.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
	#[error("network error: {0}")]
	Network(String),
	#[error("HTTP {status}: {text}")]
	Status { status: u16, text: String },
	#[error("could not decode response: {0}")]
	Decode(String),
	/// The backend answered, but with an `error` payload.
	#[error("{0}")]
	Backend(String),
}

impl From<gloo_net::Error> for ApiError {
	fn from(err: gloo_net::Error) -> Self {
		match err {
			gloo_net::Error::SerdeError(e) => Self::Decode(e.to_string()),
			other => Self::Network(other.to_string()),
		}
	}
}

impl From<serde_json::Error> for ApiError {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode(err.to_string())
	}
}
