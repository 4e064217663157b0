//! Backend API: response shapes and the fetch client.

mod client;
mod error;
mod types;

pub use client::{ApiClient, normalize_domain};
pub use error::ApiError;
pub use types::*;
