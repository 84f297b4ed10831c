//! Policy access client - translates policy CRUD operations into REST calls
//!
//! Every operation issues exactly one HTTP request against the configured
//! base URL and resolves once. Failures are returned unchanged to the caller;
//! nothing is retried.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::PolicyApi;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::PolicyClientError;
pub use http::HttpPolicyClient;
