use crate::error::PolicyClientError;
use reqwest::Url;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8081/insurancepolicy/api/policies";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the policy backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `POLICY_API_URL` and `POLICY_API_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let base_url = lookup("POLICY_API_URL").unwrap_or(defaults.base_url);
        let timeout = lookup("POLICY_API_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        Self { base_url, timeout }
    }

    /// Collection URL without a trailing slash.
    pub(crate) fn collection_url(&self) -> Result<Url, PolicyClientError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|e| PolicyClientError::Config {
            message: format!("Invalid policy API URL '{}': {}", self.base_url, e),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(PolicyClientError::Config {
                message: format!(
                    "Invalid policy API URL scheme '{}'. Must be http or https",
                    other
                ),
            }),
        }
    }
}
