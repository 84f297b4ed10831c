use policy_model::PolicyId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyClientError {
    #[error("Policy service request failed: {message}")]
    Transport { message: String },

    #[error("Insurance Policy not found: {id}")]
    NotFound { id: PolicyId },

    #[error("Policy service returned {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Invalid policy service response: {message}")]
    Decode { message: String },

    #[error("Policy client configuration error: {message}")]
    Config { message: String },
}

impl PolicyClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PolicyClientError::NotFound { .. })
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            format!("HTTP request failed: {}", err)
        };
        PolicyClientError::Transport { message }
    }
}
