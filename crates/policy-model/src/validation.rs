use crate::policy::Policy;
use thiserror::Error;

/// Problems detectable locally, before a request leaves the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} is invalid: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
}

impl Policy {
    /// Field-presence check. Reports the first blank required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("policyNumber", &self.policy_number)?;
        require("policyType", &self.policy_type)?;
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(())
}
