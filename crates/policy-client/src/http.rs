use crate::api::PolicyApi;
use crate::config::ClientConfig;
use crate::error::PolicyClientError;
use async_trait::async_trait;
use policy_model::{Policy, PolicyId};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Error payload the backend sends with 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP implementation of [`PolicyApi`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpPolicyClient {
    client: Client,
    collection: Url,
}

impl HttpPolicyClient {
    pub fn new(config: &ClientConfig) -> Result<Self, PolicyClientError> {
        let collection = config.collection_url()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10).min(config.timeout))
            .build()
            .map_err(|e| PolicyClientError::Config {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, collection })
    }

    pub fn from_env() -> Result<Self, PolicyClientError> {
        Self::new(&ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        self.collection.as_str()
    }

    fn item_url(&self, id: PolicyId) -> Url {
        let mut url = self.collection.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }

    /// Sends one request and turns non-success statuses into errors.
    async fn execute(
        &self,
        request: RequestBuilder,
        id: Option<PolicyId>,
    ) -> Result<Response, PolicyClientError> {
        let response = request.send().await.map_err(PolicyClientError::transport)?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
            warn!(policy_id = id, "Policy not found");
            return Err(PolicyClientError::NotFound { id });
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        warn!(status = status.as_u16(), %message, "Policy service returned an error");
        Err(PolicyClientError::HttpStatus {
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, PolicyClientError> {
    let bytes = response
        .bytes()
        .await
        .map_err(PolicyClientError::transport)?;
    serde_json::from_slice(&bytes).map_err(|e| PolicyClientError::Decode {
        message: format!("Failed to parse response: {}", e),
    })
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(ErrorBody {
        message: Some(message),
    }) = serde_json::from_str::<ErrorBody>(body)
    {
        return message;
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("unknown status")
        .to_string()
}

#[async_trait]
impl PolicyApi for HttpPolicyClient {
    async fn list_policies(&self) -> Result<Vec<Policy>, PolicyClientError> {
        debug!(url = %self.collection, "Listing policies");
        let response = self
            .execute(self.client.get(self.collection.clone()), None)
            .await?;
        let policies: Vec<Policy> = decode(response).await?;
        info!(count = policies.len(), "Retrieved policies");
        Ok(policies)
    }

    async fn get_policy(&self, id: PolicyId) -> Result<Policy, PolicyClientError> {
        debug!(policy_id = id, "Fetching policy");
        let response = self
            .execute(self.client.get(self.item_url(id)), Some(id))
            .await?;
        decode(response).await
    }

    async fn create_policy(&self, policy: &Policy) -> Result<Policy, PolicyClientError> {
        debug!(policy_number = %policy.policy_number, "Creating policy");
        let response = self
            .execute(self.client.post(self.collection.clone()).json(policy), None)
            .await?;
        let created: Policy = decode(response).await?;
        info!(policy_id = created.policy_id, "Created policy");
        Ok(created)
    }

    async fn update_policy(
        &self,
        id: PolicyId,
        policy: &Policy,
    ) -> Result<Policy, PolicyClientError> {
        debug!(policy_id = id, "Updating policy");
        let response = self
            .execute(self.client.put(self.item_url(id)).json(policy), Some(id))
            .await?;
        let updated: Policy = decode(response).await?;
        info!(policy_id = id, "Updated policy");
        Ok(updated)
    }

    async fn delete_policy(&self, id: PolicyId) -> Result<(), PolicyClientError> {
        debug!(policy_id = id, "Deleting policy");
        self.execute(self.client.delete(self.item_url(id)), Some(id))
            .await?;
        info!(policy_id = id, "Deleted policy");
        Ok(())
    }
}
