use crate::error::PolicyClientError;
use async_trait::async_trait;
use policy_model::{Policy, PolicyId};

/// The five policy operations the backend exposes.
#[async_trait]
pub trait PolicyApi: Send + Sync {
    /// `GET /policies`
    async fn list_policies(&self) -> Result<Vec<Policy>, PolicyClientError>;

    /// `GET /policies/{id}`
    async fn get_policy(&self, id: PolicyId) -> Result<Policy, PolicyClientError>;

    /// `POST /policies`, returns the stored policy with its assigned id
    async fn create_policy(&self, policy: &Policy) -> Result<Policy, PolicyClientError>;

    /// `PUT /policies/{id}`
    async fn update_policy(
        &self,
        id: PolicyId,
        policy: &Policy,
    ) -> Result<Policy, PolicyClientError>;

    /// `DELETE /policies/{id}`
    async fn delete_policy(&self, id: PolicyId) -> Result<(), PolicyClientError>;
}
