//! Policy management view state
//!
//! Owns the working list of policies and the policy bound to the edit form.
//! Each action issues at most one backend call and applies the server's
//! answer to local state only when the call succeeds. Failures leave state
//! untouched and are kept in `last_error` for the page to show.

use policy_client::{PolicyApi, PolicyClientError};
use policy_model::{Policy, PolicyId, ValidationError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Client(#[from] PolicyClientError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Insurance Policy not found: {id}")]
    NotFound { id: PolicyId },

    #[error("Another policy action is still in progress")]
    Busy,
}

pub struct PolicyManagement {
    api: Arc<dyn PolicyApi>,
    policies: Vec<Policy>,
    selected_policy: Policy,
    last_error: Option<String>,
}

impl PolicyManagement {
    pub fn new(api: Arc<dyn PolicyApi>) -> Self {
        Self {
            api,
            policies: Vec::new(),
            selected_policy: Self::create_empty_policy(),
            last_error: None,
        }
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn selected_policy(&self) -> &Policy {
        &self.selected_policy
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replaces `policies` with the backend's full list.
    pub async fn load_policies(&mut self) -> Result<(), ViewError> {
        let result = self.api.list_policies().await.map_err(ViewError::from);
        let policies = self.settle("load", result)?;
        info!(count = policies.len(), "Loaded policies");
        self.policies = policies;
        Ok(())
    }

    /// Creates the selected draft and appends the stored policy.
    pub async fn add_policy(&mut self) -> Result<PolicyId, ViewError> {
        let result = match self.selected_policy.validate() {
            Ok(()) => self
                .api
                .create_policy(&self.selected_policy)
                .await
                .map_err(ViewError::from),
            Err(e) => Err(e.into()),
        };
        let created = self.settle("add", result)?;
        let id = created.policy_id;
        info!(policy_id = id, "Added policy");
        self.policies.push(created);
        self.selected_policy = Self::create_empty_policy();
        Ok(id)
    }

    /// Copies the listed policy with `id` into the edit form.
    pub fn show_update_form(&mut self, id: PolicyId) -> Result<(), ViewError> {
        let result = self
            .find(id)
            .cloned()
            .ok_or(ViewError::NotFound { id });
        let policy = self.settle("show update form", result)?;
        self.selected_policy = policy;
        Ok(())
    }

    /// Sends the selected policy as a full update and swaps in the stored result.
    pub async fn update_policy(&mut self) -> Result<(), ViewError> {
        let id = self.selected_policy.policy_id;
        let result = match self.check_updatable() {
            Ok(()) => self
                .api
                .update_policy(id, &self.selected_policy)
                .await
                .map_err(ViewError::from),
            Err(e) => Err(e),
        };
        let updated = self.settle("update", result)?;

        // An id missing from a stale list is added so the stored copy shows.
        match self.policies.iter_mut().find(|p| p.policy_id == id) {
            Some(entry) => *entry = updated,
            None => self.policies.push(updated),
        }
        info!(policy_id = id, "Updated policy");
        self.selected_policy = Self::create_empty_policy();
        Ok(())
    }

    pub async fn delete_policy(&mut self, id: PolicyId) -> Result<(), ViewError> {
        let result = self.api.delete_policy(id).await.map_err(ViewError::from);
        self.settle("delete", result)?;

        self.policies.retain(|p| p.policy_id != id);
        if self.selected_policy.policy_id == id {
            self.selected_policy = Self::create_empty_policy();
        }
        info!(policy_id = id, "Deleted policy");
        Ok(())
    }

    pub fn select_policy(&mut self, policy: Policy) {
        self.selected_policy = policy;
        self.last_error = None;
    }

    pub fn create_empty_policy() -> Policy {
        Policy::empty()
    }

    /// Puts a blank draft in the form ("new policy" / cancel).
    pub fn reset_form(&mut self) {
        self.selected_policy = Self::create_empty_policy();
        self.last_error = None;
    }

    /// Applies a form edit to a copy of the selected policy, keeping the
    /// current one when the edit is rejected.
    pub fn edit_selected<F>(&mut self, edit: F) -> Result<(), ViewError>
    where
        F: FnOnce(&mut Policy) -> Result<(), ValidationError>,
    {
        let mut draft = self.selected_policy.clone();
        let result = edit(&mut draft).map_err(ViewError::from);
        self.settle("edit", result)?;
        self.selected_policy = draft;
        Ok(())
    }

    pub fn find(&self, id: PolicyId) -> Option<&Policy> {
        self.policies.iter().find(|p| p.policy_id == id)
    }

    fn check_updatable(&self) -> Result<(), ViewError> {
        if self.selected_policy.is_new() {
            return Err(ValidationError::MissingField { field: "policyId" }.into());
        }
        self.selected_policy.validate()?;
        Ok(())
    }

    /// Records the outcome of an action: clears the banner on success,
    /// stores the message on failure.
    fn settle<T>(&mut self, action: &str, result: Result<T, ViewError>) -> Result<T, ViewError> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(e) => {
                warn!(action, error = %e, "Policy action failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

/// The single view instance shared by request handlers.
///
/// Mutating actions go through [`SharedView::begin`], which refuses to start
/// while another action holds the view, so results apply in completion order.
#[derive(Clone)]
pub struct SharedView {
    inner: Arc<Mutex<PolicyManagement>>,
}

impl SharedView {
    pub fn new(view: PolicyManagement) -> Self {
        Self {
            inner: Arc::new(Mutex::new(view)),
        }
    }

    pub fn begin(&self) -> Result<MutexGuard<'_, PolicyManagement>, ViewError> {
        self.inner.try_lock().map_err(|_| ViewError::Busy)
    }

    /// Waits for any in-flight action, then grants access for rendering.
    pub async fn read(&self) -> MutexGuard<'_, PolicyManagement> {
        self.inner.lock().await
    }
}
