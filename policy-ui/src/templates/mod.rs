use anyhow::{Context, Result};
use policy_model::{Policy, PolicyId};
use serde::Serialize;
use tera::Tera;

use crate::view::PolicyManagement;

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PolicyVm {
    pub policy_id: PolicyId,
    pub policy_number: String,
    pub policy_type: String,
    /// Two-decimal text for the table.
    pub premium_amount: String,
    /// Exact value for the edit form, so an untouched premium round-trips.
    pub premium_input: String,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
    pub customer_id: u32,
    pub is_new: bool,
}

impl From<&Policy> for PolicyVm {
    fn from(policy: &Policy) -> Self {
        Self {
            policy_id: policy.policy_id,
            policy_number: policy.policy_number.clone(),
            policy_type: policy.policy_type.clone(),
            premium_amount: format!("{:.2}", policy.premium_amount),
            premium_input: policy.premium_amount.to_string(),
            start_date: policy.start_date.format("%Y-%m-%d").to_string(),
            end_date: policy.end_date.format("%Y-%m-%d").to_string(),
            is_active: policy.is_active,
            customer_id: policy.customer_id,
            is_new: policy.is_new(),
        }
    }
}

/// Loads the page templates from the crate's `templates/` directory.
pub fn load() -> Result<Tera> {
    let tpl_glob = format!("{}/templates/**/*.html", env!("CARGO_MANIFEST_DIR"));
    Tera::new(&tpl_glob).with_context(|| format!("Failed to parse templates in {}", tpl_glob))
}

pub fn context_for(view: &PolicyManagement) -> tera::Context {
    let policies: Vec<PolicyVm> = view.policies().iter().map(PolicyVm::from).collect();

    let mut context = tera::Context::new();
    context.insert("policies", &policies);
    context.insert("selected", &PolicyVm::from(view.selected_policy()));
    context.insert("error", &view.last_error());
    context
}

pub fn render_policies(tera: &Tera, view: &PolicyManagement) -> tera::Result<String> {
    tera.render("policies.html", &context_for(view))
}
