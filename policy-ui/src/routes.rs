use crate::templates;
use crate::view::{PolicyManagement, ViewError};
use crate::{AppError, AppResult, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use policy_model::{parse_amount, parse_date, Policy, PolicyId, ValidationError};
use serde::Deserialize;
use tokio::sync::MutexGuard;
use tracing::{debug, error, warn};

/// The edit form as posted by the browser. Every field arrives as text.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PolicyForm {
    #[serde(default)]
    pub policy_number: String,
    #[serde(default)]
    pub policy_type: String,
    #[serde(default)]
    pub premium_amount: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub customer_id: String,
    /// Unchecked boxes are not posted at all.
    pub is_active: Option<String>,
}

impl PolicyForm {
    /// Copies the form fields onto `policy`; the identifier is left alone.
    pub fn apply_to(&self, policy: &mut Policy) -> Result<(), ValidationError> {
        policy.policy_number = self.policy_number.trim().to_string();
        policy.policy_type = self.policy_type.trim().to_string();
        policy.premium_amount = parse_field("premiumAmount", &self.premium_amount, parse_amount)?;
        policy.start_date = parse_field("startDate", &self.start_date, parse_date)?;
        policy.end_date = parse_field("endDate", &self.end_date, parse_date)?;
        policy.customer_id = if self.customer_id.trim().is_empty() {
            0
        } else {
            self.customer_id
                .trim()
                .parse::<u32>()
                .map_err(|e| ValidationError::InvalidField {
                    field: "customerId",
                    message: e.to_string(),
                })?
        };
        policy.is_active = self
            .is_active
            .as_deref()
            .is_some_and(|v| matches!(v, "true" | "on" | "1"));
        Ok(())
    }
}

fn parse_field<T, F>(field: &'static str, raw: &str, parse: F) -> Result<T, ValidationError>
where
    F: FnOnce(&str) -> Result<T, String>,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    parse(raw).map_err(|message| ValidationError::InvalidField { field, message })
}

/// Render the policy page
pub async fn policies_html(State(state): State<AppState>) -> AppResult<Html<String>> {
    let view = state.view.read().await;
    let html = templates::render_policies(&state.tera, &view).map_err(|e| {
        error!("Template rendering failed: {}", e);
        AppError::from(e)
    })?;
    Ok(Html(html))
}

/// Takes the view for one action, or renders the page with a 409 when
/// another action still holds it.
async fn begin(state: &AppState) -> Result<MutexGuard<'_, PolicyManagement>, Response> {
    match state.view.begin() {
        Ok(view) => Ok(view),
        Err(err) => Err(refused(state, err).await),
    }
}

async fn refused(state: &AppState, err: ViewError) -> Response {
    warn!(error = %err, "Refusing policy action");
    let view = state.view.read().await;
    let mut context = templates::context_for(&view);
    context.insert("error", &err.to_string());
    match state.tera.render("policies.html", &context) {
        Ok(html) => (StatusCode::CONFLICT, Html(html)).into_response(),
        Err(e) => {
            error!("Template rendering failed: {}", e);
            AppError::from(e).into_response()
        }
    }
}

fn back_to_page() -> Response {
    Redirect::to("/").into_response()
}

// Action handlers below redirect back to the page; failures are already
// recorded on the view and shown in its error banner.

pub async fn refresh_policies(State(state): State<AppState>) -> Response {
    let mut view = match begin(&state).await {
        Ok(view) => view,
        Err(page) => return page,
    };
    let _ = view.load_policies().await;
    back_to_page()
}

pub async fn add_policy(State(state): State<AppState>, Form(form): Form<PolicyForm>) -> Response {
    debug!("Handling add policy: {:?}", form);
    let mut view = match begin(&state).await {
        Ok(view) => view,
        Err(page) => return page,
    };
    if view.edit_selected(|p| form.apply_to(p)).is_ok() {
        let _ = view.add_policy().await;
    }
    back_to_page()
}

pub async fn update_policy(
    State(state): State<AppState>,
    Form(form): Form<PolicyForm>,
) -> Response {
    debug!("Handling update policy: {:?}", form);
    let mut view = match begin(&state).await {
        Ok(view) => view,
        Err(page) => return page,
    };
    if view.edit_selected(|p| form.apply_to(p)).is_ok() {
        let _ = view.update_policy().await;
    }
    back_to_page()
}

pub async fn select_policy(State(state): State<AppState>, Path(id): Path<PolicyId>) -> Response {
    let mut view = match begin(&state).await {
        Ok(view) => view,
        Err(page) => return page,
    };
    let found = view.find(id).cloned();
    match found {
        Some(policy) => view.select_policy(policy),
        None => {
            // Reuses the lookup's not-found reporting.
            let _ = view.show_update_form(id);
        }
    }
    back_to_page()
}

pub async fn show_update_form(
    State(state): State<AppState>,
    Path(id): Path<PolicyId>,
) -> Response {
    let mut view = match begin(&state).await {
        Ok(view) => view,
        Err(page) => return page,
    };
    let _ = view.show_update_form(id);
    back_to_page()
}

pub async fn delete_policy(State(state): State<AppState>, Path(id): Path<PolicyId>) -> Response {
    let mut view = match begin(&state).await {
        Ok(view) => view,
        Err(page) => return page,
    };
    let _ = view.delete_policy(id).await;
    back_to_page()
}

pub async fn new_policy(State(state): State<AppState>) -> Response {
    let mut view = match begin(&state).await {
        Ok(view) => view,
        Err(page) => return page,
    };
    view.reset_form();
    back_to_page()
}
