// Library interface for policy-ui

pub mod config;
pub mod routes;
pub mod templates;
pub mod view;

use anyhow::Result;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use policy_client::PolicyApi;
use std::sync::Arc;
use tera::Tera;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

pub use config::Config;
pub use view::{PolicyManagement, SharedView, ViewError};

#[derive(Clone)]
pub struct AppState {
    pub view: SharedView,
    pub tera: Arc<Tera>,
}

impl AppState {
    pub fn new(api: Arc<dyn PolicyApi>) -> Result<Self> {
        Ok(Self {
            view: SharedView::new(PolicyManagement::new(api)),
            tera: Arc::new(templates::load()?),
        })
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status_code: StatusCode,
    pub message: String,
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        AppError {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Template rendering error: {}", err),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code, self.message).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

// Health check endpoint
async fn health() -> impl IntoResponse {
    "OK"
}

// Fallback handler for 404s
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(
            r#"
<!DOCTYPE html>
<html>
<head>
    <title>404 - Not Found</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; }
        .error { color: #d32f2f; }
    </style>
</head>
<body>
    <h1 class="error">404 - Page Not Found</h1>
    <p><a href="/">← Back to Insurance Policies</a></p>
</body>
</html>
    "#,
        ),
    )
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::policies_html))
        .route("/health", get(health))
        .route("/policies", post(routes::add_policy))
        .route("/policies/refresh", post(routes::refresh_policies))
        .route("/policies/update", post(routes::update_policy))
        .route("/policies/new", post(routes::new_policy))
        .route("/policies/:id/select", post(routes::select_policy))
        .route("/policies/:id/edit", post(routes::show_update_form))
        .route("/policies/:id/delete", post(routes::delete_policy))
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .with_state(state)
}
