use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use policy_client::{ClientConfig, HttpPolicyClient, PolicyApi};
use policy_ui::{create_app, AppState};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

const BASE: &str = "/insurancepolicy/api/policies";

fn state_for(server: &MockServer) -> AppState {
    let client =
        HttpPolicyClient::new(&ClientConfig::new(format!("{}{}", server.uri(), BASE))).unwrap();
    let api: Arc<dyn PolicyApi> = Arc::new(client);
    AppState::new(api).expect("templates should compile")
}

async fn body_text(app: &Router, uri: &str) -> String {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn post(app: &Router, uri: &str, form: &str) -> StatusCode {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    response.status()
}

fn policy_json(id: u64, number: &str) -> serde_json::Value {
    json!({
        "policyId": id,
        "policyNumber": number,
        "policyType": "Auto",
        "premiumAmount": 500,
        "startDate": "2024-01-01",
        "endDate": "2024-12-31",
        "isActive": true,
        "customerId": 7
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = MockServer::start().await;
    let app = create_app(state_for(&server));

    assert_eq!(body_text(&app, "/health").await, "OK");
}

#[tokio::test]
async fn test_empty_page_has_heading_refresh_and_form_fields() {
    let server = MockServer::start().await;
    let app = create_app(state_for(&server));

    let html = body_text(&app, "/").await;

    assert!(html.contains("<h2>Insurance Policies</h2>"));
    assert!(html.contains("Refresh Policies"));
    for field in [
        "policyNumber",
        "policyType",
        "premiumAmount",
        "startDate",
        "endDate",
    ] {
        assert!(
            html.contains(&format!("name=\"{}\"", field)),
            "missing input {}",
            field
        );
    }
    assert!(!html.contains(">Select</button>"));
    assert!(!html.contains(">Delete</button>"));
}

#[tokio::test]
async fn test_refresh_renders_one_row_per_policy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BASE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            policy_json(1, "P-100"),
            policy_json(2, "P-101")
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let app = create_app(state_for(&server));

    assert_eq!(
        post(&app, "/policies/refresh", "").await,
        StatusCode::SEE_OTHER
    );
    let html = body_text(&app, "/").await;

    assert!(html.contains("P-100"));
    assert!(html.contains("P-101"));
    assert_eq!(html.matches(">Select</button>").count(), 2);
    assert_eq!(html.matches(">Update</button>").count(), 2);
    assert_eq!(html.matches(">Delete</button>").count(), 2);
}

#[tokio::test]
async fn test_add_form_posts_draft_to_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(BASE))
        .and(body_partial_json(json!({
            "policyNumber": "P-200",
            "policyType": "Auto",
            "startDate": "2024-01-01",
            "isActive": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(policy_json(2, "P-200")))
        .expect(1)
        .mount(&server)
        .await;
    let app = create_app(state_for(&server));

    let status = post(
        &app,
        "/policies",
        "policyNumber=P-200&policyType=Auto&premiumAmount=500&startDate=2024-01-01&endDate=2024-12-31&customerId=7&isActive=true",
    )
    .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    let html = body_text(&app, "/").await;
    assert!(html.contains("id=\"policy-2\""));
    assert!(html.contains("New Policy"));
}

#[tokio::test]
async fn test_invalid_form_shows_error_without_backend_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(BASE))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let app = create_app(state_for(&server));

    post(
        &app,
        "/policies",
        "policyNumber=&policyType=Auto&premiumAmount=500&startDate=2024-01-01&endDate=2024-12-31",
    )
    .await;

    let html = body_text(&app, "/").await;
    assert!(html.contains("policyNumber is required"));
}

#[tokio::test]
async fn test_edit_then_save_puts_to_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BASE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([policy_json(1, "P-100")])))
        .mount(&server)
        .await;
    let mut saved = policy_json(1, "P-100");
    saved["policyType"] = json!("Home");
    Mock::given(method("PUT"))
        .and(path(format!("{}/1", BASE)))
        .and(body_partial_json(json!({"policyId": 1, "policyType": "Home"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(saved))
        .expect(1)
        .mount(&server)
        .await;
    let app = create_app(state_for(&server));

    post(&app, "/policies/refresh", "").await;
    post(&app, "/policies/1/edit", "").await;
    let html = body_text(&app, "/").await;
    assert!(html.contains("Edit Policy #1"));
    assert!(html.contains("value=\"P-100\""));

    post(
        &app,
        "/policies/update",
        "policyNumber=P-100&policyType=Home&premiumAmount=500&startDate=2024-01-01&endDate=2024-12-31&customerId=7&isActive=true",
    )
    .await;

    let html = body_text(&app, "/").await;
    assert!(html.contains("<td>Home</td>"));
    assert!(!html.contains("<td>Auto</td>"));
}

#[tokio::test]
async fn test_select_unknown_policy_reports_not_found() {
    let server = MockServer::start().await;
    let app = create_app(state_for(&server));

    post(&app, "/policies/42/select", "").await;

    let html = body_text(&app, "/").await;
    assert!(html.contains("Insurance Policy not found: 42"));
}

#[tokio::test]
async fn test_delete_removes_row() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BASE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([policy_json(1, "P-100")])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{}/1", BASE)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let app = create_app(state_for(&server));

    post(&app, "/policies/refresh", "").await;
    post(&app, "/policies/1/delete", "").await;

    let html = body_text(&app, "/").await;
    assert!(!html.contains("P-100"));
    assert!(html.contains("No policies loaded."));
}

#[tokio::test]
async fn test_action_while_another_is_in_flight_renders_page_with_conflict() {
    let server = MockServer::start().await;
    let state = state_for(&server);
    let app = create_app(state.clone());

    let guard = state.view.begin().unwrap();
    let pending = tokio::spawn({
        let app = app.clone();
        async move {
            app.oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/policies/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
        }
    });
    // Let the refused request reach the page render, which waits for the view.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    drop(guard);

    let response = pending.await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("<h2>Insurance Policies</h2>"));
    assert!(html.contains("Another policy action is still in progress"));

    assert_eq!(post(&app, "/policies/new", "").await, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_untouched_premium_is_saved_with_full_precision() {
    let server = MockServer::start().await;
    let mut stored = policy_json(1, "P-100");
    stored["premiumAmount"] = json!(123.456);
    Mock::given(method("GET"))
        .and(path(BASE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([stored.clone()])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{}/1", BASE)))
        .and(body_partial_json(json!({"premiumAmount": 123.456})))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored))
        .expect(1)
        .mount(&server)
        .await;
    let app = create_app(state_for(&server));

    post(&app, "/policies/refresh", "").await;
    post(&app, "/policies/1/edit", "").await;
    let html = body_text(&app, "/").await;
    assert!(html.contains("<td>123.46</td>"));
    assert!(html.contains("value=\"123.456\""));

    post(
        &app,
        "/policies/update",
        "policyNumber=P-100&policyType=Auto&premiumAmount=123.456&startDate=2024-01-01&endDate=2024-12-31&customerId=7&isActive=true",
    )
    .await;

    let html = body_text(&app, "/").await;
    assert!(html.contains("New Policy"));
    assert!(!html.contains("class=\"error\""));
}

#[tokio::test]
async fn test_non_finite_premium_is_refused_without_backend_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(BASE))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let app = create_app(state_for(&server));

    post(
        &app,
        "/policies",
        "policyNumber=P-1&policyType=Auto&premiumAmount=NaN&startDate=2024-01-01&endDate=2024-12-31",
    )
    .await;

    let html = body_text(&app, "/").await;
    assert!(html.contains("premiumAmount is invalid"));
}

#[tokio::test]
async fn test_404_handling() {
    let server = MockServer::start().await;
    let app = create_app(state_for(&server));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
