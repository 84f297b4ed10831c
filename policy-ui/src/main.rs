use anyhow::{Context, Result};
use policy_client::HttpPolicyClient;
use policy_ui::{create_app, AppState, Config};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "policy_ui=debug,policy_client=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse_config();

    let client = HttpPolicyClient::new(&config.client_config())
        .context("Failed to create policy API client")?;
    info!("Using policy API at {}", client.base_url());

    let state = AppState::new(Arc::new(client)).context("Failed to initialize UI state")?;

    if !config.no_initial_load {
        let mut view = state.view.read().await;
        if let Err(e) = view.load_policies().await {
            warn!("Initial policy load failed: {}", e);
        }
    }

    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("Failed to bind to {}", config.listen_addr()))?;

    info!("Server starting on http://{}", config.listen_addr());

    axum::serve(listener, app)
        .await
        .context("Server failed to start")?;

    Ok(())
}
