use loomflow_engine::{EngineClient, EngineService, InMemoryMetadataStore};
use loomflow_generate::{PatternMatcher, Ruleset};
use loomflow_server::{config::ServerConfig, routes, state::AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    // Classification rules: external file when configured, built-in otherwise
    let ruleset = match &config.ruleset_path {
        Some(path) => Ruleset::from_path(path).expect("failed to load rule set"),
        None => Ruleset::builtin(),
    };
    tracing::info!(
        triggers = ruleset.triggers.len(),
        actions = ruleset.actions.len(),
        "Loaded classification rule set"
    );

    let client = EngineClient::new(config.engine).expect("failed to build engine client");
    let service = EngineService::new(client, InMemoryMetadataStore::new());
    let state = Arc::new(AppState::new(PatternMatcher::new(ruleset), service));

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind listen address");
    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("shutdown signal received");
}
