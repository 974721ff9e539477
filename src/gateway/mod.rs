pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tokio::net::TcpListener;

// OpenAPI / Swagger UI
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{AuthService, CredentialStore};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::media::MediaLibrary;
use crate::oplog::OperationLogger;
use state::AppState;

/// Build the complete router for `state`.
pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);

    // ==========================================================================
    // Protected Routes (bearer token required)
    // ==========================================================================
    let calc_routes = Router::new()
        .route("/calculate", post(handlers::calculate))
        .route("/calculate/{operation}", get(handlers::calculate_query))
        .route_layer(from_fn_with_state(
            state.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    // ==========================================================================
    // Public Routes (no auth required)
    // ==========================================================================
    let public_routes = Router::new()
        .route("/token", post(crate::auth::handlers::issue_token))
        .route("/music", get(handlers::stream_track_query))
        .route("/music/{track_name}", get(handlers::stream_track))
        .route("/health", get(handlers::health_check));

    Router::new()
        .merge(public_routes)
        .merge(calc_routes)
        .fallback(not_found)
        .with_state(state)
        // Stateless, added after with_state
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("route not found".to_string())
}

/// Assemble the application state from config.
pub async fn build_state(config: &AppConfig) -> Result<AppState> {
    let credentials = CredentialStore::from_config(&config.auth.users)
        .context("Failed to load user credentials")?;
    if credentials.is_empty() {
        tracing::warn!("No users configured; every login will fail");
    }
    let auth = Arc::new(AuthService::new(
        credentials,
        &config.auth.jwt_secret,
        chrono::Duration::minutes(config.auth.token_expire_minutes),
    ));

    let oplog = OperationLogger::connect(config.postgres_url.as_deref()).await;

    let media = Arc::new(MediaLibrary::new(config.media.root.clone()));
    if !config.media.root.is_dir() {
        tracing::warn!(
            "Media root {} is not a directory; every track will 404",
            config.media.root.display()
        );
    }

    Ok(AppState::new(auth, oplog, media))
}

/// Start HTTP Gateway server and run until Ctrl-C / SIGTERM.
pub async fn run_server(config: &AppConfig, port: u16) -> Result<()> {
    let state = build_state(config).await?;
    let app = build_router(state);

    // Bind address
    let addr = format!("{}:{}", config.gateway.host, port);
    let listener = TcpListener::bind(&addr).await.with_context(|| {
        format!(
            "Failed to bind to {} (port may already be in use; check with: lsof -i :{})",
            addr, port
        )
    })?;

    tracing::info!("🚀 Gateway listening on http://{}", addr);
    tracing::info!("📖 API Docs: http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
