//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with CORS, tracing, compression, and all
//! endpoint handlers.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS middleware: allow localhost origins for the dashboard page.
    // Use the configured port plus port+1 for the dev server.
    let port = state.config.general.port;
    let dev_port = port.saturating_add(1);
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([
            format!("http://127.0.0.1:{}", port)
                .parse::<HeaderValue>()
                .unwrap(),
            format!("http://localhost:{}", port)
                .parse::<HeaderValue>()
                .unwrap(),
            format!("http://127.0.0.1:{}", dev_port)
                .parse::<HeaderValue>()
                .unwrap(),
            format!("http://localhost:{}", dev_port)
                .parse::<HeaderValue>()
                .unwrap(),
        ]))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/sessions", post(handlers::create_session))
        .route("/sessions/{id}/chat", post(handlers::chat))
        .route("/sessions/{id}/history", get(handlers::history))
        .route("/sessions/{id}/reset", post(handlers::reset))
        .route("/sessions/{id}/turns/{index}/chart", post(handlers::chart))
        .layer(DefaultBodyLimit::max(256 * 1024)) // questions and chart picks are small
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured address.
///
/// Binds to 127.0.0.1 (localhost only) on the port from config.
pub async fn start_server(
    config: &vantage_core::VantageConfig,
    state: AppState,
) -> Result<(), vantage_core::VantageError> {
    let addr = format!("127.0.0.1:{}", config.general.port);

    let router = create_router(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| vantage_core::VantageError::Api(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| vantage_core::VantageError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
