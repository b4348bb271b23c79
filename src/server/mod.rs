//! HTTP service exposing the converter to workflow tools.
//!
//! Routes:
//! - `GET /health` - liveness
//! - `GET /api/tools` - operation catalog
//! - `POST /api/convert/sse-data` - stream-parse raw SSE text
//! - `POST /api/convert/sse-object` - convert one event object
//! - `POST /api/generate/preset-data` - render a preset file
//! - `POST /api/convert/batch` - convert a mixed list, collecting per-item errors

mod handlers;
pub mod types;

pub use handlers::{ApiError, AVAILABLE_ENDPOINTS};

use std::any::Any;
use std::net::SocketAddr;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use color_eyre::eyre::WrapErr;
use tokio::task::JoinHandle;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};

use crate::config::ServerConfig;
use crate::converter::Converter;
use handlers::*;
use types::ErrorResponse;

/// Shared state for the route handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub converter: Converter,
}

impl AppState {
    pub fn new(converter: Converter) -> Self {
        Self { converter }
    }
}

/// Build the router with all routes and layers.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    // Workflow tools call from arbitrary origins
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/tools", get(tools_handler))
        .route("/api/convert/sse-data", post(convert_sse_data_handler))
        .route("/api/convert/sse-object", post(convert_sse_object_handler))
        .route("/api/generate/preset-data", post(generate_preset_handler))
        .route("/api/convert/batch", post(batch_convert_handler))
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .with_state(state)
}

fn panic_response(_err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
        .into_response()
}

/// Start the service on a specific address.
///
/// Returns the server task and the bound address (useful when binding port 0
/// in tests).
pub async fn start_server_on(
    addr: SocketAddr,
    converter: Converter,
    config: &ServerConfig,
) -> color_eyre::Result<(JoinHandle<()>, SocketAddr)> {
    let app = build_router(AppState::new(converter), config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;
    let actual_addr = listener.local_addr()?;

    tracing::info!("SSE converter HTTP API listening on http://{}", actual_addr);
    tracing::info!("Health check: http://{}/health", actual_addr);
    tracing::info!("API documentation: http://{}/api/tools", actual_addr);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    Ok((handle, actual_addr))
}

/// Run the service until the server task ends.
pub async fn run_server(config: ServerConfig, converter: Converter) -> color_eyre::Result<()> {
    let addr = config
        .socket_addr()
        .wrap_err_with(|| format!("Invalid bind address {}:{}", config.host, config.port))?;
    let (handle, _) = start_server_on(addr, converter, &config).await?;
    handle.await.wrap_err("HTTP server task failed")?;
    Ok(())
}
