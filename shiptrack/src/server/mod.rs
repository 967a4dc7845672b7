//! HTTP boundary.
//!
//! One endpoint, `/ship-data` (also mounted at `/`), answering `GET` with the
//! freshly resolved [`PositionRecord`] as JSON and `OPTIONS` with an empty
//! 200. Every response carries permissive CORS headers.
//!
//! | Status | When |
//! |--------|------|
//! | 200 | a record was resolved (live, or a fallback when fallbacks are served) |
//! | 404 | only a fallback was available and fallbacks are not served |
//! | 500 | the resolution task failed |
//! | 503 | another resolution is running and nothing is cached yet |
//!
//! Errors use the envelope `{"error", "message", "timestamp"}`.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::position::PositionRecord;
use crate::tracker::ShipTracker;

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8787";

/// Errors running the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub tracker: Arc<ShipTracker>,
    /// Answer with last-known and estimated records instead of 404.
    pub serve_fallback: bool,
}

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorEnvelope {
    fn response(status: StatusCode, error: &str, message: impl Into<String>) -> Response {
        let body = Self {
            error: error.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the router.
pub fn create_router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(ship_data).options(preflight))
        .route("/ship-data", get(ship_data).options(preflight))
        .with_state(state)
        .layer(cors)
}

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, state: ServerState, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!(%addr, "Starting HTTP server");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn ship_data(State(state): State<ServerState>) -> Response {
    let tracker = Arc::clone(&state.tracker);
    let outcome = tokio::spawn(async move { tracker.refresh().await }).await;

    let record: PositionRecord = match outcome {
        Ok(Some(record)) => record,
        Ok(None) => match state.tracker.current() {
            Some(record) => record,
            None => {
                return ErrorEnvelope::response(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Resolution in progress",
                    "A position lookup is already running, retry shortly",
                );
            }
        },
        Err(e) => {
            error!(error = %e, "Resolution task failed");
            return ErrorEnvelope::response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch ship data",
                e.to_string(),
            );
        }
    };

    if !record.is_live() && !state.serve_fallback {
        warn!(source = %record.source, "No live position to serve");
        return ErrorEnvelope::response(
            StatusCode::NOT_FOUND,
            "Ship data not found",
            "No live source responded",
        );
    }

    (StatusCode::OK, Json(record)).into_response()
}
