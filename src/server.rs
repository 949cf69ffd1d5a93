/*!
 * HTTP boundary.
 *
 * - `POST /api/proofread` runs the pipeline on `{text, llm_provider}`
 * - `GET /` serves the static `index.html`
 * - `/static/...` serves the rest of the static directory
 * - `GET /api/health` reports liveness
 *
 * Failures are answered with HTTP 500 and a `{"detail": ...}` body.
 */

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::{future::Future, net::SocketAddr, path::Path, sync::Arc};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};

use crate::errors::ProofreadError;
use crate::proofreading::{CorrectorRegistry, Proofreader};

const PROOFREAD_PATH: &str = "/api/proofread";
const HEALTH_PATH: &str = "/api/health";
const STATIC_PREFIX: &str = "/static";
const INDEX_FILE: &str = "index.html";
const HEALTH_STATUS: &str = "ok";
const LOG_PREVIEW_CHARS: usize = 100;

/// Body of `POST /api/proofread`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofreadRequest {
    /// Document to proofread
    pub text: String,
    /// Provider name; omitted or blank selects the configured default provider
    #[serde(default)]
    pub llm_provider: String,
}

/// Answer of `POST /api/proofread`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofreadResponse {
    /// The corrected document
    pub final_text: String,
    /// Word-level changes between the request text and `final_text`
    pub total_changes: usize,
}

#[derive(Debug, Serialize, Copy, Clone, PartialEq, Eq)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// An error answered to the client
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl From<ProofreadError> for ApiError {
    fn from(error: ProofreadError) -> Self {
        error!("Error in proofread request: {}", error);
        Self::internal(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

/// Errors raised while starting or running the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to determine local address: {source}")]
    LocalAddr {
        #[source]
        source: std::io::Error,
    },
    #[error("axum server error: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

/// State shared by every request
#[derive(Debug)]
pub struct AppState {
    registry: CorrectorRegistry,
}

impl AppState {
    /// Wrap a corrector registry
    pub fn new(registry: CorrectorRegistry) -> Self {
        Self { registry }
    }
}

/// Shared handle passed to handlers
pub type SharedState = Arc<AppState>;

/// Build the full application router
pub fn build_router(state: SharedState, static_dir: &Path) -> Router {
    debug_assert!(PROOFREAD_PATH.starts_with("/api/"));

    Router::new()
        .route(PROOFREAD_PATH, post(proofread))
        .route(HEALTH_PATH, get(health))
        .route_service("/", ServeFile::new(static_dir.join(INDEX_FILE)))
        .nest_service(STATIC_PREFIX, ServeDir::new(static_dir))
        .with_state(state)
}

/// Serve `router` on `addr` until Ctrl+C
pub async fn serve(addr: SocketAddr, router: Router) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            address: addr.to_string(),
            source,
        })?;

    let local_addr = listener
        .local_addr()
        .map_err(|source| ServerError::LocalAddr { source })?;
    info!("texproof server listening on http://{}", local_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| ServerError::Serve { source })?;

    info!("Server shutdown complete");
    Ok(())
}

fn shutdown_signal() -> impl Future<Output = ()> + Send + 'static {
    async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!("Failed to capture Ctrl+C signal: {}", error);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    }
}

async fn proofread(
    State(state): State<SharedState>,
    Json(request): Json<ProofreadRequest>,
) -> Result<Json<ProofreadResponse>, ApiError> {
    let preview: String = request.text.chars().take(LOG_PREVIEW_CHARS).collect();
    debug!("Received text ({}): {}...", request.llm_provider, preview);

    let corrector = state.registry.resolve(&request.llm_provider)?;
    let proofreader = Proofreader::new(corrector);
    let text = request.text;

    // A panic inside the pipeline surfaces as a JoinError instead of a dropped connection
    let outcome = tokio::spawn(async move { proofreader.proofread(&text).await })
        .await
        .map_err(|e| ProofreadError::Pipeline(e.to_string()))?;

    Ok(Json(ProofreadResponse {
        final_text: outcome.final_text,
        total_changes: outcome.total_changes,
    }))
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: HEALTH_STATUS,
    })
}
