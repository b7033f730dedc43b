//! HTTP surface for single-pair and batch verification.
//!
//! Exposes `POST /v1/verify` and `POST /v1/verify/batch` on a local axum
//! server. Responses always carry a `success` flag; a partial batch failure
//! is still an HTTP success with placeholder records embedded in `results`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::{Result, VerifyError};
use crate::orchestrator::{VerificationTarget, Verifier};
use crate::search::SearchProvider;
use crate::store::VerificationStore;
use crate::types::VerificationRecord;

/// Bind configuration for the verification server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind on.
    pub host: String,
    /// Port to bind on. Use `0` for auto-assign.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8750,
        }
    }
}

/// Request body for `POST /v1/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// Catalog identifier of the broker.
    pub broker_id: u64,
    /// Slug of the country.
    pub country_slug: String,
    /// Bypass the cached verdict and re-run the searches.
    #[serde(default)]
    pub force_refresh: bool,
}

/// Request body for `POST /v1/verify/batch`.
#[derive(Debug, Deserialize)]
pub struct BatchVerifyRequest {
    /// The pairs to verify, in order.
    pub verifications: Vec<VerificationTarget>,
    /// Bypass cached verdicts for every pair.
    #[serde(default)]
    pub force_refresh: bool,
}

/// Response body for a successful single-pair verification.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    /// Always `true` on this path.
    pub success: bool,
    /// The computed or cached verification record.
    pub result: VerificationRecord,
}

/// Response body for a batch verification.
#[derive(Debug, Serialize)]
pub struct BatchVerifyResponse {
    /// Always `true`: per-item failures are embedded in `results`.
    pub success: bool,
    /// One record per requested pair, in input order.
    pub results: Vec<VerificationRecord>,
    /// Number of pairs processed.
    pub processed_count: usize,
}

/// Error body returned on failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false` on this path.
    pub success: bool,
    /// Human-readable failure description.
    pub error: String,
}

/// Shared state for axum handlers.
struct AppState<C, S, P> {
    verifier: Arc<Verifier<C, S, P>>,
}

impl<C, S, P> Clone for AppState<C, S, P> {
    fn clone(&self) -> Self {
        Self {
            verifier: Arc::clone(&self.verifier),
        }
    }
}

/// The verification HTTP server.
///
/// Binds on start and serves in a background tokio task until shut down or
/// dropped.
pub struct VerifyServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl VerifyServer {
    /// Start the verification HTTP server.
    ///
    /// Binds to `{config.host}:{config.port}` (use port `0` for auto-assign)
    /// and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Config`] if the TCP listener cannot bind.
    pub async fn start<C, S, P>(
        verifier: Arc<Verifier<C, S, P>>,
        config: &ServerConfig,
    ) -> Result<Self>
    where
        C: Catalog + 'static,
        S: SearchProvider + 'static,
        P: VerificationStore + 'static,
    {
        let state = AppState { verifier };
        let app = Router::new()
            .route("/v1/verify", post(handle_verify::<C, S, P>))
            .route("/v1/verify/batch", post(handle_verify_batch::<C, S, P>))
            .with_state(state);

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| VerifyError::Config(format!("server bind failed: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| VerifyError::Config(format!("failed to get local addr: {e}")))?;

        info!("verification server listening on http://{addr}/v1");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("verification server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for VerifyServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Map a verification failure onto an HTTP status and error body.
///
/// Configuration problems are kept distinct from verification failures so
/// operators can tell a broken deployment from a broken pair.
fn error_response(err: &VerifyError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, message) = match err {
        VerifyError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        VerifyError::Config(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("configuration error: {err}"),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Verification failed: {err}"),
        ),
    };
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: message,
        }),
    )
}

/// `POST /v1/verify` — verify one (broker, country) pair.
async fn handle_verify<C, S, P>(
    State(state): State<AppState<C, S, P>>,
    Json(request): Json<VerifyRequest>,
) -> std::result::Result<Json<VerifyResponse>, (StatusCode, Json<ErrorResponse>)>
where
    C: Catalog,
    S: SearchProvider,
    P: VerificationStore,
{
    match state
        .verifier
        .verify(request.broker_id, &request.country_slug, request.force_refresh)
        .await
    {
        Ok(result) => Ok(Json(VerifyResponse {
            success: true,
            result,
        })),
        Err(err) => Err(error_response(&err)),
    }
}

/// `POST /v1/verify/batch` — verify a list of pairs sequentially.
async fn handle_verify_batch<C, S, P>(
    State(state): State<AppState<C, S, P>>,
    Json(request): Json<BatchVerifyRequest>,
) -> Json<BatchVerifyResponse>
where
    C: Catalog,
    S: SearchProvider,
    P: VerificationStore,
{
    let results = state
        .verifier
        .verify_batch(&request.verifications, request.force_refresh)
        .await;
    let processed_count = results.len();
    Json(BatchVerifyResponse {
        success: true,
        results,
        processed_count,
    })
}
