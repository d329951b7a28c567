//! Inbound pipe endpoint
//!
//! Thin transport boundary: accepts a pipe submission, queues a work unit,
//! answers 202 immediately. The unit's eventual outcome is logged by an
//! observer task; no decision logic lives here.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{error, info};

use contracts::{DataInfo, HubOverrides, WorkUnit};

/// One inbound pipe message
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipeSubmission {
    /// Routing and destination metadata
    pub data_info: DataInfo,
    /// Payload content type
    pub mime_type: String,
    /// Payload content
    pub payload: String,
    /// Optional pipe config carrying hub overrides
    #[serde(default)]
    pub config: Option<PipeConfig>,
}

/// The pipe config section this engine cares about
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipeConfig {
    pub hub: Option<HubOverrides>,
}

#[derive(Clone)]
struct AppState {
    units: mpsc::Sender<WorkUnit>,
}

/// Build the pipe endpoint router
pub fn router(units: mpsc::Sender<WorkUnit>) -> Router {
    Router::new()
        .route("/pipe", post(submit_pipe))
        .route("/health", get(health))
        .with_state(AppState { units })
}

async fn submit_pipe(
    State(state): State<AppState>,
    Json(submission): Json<PipeSubmission>,
) -> StatusCode {
    let (unit, result_rx) = WorkUnit::new(
        Bytes::from(submission.payload),
        submission.mime_type,
        submission.data_info,
        submission.config.and_then(|config| config.hub),
    );

    if state.units.send(unit).await.is_err() {
        error!("Dispatcher queue closed, rejecting submission");
        return StatusCode::SERVICE_UNAVAILABLE;
    }

    // Acknowledge now; report the outcome when it arrives.
    tokio::spawn(async move {
        match result_rx.await {
            Ok(Ok(outcome)) => info!(%outcome, "Work unit finished"),
            Ok(Err(error)) => error!(%error, "Work unit failed"),
            Err(_) => error!("Work unit dropped without reporting an outcome"),
        }
    });

    StatusCode::ACCEPTED
}

async fn health() -> &'static str {
    "OK"
}
