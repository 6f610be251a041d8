//! Liveness and diagnostic handlers.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Build the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/test", get(diagnostics))
}

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub message: &'static str,
}

/// Liveness message. Does not check dependencies.
async fn index() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        message: "Orchard catalog backend running",
    })
}

/// Store/configuration diagnostic report.
#[derive(Debug, Serialize)]
pub struct DiagnosticsReport {
    pub backend: &'static str,
    pub database: &'static str,
    pub database_url: &'static str,
    pub database_name: &'static str,
    pub connection_status: &'static str,
    pub collections: Vec<String>,
}

/// Report store connectivity and configuration presence.
///
/// Never fails: an unreachable store is reported, not raised.
async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let flags = state.config().store_env;
    let mut report = DiagnosticsReport {
        backend: "running",
        database: "unavailable",
        database_url: if flags.url_set { "set" } else { "not set" },
        database_name: if flags.name_set { "set" } else { "not set" },
        connection_status: "not connected",
        collections: Vec::new(),
    };

    if let Some(store) = state.store() {
        match store.ping().await {
            Ok(()) => {
                report.database = "connected";
                report.connection_status = "connected";
                match store.collection_names().await {
                    Ok(mut names) => {
                        names.truncate(10);
                        report.collections = names;
                    }
                    Err(err) => {
                        tracing::warn!("Listing collections failed: {err}");
                        report.database = "connected with errors";
                    }
                }
            }
            Err(err) => {
                tracing::warn!("Store ping failed: {err}");
            }
        }
    }

    Json(report)
}
