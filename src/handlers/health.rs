//! Readiness handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Checksum characters reported by the readiness check
const CHECKSUM_PREFIX_LEN: usize = 12;

#[derive(Serialize)]
pub struct ReadinessResponse {
    status: &'static str,
    version: &'static str,
    model_loaded: bool,
    model_checksum: String,
    feature_count: usize,
    timestamp: i64,
}

/// The state only exists once a model has loaded, so reaching here means ready
pub async fn check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let checksum = &state.model.metadata.checksum;

    Json(ReadinessResponse {
        status: "ready",
        version: env!("CARGO_PKG_VERSION"),
        model_loaded: true,
        model_checksum: checksum.chars().take(CHECKSUM_PREFIX_LEN).collect(),
        feature_count: state.advisor.feature_names().len(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
