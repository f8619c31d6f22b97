//! Student Advisor
//!
//! Predicts a student's score from five study features and returns study
//! recommendations plus a risk assessment.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     STUDENT ADVISOR                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  HTTP (Axum)  ──►  AdvisoryService (single + batch)         │
//! │                      │                                      │
//! │                      ├─► Feature Codec     (codec.rs)       │
//! │                      ├─► Prediction Engine (engine.rs)      │
//! │                      ├─► Recommendations   (recommend.rs)   │
//! │                      └─► Risk Assessor     (risk.rs)        │
//! │                                                             │
//! │  Model artifact: loaded once at startup, read-only          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod advisor;
pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
};

use advisor::{AdvisoryError, AdvisoryService, ModelArtifact, PredictionEngine};

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub advisor: AdvisoryService,
    pub model: Arc<ModelArtifact>,
    pub config: config::Config,
}

impl AppState {
    /// Load the model artifact named by the config and build the service.
    /// Any failure here means the process must not serve predictions.
    pub fn load(config: config::Config) -> Result<Self, AdvisoryError> {
        let artifact = ModelArtifact::load(&config.model_path)?;
        Self::from_artifact(artifact, config)
    }

    pub fn from_artifact(artifact: ModelArtifact, config: config::Config) -> Result<Self, AdvisoryError> {
        let engine = PredictionEngine::from_artifact(&artifact)?;

        Ok(Self {
            advisor: AdvisoryService::new(engine),
            model: Arc::new(artifact),
            config,
        })
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route("/predict/batch", post(handlers::predict::predict_batch))
        .route("/api/v1/model", get(handlers::model::status))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
