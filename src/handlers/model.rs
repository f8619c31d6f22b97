//! Model status handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use crate::advisor::{FeatureImportance, ModelMetadata};

#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub model_loaded: bool,
    #[serde(flatten)]
    pub metadata: ModelMetadata,
    pub coefficient_count: usize,
    pub intercept: f64,
    /// `|c_i| / Σ|c|` per feature, in layout order
    pub feature_importance: Vec<FeatureImportance>,
}

/// Describe the artifact this process is serving
pub async fn status(State(state): State<AppState>) -> Json<ModelStatus> {
    let model = &state.model.model;

    Json(ModelStatus {
        model_loaded: true,
        metadata: state.model.metadata.clone(),
        coefficient_count: model.coefficients().len(),
        intercept: model.intercept(),
        feature_importance: model.feature_importance(),
    })
}
