//! Prediction Engine - Regression Model Integration
//!
//! Loads the trained model artifact once at startup and exposes a single
//! pure function from feature vector to predicted score.
//! The loaded model is immutable; share it behind an `Arc`.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::codec::FeatureVector;
use super::error::AdvisoryError;
use super::layout::{matches_layout, FEATURE_COUNT};

/// Only model type the trainer produces
pub const LINEAR_REGRESSION: &str = "linear_regression";

// ============================================================================
// REGRESSOR TRAIT
// ============================================================================

/// Trained regression model (black box to the rest of the pipeline)
///
/// Implementations must be deterministic and free of side effects.
pub trait Regressor: Send + Sync {
    /// Feature names in training order
    fn feature_names(&self) -> &[String];

    fn predict(&self, features: &[f64]) -> Result<f64, AdvisoryError>;
}

// ============================================================================
// LINEAR MODEL
// ============================================================================

/// Ordinary least squares model: `intercept + Σ coefficients[i] * x[i]`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    pub fn new(
        feature_names: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Result<Self, AdvisoryError> {
        if coefficients.len() != feature_names.len() {
            return Err(AdvisoryError::SchemaMismatch {
                expected: feature_names.len(),
                detail: format!("but artifact carries {} coefficients", coefficients.len()),
            });
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AdvisoryError::ModelUnavailable(
                "model parameters must be finite".to_string(),
            ));
        }

        Ok(Self {
            feature_names,
            coefficients,
            intercept,
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Normalized weight magnitude per feature: `|c_i| / Σ|c|`
    ///
    /// All zeros when every coefficient is zero.
    pub fn feature_importance(&self) -> Vec<FeatureImportance> {
        let total: f64 = self.coefficients.iter().map(|c| c.abs()).sum();

        self.feature_names
            .iter()
            .zip(&self.coefficients)
            .map(|(name, c)| FeatureImportance {
                feature: name.clone(),
                importance: if total > 0.0 { c.abs() / total } else { 0.0 },
            })
            .collect()
    }
}

/// Share of the model's total weight carried by one feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

impl Regressor for LinearModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &[f64]) -> Result<f64, AdvisoryError> {
        if features.len() != self.coefficients.len() {
            return Err(AdvisoryError::SchemaMismatch {
                expected: self.coefficients.len(),
                detail: format!("but received a vector of length {}", features.len()),
            });
        }

        Ok(self
            .coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (c, x)| acc + c * x))
    }
}

// ============================================================================
// MODEL ARTIFACT
// ============================================================================

/// On-disk artifact written by the offline trainer
#[derive(Debug, Clone, Deserialize)]
pub struct ModelFile {
    #[serde(default = "default_model_type")]
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub target: Option<String>,
}

fn default_model_type() -> String {
    LINEAR_REGRESSION.to_string()
}

/// Model metadata
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_type: String,
    pub features: Vec<String>,
    pub target: Option<String>,
    /// SHA-256 of the artifact bytes
    pub checksum: String,
    pub loaded_at: DateTime<Utc>,
}

/// Loaded, validated artifact
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    pub model: LinearModel,
    pub metadata: ModelMetadata,
}

impl ModelArtifact {
    /// Load model from file
    pub fn load(path: &Path) -> Result<Self, AdvisoryError> {
        tracing::info!("Loading model artifact from: {}", path.display());

        let bytes = std::fs::read(path).map_err(|e| {
            AdvisoryError::ModelUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;

        Self::from_slice(&bytes, &path.display().to_string())
    }

    /// Parse and validate artifact bytes; `source` is recorded in the metadata
    pub fn from_slice(bytes: &[u8], source: &str) -> Result<Self, AdvisoryError> {
        let file: ModelFile = serde_json::from_slice(bytes)
            .map_err(|e| AdvisoryError::ModelUnavailable(format!("malformed artifact: {}", e)))?;

        if file.model_type != LINEAR_REGRESSION {
            return Err(AdvisoryError::ModelUnavailable(format!(
                "unsupported model type: {}",
                file.model_type
            )));
        }

        let metadata = ModelMetadata {
            model_path: source.to_string(),
            model_type: file.model_type,
            features: file.feature_names.clone(),
            target: file.target,
            checksum: checksum(bytes),
            loaded_at: Utc::now(),
        };
        let model = LinearModel::new(file.feature_names, file.coefficients, file.intercept)?;

        tracing::info!(
            "Model loaded: {} features, sha256 {}",
            metadata.features.len(),
            metadata.checksum
        );

        Ok(Self { model, metadata })
    }
}

fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// PREDICTION ENGINE
// ============================================================================

/// Read-only handle to the loaded model, shared across requests
#[derive(Clone)]
pub struct PredictionEngine {
    model: Arc<dyn Regressor>,
}

impl PredictionEngine {
    /// Wrap a model, rejecting one trained against a different feature layout
    pub fn new(model: Arc<dyn Regressor>) -> Result<Self, AdvisoryError> {
        let names = model.feature_names();
        if !matches_layout(names) {
            return Err(AdvisoryError::SchemaMismatch {
                expected: FEATURE_COUNT,
                detail: format!("in layout order, but model was trained on {:?}", names),
            });
        }

        Ok(Self { model })
    }

    pub fn from_artifact(artifact: &ModelArtifact) -> Result<Self, AdvisoryError> {
        Self::new(Arc::new(artifact.model.clone()))
    }

    pub fn feature_names(&self) -> &[String] {
        self.model.feature_names()
    }

    pub fn predict(&self, vector: &FeatureVector) -> Result<f64, AdvisoryError> {
        self.model.predict(vector.as_slice())
    }
}

impl std::fmt::Debug for PredictionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionEngine")
            .field("features", &self.model.feature_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::layout::FEATURE_LAYOUT;
    use std::io::Write;

    fn layout_names() -> Vec<String> {
        FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect()
    }

    fn artifact_json() -> String {
        serde_json::json!({
            "model_type": "linear_regression",
            "feature_names": FEATURE_LAYOUT,
            "coefficients": [2.5, 0.45, 0.2, -3.0, 2.0],
            "intercept": 10.0,
            "target": "Predicted Score"
        })
        .to_string()
    }

    #[test]
    fn test_linear_prediction() {
        let model = LinearModel::new(layout_names(), vec![2.5, 0.45, 0.2, -3.0, 2.0], 10.0).unwrap();
        let score = model.predict(&[6.0, 90.0, 95.0, 1.0, 1.0]).unwrap();
        assert!((score - 83.5).abs() < 1e-9);
    }

    #[test]
    fn test_feature_importance_normalized() {
        let model = LinearModel::new(layout_names(), vec![2.5, 0.5, 0.0, -1.0, 1.0], 10.0).unwrap();
        let importance = model.feature_importance();

        let names: Vec<&str> = importance.iter().map(|f| f.feature.as_str()).collect();
        assert_eq!(names, FEATURE_LAYOUT.to_vec());

        let values: Vec<f64> = importance.iter().map(|f| f.importance).collect();
        let expected = [0.5, 0.1, 0.0, 0.2, 0.2];
        for (actual, expected) in values.iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-12, "{} != {}", actual, expected);
        }
        assert!((values.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_feature_importance_all_zero_weights() {
        let model = LinearModel::new(layout_names(), vec![0.0; 5], 42.0).unwrap();
        assert!(model.feature_importance().iter().all(|f| f.importance == 0.0));
    }

    #[test]
    fn test_reject_wrong_vector_length() {
        let model = LinearModel::new(layout_names(), vec![1.0; 5], 0.0).unwrap();
        let result = model.predict(&[1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(AdvisoryError::SchemaMismatch { expected: 5, .. })));
    }

    #[test]
    fn test_reject_coefficient_count_mismatch() {
        let result = LinearModel::new(layout_names(), vec![1.0; 4], 0.0);
        assert!(matches!(result, Err(AdvisoryError::SchemaMismatch { .. })));
    }

    #[test]
    fn test_engine_rejects_reordered_features() {
        let mut names = layout_names();
        names.swap(0, 1);
        let model = LinearModel::new(names, vec![1.0; 5], 0.0).unwrap();
        let result = PredictionEngine::new(Arc::new(model));
        assert!(matches!(result, Err(AdvisoryError::SchemaMismatch { .. })));
    }

    #[test]
    fn test_load_artifact_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(artifact_json().as_bytes()).unwrap();

        let artifact = ModelArtifact::load(file.path()).unwrap();
        assert_eq!(artifact.metadata.features, layout_names());
        assert_eq!(artifact.metadata.checksum.len(), 64);
        assert_eq!(artifact.model.intercept(), 10.0);

        let engine = PredictionEngine::from_artifact(&artifact).unwrap();
        let vector = FeatureVector::from_values([1.0, 50.0, 60.0, 3.0, 0.0]);
        assert!((engine.predict(&vector).unwrap() - 38.0).abs() < 1e-9);
    }

    #[test]
    fn test_checksum_is_stable() {
        let a = ModelArtifact::from_slice(artifact_json().as_bytes(), "a").unwrap();
        let b = ModelArtifact::from_slice(artifact_json().as_bytes(), "b").unwrap();
        assert_eq!(a.metadata.checksum, b.metadata.checksum);
    }

    #[test]
    fn test_missing_artifact_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = ModelArtifact::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(AdvisoryError::ModelUnavailable(_))));
    }

    #[test]
    fn test_malformed_artifact_is_unavailable() {
        let result = ModelArtifact::from_slice(b"{not json", "inline");
        assert!(matches!(result, Err(AdvisoryError::ModelUnavailable(_))));

        let wrong_type = artifact_json().replace("linear_regression", "random_forest");
        let result = ModelArtifact::from_slice(wrong_type.as_bytes(), "inline");
        assert!(matches!(result, Err(AdvisoryError::ModelUnavailable(_))));
    }
}
