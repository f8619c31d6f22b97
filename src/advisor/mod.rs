//! Advisor Module - Prediction & Advisory Pipeline
//!
//! Feature codec, prediction engine, recommendation and risk rule tables,
//! and the service that runs them in sequence. No HTTP types here.

pub mod layout;
pub mod codec;
pub mod engine;
pub mod thresholds;
pub mod recommend;
pub mod risk;
pub mod service;
pub mod types;
pub mod error;

// Re-export common types
pub use codec::{encode, Difficulty, FeatureVector, InternetAccess, RawInput};
pub use engine::{FeatureImportance, LinearModel, ModelArtifact, ModelMetadata, PredictionEngine, Regressor};
pub use error::AdvisoryError;
pub use service::AdvisoryService;
pub use thresholds::AT_RISK_THRESHOLD;
pub use types::{AdvisoryResult, RiskAssessment, RuleInput};
