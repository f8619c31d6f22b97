//! Advisory Types
//!
//! Data structures only, no logic.

use serde::{Deserialize, Serialize};

use super::codec::FeatureVector;

/// What every advisory rule is evaluated against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleInput {
    pub prediction: f64,
    pub vector: FeatureVector,
}

impl RuleInput {
    pub fn new(prediction: f64, vector: FeatureVector) -> Self {
        Self { prediction, vector }
    }
}

/// At-risk flag plus contributing factors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub at_risk: bool,
    pub factors: Vec<String>,
}

/// Response for one prediction request, built fresh per request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryResult {
    pub predicted_score: f64,
    pub study_recommendations: Vec<String>,
    pub risk_assessment: RiskAssessment,
}
