//! Advisory Service
//!
//! Orchestrates one request: encode -> predict -> recommend -> assess.
//! All-or-nothing; no partial result is ever returned. A batch applies the
//! same rule to each record independently.

use super::codec::{encode, RawInput};
use super::engine::PredictionEngine;
use super::error::AdvisoryError;
use super::recommend::recommend;
use super::risk::assess;
use super::types::{AdvisoryResult, RuleInput};

#[derive(Debug, Clone)]
pub struct AdvisoryService {
    engine: PredictionEngine,
}

impl AdvisoryService {
    pub fn new(engine: PredictionEngine) -> Self {
        Self { engine }
    }

    /// Features the served model was trained on
    pub fn feature_names(&self) -> &[String] {
        self.engine.feature_names()
    }

    /// Predict a score and derive recommendations and risk factors
    pub fn handle(&self, raw: &RawInput) -> Result<AdvisoryResult, AdvisoryError> {
        let vector = encode(raw)?;
        tracing::debug!("Encoded features: {}", vector.to_log_entry());

        let prediction = match self.engine.predict(&vector) {
            Ok(score) if score.is_finite() => score,
            Ok(score) => {
                return Err(AdvisoryError::Internal(format!(
                    "model produced non-finite score {}",
                    score
                )))
            }
            // Validation kinds cannot originate past the codec
            Err(e) if e.is_validation() => return Err(AdvisoryError::Internal(e.to_string())),
            Err(e) => return Err(e),
        };

        let input = RuleInput::new(prediction, vector);
        let result = AdvisoryResult {
            predicted_score: prediction,
            study_recommendations: recommend(&input),
            risk_assessment: assess(&input),
        };

        tracing::debug!(
            "Predicted {:.2} (at_risk: {}, {} recommendations)",
            prediction,
            result.risk_assessment.at_risk,
            result.study_recommendations.len()
        );

        Ok(result)
    }

    /// Run `handle` over every record; one record failing does not affect the others
    pub fn handle_batch(&self, records: &[RawInput]) -> Vec<Result<AdvisoryResult, AdvisoryError>> {
        let results: Vec<_> = records.iter().map(|raw| self.handle(raw)).collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        tracing::info!("Batch prediction: {} records, {} failed", records.len(), failed);

        results
    }
}
