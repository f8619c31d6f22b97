//! Prediction handlers

use axum::{extract::{rejection::JsonRejection, State}, Json};
use serde::Serialize;
use serde_json::Value;

use crate::{AppState, AppError, AppResult};
use crate::advisor::{AdvisoryError, AdvisoryResult, RawInput};
use crate::error::PREDICTION_FAILED;

/// Predict a score with study recommendations and risk assessment
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<AdvisoryResult>> {
    let Json(body) = body?;

    let raw = RawInput::try_from(body)?;
    let result = state.advisor.handle(&raw).map_err(|e| {
        if e.is_validation() {
            tracing::warn!("Rejected prediction request: {}", e);
        }
        AppError::from(e)
    })?;

    Ok(Json(result))
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<BatchItem>,
}

/// Outcome for one record, in request order
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    Success { index: usize, result: AdvisoryResult },
    Failure { index: usize, error: String },
}

/// Predict every record in a JSON array; records succeed or fail independently
pub async fn predict_batch(
    State(state): State<AppState>,
    body: Result<Json<Vec<Value>>, JsonRejection>,
) -> AppResult<Json<BatchResponse>> {
    let Json(items) = body?;

    if items.is_empty() {
        return Err(AppError::ValidationError("No data available for prediction".to_string()));
    }

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            RawInput::try_from(item).map_err(|_| {
                AppError::ValidationError(format!(
                    "Invalid input values: record {} is not a JSON object",
                    index
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let results: Vec<BatchItem> = state
        .advisor
        .handle_batch(&records)
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| match outcome {
            Ok(result) => BatchItem::Success { index, result },
            Err(e) => BatchItem::Failure { index, error: batch_error_message(index, e) },
        })
        .collect();

    let failed = results.iter().filter(|r| matches!(r, BatchItem::Failure { .. })).count();

    Ok(Json(BatchResponse {
        total: results.len(),
        succeeded: results.len() - failed,
        failed,
        results,
    }))
}

/// Validation messages pass through; anything else stays generic
fn batch_error_message(index: usize, err: AdvisoryError) -> String {
    if err.is_validation() {
        err.to_string()
    } else {
        tracing::error!("Batch record {} failed: {}", index, err);
        PREDICTION_FAILED.to_string()
    }
}
