//! Prediction endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::desk::PredictionOutcome;
use crate::validation::PredictionForm;

use super::{malformed_body, validation_failed, ApiError, AppState};

/// `POST /predictions`: validate a submitted form, classify it and record
/// it as the latest prediction.
///
/// Responds `200` with the classification, its headline and whether it was
/// promoted to an alert; `400` when validation fails or the body is not a
/// well-formed prediction form.
pub async fn create_prediction(
    State(state): State<AppState>,
    payload: Result<Json<PredictionForm>, JsonRejection>,
) -> Result<Json<PredictionOutcome>, ApiError> {
    let Json(form) = payload.map_err(|rejection| malformed_body(&state, rejection))?;
    let outcome = state
        .desk
        .write()
        .await
        .predict(&form)
        .map_err(|err| validation_failed(&state, err))?;

    state
        .metrics
        .record_classification(&outcome.view.result, outcome.view.promoted);

    Ok(Json(outcome))
}
