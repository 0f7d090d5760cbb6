//! CRUD endpoints for operator-issued warnings.
//!
//! Routes:
//! - `POST   /warnings`      issue a new warning
//! - `GET    /warnings`      list active warnings in issue order
//! - `DELETE /warnings/:id`  withdraw a warning

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::registry::Warning;
use crate::validation::WarningDraft;

use super::{error_response, malformed_body, validation_failed, ApiError, AppState};

/// `POST /warnings`: validate and issue a warning.
pub async fn create_warning(
    State(state): State<AppState>,
    payload: Result<Json<WarningDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Warning>), ApiError> {
    let Json(draft) = payload.map_err(|rejection| malformed_body(&state, rejection))?;
    let mut desk = state.desk.write().await;
    let warning = desk
        .issue_warning(&draft)
        .map_err(|err| validation_failed(&state, err))?;

    state.metrics.active_warnings.set(desk.active_warning_count() as f64);

    Ok((StatusCode::CREATED, Json(warning)))
}

/// `GET /warnings`: snapshot of all active warnings.
pub async fn list_warnings(State(state): State<AppState>) -> Json<Vec<Warning>> {
    Json(state.desk.read().await.warnings())
}

/// `DELETE /warnings/:id`: `204` when withdrawn, `404` when no such warning.
pub async fn delete_warning(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let mut desk = state.desk.write().await;
    let removed = desk.withdraw_warning(id);
    state.metrics.active_warnings.set(desk.active_warning_count() as f64);

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(error_response(StatusCode::NOT_FOUND, "Warning not found"))
    }
}
