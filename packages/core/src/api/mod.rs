//! HTTP presentation layer.
//!
//! Routes:
//! - `GET    /health`         liveness check
//! - `POST   /predictions`    validate and classify a set of measurements
//! - `GET    /alerts`         latest prediction merged with active warnings
//! - `GET    /dashboard`      banner plus a short warning preview
//! - `GET    /warnings`       list active warnings
//! - `POST   /warnings`       issue a warning
//! - `DELETE /warnings/:id`   withdraw a warning
//! - `GET    /metrics`        Prometheus exposition

pub mod alerts;
pub mod health;
pub mod predictions;
pub mod warnings;

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, MatchedPath, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::desk::AlertDesk;
use crate::error::ValidationError;
use crate::metrics::AppMetrics;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub desk: Arc<RwLock<AlertDesk>>,
    pub metrics: Arc<AppMetrics>,
}

impl AppState {
    pub fn new(desk: AlertDesk, metrics: AppMetrics) -> Self {
        Self {
            desk: Arc::new(RwLock::new(desk)),
            metrics: Arc::new(metrics),
        }
    }
}

/// Error shape used by every handler: `{"error": "..."}`.
pub type ApiError = (StatusCode, Json<Value>);

pub(crate) fn error_response(status: StatusCode, message: impl ToString) -> ApiError {
    (status, Json(json!({ "error": message.to_string() })))
}

pub(crate) fn validation_failed(state: &AppState, err: ValidationError) -> ApiError {
    state.metrics.validation_failures_total.inc();
    error_response(StatusCode::BAD_REQUEST, err)
}

/// A body that is not JSON, or whose fields have the wrong JSON types, is a
/// validation failure like any other: `400 {"error": ...}`.
pub(crate) fn malformed_body(state: &AppState, rejection: JsonRejection) -> ApiError {
    state.metrics.validation_failures_total.inc();
    error_response(StatusCode::BAD_REQUEST, rejection.body_text())
}

/// Assemble the complete router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/predictions", post(predictions::create_prediction))
        .route("/alerts", get(alerts::get_alert_view))
        .route("/dashboard", get(alerts::get_dashboard))
        .route(
            "/warnings",
            get(warnings::list_warnings).post(warnings::create_warning),
        )
        .route("/warnings/:id", delete(warnings::delete_warning))
        .route("/metrics", get(render_metrics))
        .route_layer(middleware::from_fn_with_state(state.clone(), track_requests))
        .route("/health", get(health::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `GET /metrics` in Prometheus text format.
async fn render_metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let body = state
        .metrics
        .render()
        .map_err(|err| error_response(StatusCode::INTERNAL_SERVER_ERROR, err))?;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; version=0.0.4")
        .body(Body::from(body))
        .expect("metrics response should be valid"))
}

async fn track_requests(
    State(state): State<AppState>,
    matched_path: Option<MatchedPath>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = matched_path
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;

    state
        .metrics
        .http_requests_total
        .with_label_values(&[method.as_str(), path.as_str(), response.status().as_str()])
        .inc();

    response
}
