//! Alert and dashboard views.
//!
//! Both endpoints are read-only projections of the alert desk: they take a
//! read lock, build the view and release it.

use axum::{extract::State, Json};

use crate::coordinator::{AlertView, DashboardView};

use super::AppState;

/// `GET /alerts`: latest prediction, every active warning, and the
/// active-warnings banner (absent when there are none).
pub async fn get_alert_view(State(state): State<AppState>) -> Json<AlertView> {
    Json(state.desk.read().await.alert_view())
}

/// `GET /dashboard`: banner, a preview of the first warnings and the total.
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    Json(state.desk.read().await.dashboard_view())
}
