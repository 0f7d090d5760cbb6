use axum::{http::header, response::IntoResponse};

/// `GET /health`: always `200 ok`, never cached.
pub async fn health() -> impl IntoResponse {
    ([(header::CACHE_CONTROL, "no-store")], "ok")
}
