use super::state::AppState;
use axum::{routing, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub fn api() -> Router<AppState> {
    Router::new().route("/health", routing::get(health))
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ToSchema, Serialize, Deserialize)]
pub enum Health {
    Up,
}

#[derive(Debug, Clone, PartialEq, Eq, ToSchema, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: Health,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthReport),
    ),
)]
pub async fn health() -> Json<HealthReport> {
    Json(HealthReport { status: Health::Up })
}
