use super::result::{HttpResult, WeatherReply};
use super::state::AppState;
use crate::model::LocationQuery;
use crate::services::{WeatherApi, WeatherServices};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::{routing, Router};
use serde::Deserialize;
use utoipa::IntoParams;

pub fn api() -> Router<AppState> {
    Router::new().route("/weather", routing::get(query_weather))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeatherParams {
    /// Free-text place name, e.g. `London` or `Paris,FR`. Also accepted as `location`.
    #[serde(alias = "location")]
    address: Option<String>,
}

/// Looks up current weather for a location. Lookup failures, including a missing location,
/// still answer `200 OK` with an `{"error": ...}` body.
#[utoipa::path(
    get,
    path = "/weather",
    tag = "weather",
    params(WeatherParams),
    responses(
        (status = 200, description = "Current conditions, or an `ErrorReport` when the lookup failed", body = crate::model::WeatherResult),
        (status = 400, description = "Malformed query string", body = super::result::ErrorReport),
    ),
)]
#[tracing::instrument(level = "debug", skip(services))]
pub async fn query_weather(
    State(services): State<WeatherServices>, params: Result<Query<WeatherParams>, QueryRejection>,
) -> HttpResult {
    let Query(params) = params?;

    let outcome = match LocationQuery::from_param(params.address.as_deref()) {
        Ok(location) => services.current_weather(&location).await,
        Err(error) => Err(error),
    };

    match &outcome {
        Ok(result) => tracing::info!(?result, "weather lookup succeeded"),
        Err(error) => tracing::info!(%error, kind = error.kind(), "weather lookup failed"),
    }

    Ok(WeatherReply::from(outcome).into_response())
}
