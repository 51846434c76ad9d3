use super::errors::ApiError;
use crate::errors::WeatherError;
use crate::model::WeatherResult;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type HttpResult = Result<Response, ApiError>;

/// Outcome of a weather lookup as the widget consumes it. Both variants answer `200 OK`; a
/// failed lookup is reported through the `error` field rather than the status code.
#[derive(Debug)]
pub enum WeatherReply {
    Found(WeatherResult),
    Failed(WeatherError),
}

impl From<Result<WeatherResult, WeatherError>> for WeatherReply {
    fn from(outcome: Result<WeatherResult, WeatherError>) -> Self {
        match outcome {
            Ok(result) => Self::Found(result),
            Err(error) => Self::Failed(error),
        }
    }
}

impl IntoResponse for WeatherReply {
    fn into_response(self) -> Response {
        match self {
            Self::Found(result) => (StatusCode::OK, Json(result)).into_response(),
            Self::Failed(error) => (StatusCode::OK, Json(ErrorReport::from(&error))).into_response(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        HttpError::from_error(self).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, ToSchema, Serialize, Deserialize)]
#[schema(example = json!({"error": "Unable to get the data :( TRY AGAIN"}))]
pub struct ErrorReport {
    pub error: String,
}

impl From<&WeatherError> for ErrorReport {
    fn from(error: &WeatherError) -> Self {
        Self { error: error.to_string() }
    }
}

impl From<&ApiError> for ErrorReport {
    fn from(error: &ApiError) -> Self {
        Self { error: error.to_string() }
    }
}

#[derive(Debug, Clone)]
pub enum HttpError {
    BadRequest { error: ErrorReport },
    Internal { error: ErrorReport },
}

impl HttpError {
    fn from_error(error: ApiError) -> Self {
        tracing::error!("HTTP handler error: {error}");
        match error {
            ApiError::Query(_) => Self::BadRequest { error: (&error).into() },

            // explicit list so new ApiError variants get a compiler-enforced review here
            ApiError::IO(_)
            | ApiError::HttpEngine(_)
            | ApiError::Join(_)
            | ApiError::WeatherServices(_) => Self::Internal { error: (&error).into() },
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest { error } => (StatusCode::BAD_REQUEST, Json(error)).into_response(),
            Self::Internal { error } => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
        }
    }
}
