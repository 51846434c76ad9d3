use crate::services::WeatherServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid URL query input: {0}")]
    Query(#[from] axum::extract::rejection::QueryRejection),

    #[error("{0}")]
    IO(#[from] std::io::Error),

    #[error("HTTP engine error: {0}")]
    HttpEngine(#[from] hyper::Error),

    #[error("failed joining with thread: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("failed to initialize weather services: {0}")]
    WeatherServices(#[from] WeatherServiceError),
}
