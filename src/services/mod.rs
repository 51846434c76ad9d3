mod openweather;

pub use openweather::{HappyPathWeatherServices, OpenWeatherApi};

use crate::errors::WeatherError;
use crate::model::{LocationQuery, WeatherResult};
use crate::settings::{WeatherServiceMode, WeatherServiceSettings};
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Source of current weather conditions for a location.
///
/// Every failure resolves into a [`WeatherError`]; an implementation makes at most one outbound
/// call per lookup and never retries.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn current_weather(&self, location: &LocationQuery) -> Result<WeatherResult, WeatherError>;
}

#[derive(Debug, Clone)]
pub enum WeatherServices {
    OpenWeather(OpenWeatherApi),
    HappyPath(HappyPathWeatherServices),
}

impl WeatherServices {
    pub fn from_settings(settings: &WeatherServiceSettings) -> Result<Self, WeatherServiceError> {
        match settings.mode {
            WeatherServiceMode::Live => {
                let api_key = settings
                    .api_key
                    .clone()
                    .ok_or(WeatherServiceError::MissingApiKey)?;
                let api = OpenWeatherApi::new(settings.base_url.clone(), api_key, settings.timeout)?;
                Ok(Self::OpenWeather(api))
            },

            WeatherServiceMode::HappyPath => {
                tracing::warn!("weather services running in happy-path mode; no provider calls are made");
                Ok(Self::HappyPath(HappyPathWeatherServices))
            },
        }
    }
}

#[async_trait]
impl WeatherApi for WeatherServices {
    async fn current_weather(&self, location: &LocationQuery) -> Result<WeatherResult, WeatherError> {
        match self {
            Self::OpenWeather(svc) => svc.current_weather(location).await,
            Self::HappyPath(svc) => svc.current_weather(location).await,
        }
    }
}

/// Failures while setting up weather services at startup.
#[derive(Debug, Error)]
pub enum WeatherServiceError {
    #[error("supplied Weather API url is not a base url to query: {0}")]
    NotABaseUrl(Url),

    #[error("no API key configured for the live weather provider")]
    MissingApiKey,

    #[error("failed to build Weather API HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
