use super::{WeatherApi, WeatherServiceError};
use crate::errors::WeatherError;
use crate::model::{LocationQuery, WeatherResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client for the OpenWeatherMap current weather API.
#[derive(Debug, Clone)]
pub struct OpenWeatherApi {
    client: reqwest::Client,
    base_url: Url,
    api_key: Secret<String>,
}

impl OpenWeatherApi {
    pub fn new(
        base_url: impl Into<Url>, api_key: Secret<String>, timeout: Duration,
    ) -> Result<Self, WeatherServiceError> {
        let base_url = base_url.into();
        if base_url.cannot_be_a_base() {
            return Err(WeatherServiceError::NotABaseUrl(base_url));
        }

        let client = Self::make_http_client(timeout)?;
        Ok(Self { client, base_url, api_key })
    }

    fn make_http_client(timeout: Duration) -> Result<reqwest::Client, WeatherServiceError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .default_headers(headers)
            .pool_max_idle_per_host(5)
            .timeout(timeout)
            .build()?;

        Ok(client)
    }

    /// Query URL for a location; the location and key are form-encoded into the query string
    /// (a space travels as `+`), after any parameters already present on the base url.
    fn endpoint_for(&self, location: &LocationQuery) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", location.as_str())
            .append_pair("appid", self.api_key.expose_secret());
        url
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn fetch_json(&self, location: &LocationQuery) -> Result<serde_json::Value, WeatherError> {
        const LABEL: &str = "current_weather";

        let response = self
            .client
            .get(self.endpoint_for(location))
            .send()
            .await
            .map_err(|error| {
                let error = error.without_url();
                tracing::warn!(%error, %location, "{LABEL}: weather provider call failed");
                WeatherError::transport(error)
            })?;
        log_response(LABEL, &self.base_url, &response);

        let status_code = response.status();
        let body = response.bytes().await.map_err(|error| {
            let error = error.without_url();
            tracing::warn!(%error, ?status_code, "{LABEL}: failed to read weather provider response");
            WeatherError::transport(error)
        })?;

        serde_json::from_slice(&body).map_err(|error| {
            tracing::warn!(
                %error, ?status_code, body=%String::from_utf8_lossy(&body),
                "{LABEL}: weather provider response is not JSON"
            );
            WeatherError::transport(error)
        })
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherApi {
    #[tracing::instrument(level = "debug", skip(self, location), fields(%location))]
    async fn current_weather(&self, location: &LocationQuery) -> Result<WeatherResult, WeatherError> {
        let body = self.fetch_json(location).await?;
        tracing::debug!(%body, "current weather response body");
        normalize(body)
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherBody {
    main: Option<MainReadings>,
    weather: Option<Vec<serde_json::Value>>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: Option<String>,
}

/// Extracts temperature, description and city name from a decoded current weather payload.
///
/// Fields are checked for presence, not value: a temperature of zero is valid. Absent, `null`
/// or mistyped fields yield [`WeatherError::IncompleteProviderData`].
pub(crate) fn normalize(body: serde_json::Value) -> Result<WeatherResult, WeatherError> {
    let body: CurrentWeatherBody = serde_json::from_value(body).map_err(|error| {
        tracing::debug!(%error, "weather provider payload has unexpected shape");
        WeatherError::IncompleteProviderData
    })?;

    let temperature = body
        .main
        .and_then(|main| main.temp)
        .ok_or(WeatherError::IncompleteProviderData)?;

    // only the leading condition is read; later entries may take any shape
    let description = body
        .weather
        .and_then(|conditions| conditions.into_iter().next())
        .and_then(|condition| serde_json::from_value::<Condition>(condition).ok())
        .and_then(|condition| condition.description)
        .ok_or(WeatherError::IncompleteProviderData)?;

    let city_name = body.name.ok_or(WeatherError::IncompleteProviderData)?;

    Ok(WeatherResult::new(temperature, description, city_name))
}

fn log_response(label: &str, endpoint: &Url, response: &reqwest::Response) {
    const MESSAGE: &str = "response recd from openweathermap.org";
    let status = response.status();
    let headers = response.headers();
    if status.is_success() || status.is_informational() {
        tracing::debug!(%endpoint, ?status, ?headers, "{label}: {MESSAGE}");
    } else {
        tracing::warn!(%endpoint, ?status, ?headers, "{label}: {MESSAGE}");
    }
}

/// Stand-in weather source returning fixed conditions for any location.
#[derive(Debug, Copy, Clone)]
pub struct HappyPathWeatherServices;

#[async_trait]
impl WeatherApi for HappyPathWeatherServices {
    async fn current_weather(&self, location: &LocationQuery) -> Result<WeatherResult, WeatherError> {
        Ok(WeatherResult::new(293.15, "scattered clouds", location.as_str()))
    }
}
