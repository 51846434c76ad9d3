use crate::errors::WeatherError;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// A user-supplied, free-text place name. Guaranteed non-blank; surrounding whitespace is
/// removed. The value is untrusted and is only ever sent to the provider as an encoded query
/// parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct LocationQuery(String);

impl LocationQuery {
    /// Interprets an optional request parameter. Absent, empty and whitespace-only input are all
    /// treated as missing.
    pub fn from_param(param: Option<&str>) -> Result<Self, WeatherError> {
        param.ok_or(WeatherError::MissingInput).and_then(Self::try_from)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<&str> for LocationQuery {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(WeatherError::MissingInput);
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current conditions normalized from a provider response.
#[derive(Debug, Clone, PartialEq, ToSchema, Serialize, Deserialize)]
#[schema(example = json!({"temperature": 300.15, "description": "clear sky", "cityName": "London"}))]
#[serde(rename_all = "camelCase")]
pub struct WeatherResult {
    /// Temperature in Kelvin.
    temperature: f64,

    /// Lowercase condition text as reported by the provider, e.g. "scattered clouds".
    description: String,

    /// Place name as resolved by the provider; may carry a ", <country-code>" suffix.
    city_name: String,
}

impl WeatherResult {
    pub fn new(temperature: f64, description: impl Into<String>, city_name: impl Into<String>) -> Self {
        Self {
            temperature,
            description: description.into(),
            city_name: city_name.into(),
        }
    }

    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn city_name(&self) -> &str {
        self.city_name.as_str()
    }
}
