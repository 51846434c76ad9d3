use crate::services::WeatherServices;
use axum::extract::FromRef;
use std::fmt;

#[tracing::instrument(level = "trace", skip(weather_services))]
pub fn initialize_app_state(weather_services: WeatherServices) -> AppState {
    AppState { weather_services }
}

/// Request-independent, immutable application state; cloned into each handler.
#[derive(Clone)]
pub struct AppState {
    pub weather_services: WeatherServices,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish()
    }
}

impl FromRef<AppState> for WeatherServices {
    fn from_ref(app: &AppState) -> Self {
        app.weather_services.clone()
    }
}
