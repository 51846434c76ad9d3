#![forbid(unsafe_code)]
#![warn(clippy::cargo, clippy::suspicious, rust_2018_idioms)]
#![allow(clippy::multiple_crate_versions)]

mod errors;
mod model;
mod server;
mod services;
mod settings;
pub mod tracing;

pub use errors::WeatherError;
pub use model::{LocationQuery, WeatherResult};
pub use server::{ApiError, Server};
pub use services::{
    HappyPathWeatherServices, OpenWeatherApi, WeatherApi, WeatherServiceError, WeatherServices,
};
pub use settings::{
    CliOptions, HttpApiSettings, HttpServerSettings, Settings, WeatherServiceMode,
    WeatherServiceSettings,
};
