use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::path::PathBuf;
use std::time::Duration;
use strum_macros::{Display, EnumString};
use url::Url;

const APP_ENVIRONMENT: &str = "APP_ENVIRONMENT";
const DEFAULT_ENVIRONMENT: &str = "local";
const BASE_CONFIGURATION: &str = "application";
const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Weather lookup web service")]
pub struct CliOptions {
    /// Explicit configuration file applied over the resources directory layering.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Secrets configuration file, e.g. holding `weather.api_key`.
    #[arg(short, long)]
    pub secrets: Option<PathBuf>,

    /// Environment overlay to load from the resources directory; falls back to `APP_ENVIRONMENT`.
    #[arg(short, long)]
    pub env: Option<String>,

    /// Directory holding `application.yaml` and environment overlays.
    #[arg(long, default_value = "resources")]
    pub resources: PathBuf,
}

impl CliOptions {
    pub const fn env_app_environment() -> &'static str {
        APP_ENVIRONMENT
    }

    fn environment(&self) -> String {
        self.env
            .clone()
            .or_else(|| std::env::var(APP_ENVIRONMENT).ok())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
            .to_lowercase()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api: HttpApiSettings,
    pub weather: WeatherServiceSettings,
}

impl Settings {
    /// Layers, lowest precedence first: `<resources>/application`, `<resources>/<environment>`,
    /// the `--config` file, the `--secrets` file, then `APP__`-prefixed environment variables
    /// (e.g. `APP__WEATHER__API_KEY`).
    #[tracing::instrument(level = "debug")]
    pub fn load(options: &CliOptions) -> Result<Self, ConfigError> {
        let environment = options.environment();
        tracing::info!(%environment, resources=?options.resources, "loading settings");

        let mut builder = Config::builder()
            .add_source(File::from(options.resources.join(BASE_CONFIGURATION)).required(true))
            .add_source(File::from(options.resources.join(&environment)).required(false));

        if let Some(config) = &options.config {
            builder = builder.add_source(File::from(config.as_path()).required(true));
        }

        if let Some(secrets) = &options.secrets {
            builder = builder.add_source(File::from(secrets.as_path()).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct HttpApiSettings {
    pub server: HttpServerSettings,

    /// Upper bound on handling one inbound request.
    #[serde(rename = "timeout_secs")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpServerSettings {
    pub host: String,
    pub port: u16,
}

impl HttpServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherServiceSettings {
    #[serde(default)]
    pub mode: WeatherServiceMode,

    /// Current weather endpoint, e.g. `https://api.openweathermap.org/data/2.5/weather`.
    pub base_url: Url,

    #[serde(default)]
    pub api_key: Option<Secret<String>>,

    /// Upper bound on the outbound provider call.
    #[serde(rename = "timeout_secs")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub timeout: Duration,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Display, EnumString, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WeatherServiceMode {
    /// Query the configured provider.
    #[default]
    Live,

    /// Answer every lookup with fixed conditions; for demos without an API key.
    HappyPath,
}
