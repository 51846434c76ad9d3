mod errors;
mod health_routes;
mod pages;
mod result;
mod state;
mod weather_routes;

use crate::services::WeatherServices;
use crate::settings::HttpApiSettings;
use crate::Settings;
pub use errors::ApiError;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::{routing, BoxError, Json, Router};
use std::net::TcpListener;
use tokio::signal;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::ServiceBuilderExt;
use utoipa::OpenApi;

pub type HttpJoinHandle = JoinHandle<Result<(), ApiError>>;

pub struct Server {
    port: u16,
    server_handle: HttpJoinHandle,
}

impl Server {
    #[tracing::instrument(level = "debug", skip(settings))]
    pub async fn build(settings: &Settings) -> Result<Self, ApiError> {
        let weather_services = WeatherServices::from_settings(&settings.weather)?;
        let address = settings.api.server.address();
        let listener = tokio::net::TcpListener::bind(&address).await?;
        tracing::info!(
            "{:?} API listening on {address}: {listener:?}",
            std::env::current_exe()
        );
        let std_listener = listener.into_std()?;
        let port = std_listener.local_addr()?.port();

        let server_handle = run_http_server(
            std_listener,
            weather_services,
            &RunParameters::from_settings(settings),
        )?;

        Ok(Self { port, server_handle })
    }

    pub const fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), ApiError> {
        self.server_handle.await?
    }
}

#[derive(Debug, Clone)]
pub struct RunParameters {
    pub http_api: HttpApiSettings,
}

impl RunParameters {
    pub fn from_settings(settings: &Settings) -> Self {
        Self { http_api: settings.api.clone() }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(weather_routes::query_weather, health_routes::health),
    components(schemas(
        crate::model::WeatherResult,
        result::ErrorReport,
        health_routes::HealthReport,
        health_routes::Health
    )),
    tags(
        (name = "weather", description = "Current weather lookup"),
        (name = "health", description = "Service liveness")
    )
)]
pub struct ApiDoc;

#[tracing::instrument(level = "trace", skip(weather_services))]
pub fn run_http_server(
    listener: TcpListener, weather_services: WeatherServices, params: &RunParameters,
) -> Result<HttpJoinHandle, ApiError> {
    let state = state::initialize_app_state(weather_services);

    let middleware_stack = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_api_error))
        .timeout(params.http_api.timeout)
        .compression()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .propagate_x_request_id();

    let app = Router::new()
        .merge(pages::api())
        .merge(weather_routes::api())
        .merge(health_routes::api())
        .route("/api-doc/openapi.json", routing::get(openapi_doc))
        .fallback(pages::not_found)
        .with_state(state)
        .layer(middleware_stack);

    let server = axum::Server::from_tcp(listener)?;
    let handle = tokio::spawn(async move {
        tracing::debug!(app_routes=?app, "starting API server...");
        let server = server.serve(app.into_make_service());
        let graceful = server.with_graceful_shutdown(shutdown_signal());
        graceful.await?;
        tracing::info!("{:?} API shutting down", std::env::current_exe());
        Ok::<(), ApiError>(())
    });

    Ok(handle)
}

async fn openapi_doc() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn handle_api_error(error: BoxError) -> (StatusCode, String) {
    if error.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, format!("REQUEST TIMEOUT: {error}"))
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("INTERNAL SERVER ERROR: {error}"),
        )
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
}
