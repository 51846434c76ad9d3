use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Bunyan-formatted JSON subscriber writing to stdout. `RUST_LOG` overrides `log_directives`.
pub fn get_tracing_subscriber(log_directives: impl AsRef<str>) -> impl Subscriber + Sync + Send {
    get_tracing_subscriber_with_sink(log_directives, std::io::stdout)
}

pub fn get_tracing_subscriber_with_sink<S>(
    log_directives: impl AsRef<str>, sink: S,
) -> impl Subscriber + Sync + Send
where
    S: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directives.as_ref()));

    let formatting_layer = BunyanFormattingLayer::new(APP_NAME.to_string(), sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Registers the subscriber as global default and routes `log` records into it. Call once.
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) {
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}
