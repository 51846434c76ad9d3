use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = weather_lookup::tracing::get_tracing_subscriber("info");
    weather_lookup::tracing::init_subscriber(subscriber);

    let options = parse_options();
    let settings = load_settings(&options)?;

    let server = weather_lookup::Server::build(&settings).await?;
    server.run_until_stopped().await.map_err(|err| err.into())
}

fn parse_options() -> weather_lookup::CliOptions {
    let options = weather_lookup::CliOptions::parse();
    if options.secrets.is_none() {
        tracing::warn!("No secrets configuration provided. The weather provider API key should be confined in a secret configuration or supplied via the environment.");
    }

    options
}

fn load_settings(options: &weather_lookup::CliOptions) -> anyhow::Result<weather_lookup::Settings> {
    let app_environment = std::env::var(weather_lookup::CliOptions::env_app_environment()).ok();
    if app_environment.is_none() && options.env.is_none() {
        tracing::info!("No environment configuration override provided.");
    }

    let settings = weather_lookup::Settings::load(options)?;
    tracing::info!(?settings, "settings loaded");
    Ok(settings)
}
