use anyhow::{Context, Result};
use log::info;

use climate_api::cli::{build_cli, handle_subcommands, serve};
use climate_api::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let config = Config::from_matches(&matches).context("Failed to load configuration")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    info!("🌤️  Climate API v{}", climate_api::VERSION);

    if handle_subcommands(&matches, &config).await? {
        return Ok(());
    }

    serve(config).await.context("API server failed")?;
    Ok(())
}
