use clap::{Arg, ArgMatches, Command};
use log::info;

use crate::config::Config;
use crate::services::{ApiService, ClimateService};
use crate::utils::error::ClimateError;

pub fn build_cli() -> Command {
    Command::new("climate-api")
        .version(crate::VERSION)
        .about("Read-only HTTP API over a SQLite climate measurement dataset")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("database")
                .short('d')
                .long("database")
                .value_name("PATH")
                .help("SQLite database file (overrides database.database_path)"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Address to bind (overrides server.host)"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port to bind (overrides server.port)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log filter when RUST_LOG is unset (overrides logging.level)"),
        )
        .subcommand(Command::new("serve").about("Start the HTTP API (default)"))
        .subcommand(Command::new("check").about("Verify the database schema and print dataset statistics"))
        .subcommand(
            Command::new("init-config")
                .about("Write the default configuration to a TOML file")
                .arg(Arg::new("path").required(true).value_name("PATH")),
        )
}

/// Runs one-shot subcommands. Returns `false` when the caller should serve.
pub async fn handle_subcommands(matches: &ArgMatches, config: &Config) -> Result<bool, ClimateError> {
    if matches.subcommand_matches("check").is_some() {
        info!("🔍 Executing check command...");

        let service = ClimateService::new(config).await?;
        let stats = service.dataset_stats().await?;
        service.close().await;

        println!("Database:      {}", config.database.database_path);
        println!("Stations:      {}", stats.station_count);
        println!("Measurements:  {}", stats.measurement_count);
        println!(
            "Date range:    {} .. {}",
            stats.earliest_date.as_deref().unwrap_or("-"),
            stats.latest_date.as_deref().unwrap_or("-")
        );

        return Ok(true);
    }

    if let Some(matches) = matches.subcommand_matches("init-config") {
        let path = matches
            .get_one::<String>("path")
            .ok_or_else(|| ClimateError::ConfigError("init-config requires a path".to_string()))?;

        config.save_to_file(path)?;
        println!("✅ Configuration written to {}", path);

        return Ok(true);
    }

    Ok(false)
}

pub async fn serve(config: Config) -> Result<(), ClimateError> {
    let climate_service = ClimateService::new(&config).await?;

    let stats = climate_service.dataset_stats().await?;
    info!(
        "📊 Dataset: {} measurements across {} stations ({} .. {})",
        stats.measurement_count,
        stats.station_count,
        stats.earliest_date.as_deref().unwrap_or("-"),
        stats.latest_date.as_deref().unwrap_or("-")
    );

    let mut api_service = ApiService::new(config, climate_service);
    api_service.start().await?;

    tokio::signal::ctrl_c().await?;
    info!("Received Ctrl-C, shutting down");

    api_service.stop().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_init_config_requires_path() {
        assert!(build_cli().try_get_matches_from(["climate-api", "init-config"]).is_err());
    }

    #[tokio::test]
    async fn test_init_config_writes_loadable_toml() {
        let path = std::env::temp_dir().join(format!("climate-api-{}.toml", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        let matches = build_cli().get_matches_from(["climate-api", "--port", "8123", "init-config", &path_str]);
        let config = Config::from_matches(&matches).unwrap();

        assert!(handle_subcommands(&matches, &config).await.unwrap());

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.server.port, 8123);
        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_serve_falls_through() {
        let matches = build_cli().get_matches_from(["climate-api", "serve"]);
        let config = Config::default();
        assert!(!handle_subcommands(&matches, &config).await.unwrap());
    }
}
