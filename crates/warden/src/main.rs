//! Warden CLI binary.
//!
//! This binary wires the guard together:
//! - Load bootstrap settings and the persisted guard configuration
//! - Serve the keep-alive endpoint
//! - Connect to Discord and enforce until interrupted

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use warden::{ConfigStore, LoggingConfig, Settings, WardenBot, health, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands};

    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => Settings::from_file(path)?,
        None => Settings::load()?,
    };

    let mut logging = LoggingConfig::new().with_json_logs(cli.json_logs || *settings.json_logs());
    if cli.verbose {
        logging = logging.with_log_level("debug");
    }
    init_logging(&logging)?;

    match cli.command {
        Commands::Run => run(settings).await?,
        Commands::ShowConfig => show_config(&settings)?,
    }

    Ok(())
}

async fn run(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let token = Settings::discord_token()?;
    let config = Arc::new(ConfigStore::open(settings.guard_config_path())?);
    info!(path = %settings.guard_config_path().display(), "Guard configuration loaded");

    if *settings.health_enabled() {
        let listener = health::bind(settings.health_addr()).await?;
        tokio::spawn(async move {
            if let Err(e) = health::serve(listener).await {
                error!(error = %e, "Keep-alive endpoint stopped");
            }
        });
    }

    let mut bot = WardenBot::new(token, config).await?;
    let shards = bot.shard_manager();

    tokio::select! {
        result = bot.start() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupt received, shutting down");
            shards.shutdown_all().await;
        }
    }

    Ok(())
}

fn show_config(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let store = ConfigStore::open(settings.guard_config_path())?;
    println!("{}", settings.guard_config_path().display());
    for (name, value) in store.view().fields() {
        println!("  {}: {}", name, value);
    }
    Ok(())
}
