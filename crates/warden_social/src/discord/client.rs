//! Discord bot client setup and lifecycle management.

use super::guards::GuildGuards;
use super::handler::WardenHandler;
use super::{DiscordError, DiscordErrorKind, DiscordResult};
use crate::AdminConsole;
use serenity::Client;
use serenity::gateway::ShardManager;
use serenity::prelude::TypeMapKey;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};
use warden_config::ConfigStore;

/// Interval between sweeps of idle window and cooldown state.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Makes the shard manager reachable from event handlers for latency reports.
pub struct ShardManagerKey;

impl TypeMapKey for ShardManagerKey {
    type Value = Arc<ShardManager>;
}

/// Warden Discord bot.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use warden_config::ConfigStore;
/// use warden_social::WardenBot;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("DISCORD_TOKEN")?;
///     let config = Arc::new(ConfigStore::open("guard.toml")?);
///
///     let mut bot = WardenBot::new(token, config).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct WardenBot {
    client: Client,
    console: Arc<AdminConsole>,
    guards: Arc<GuildGuards>,
}

impl WardenBot {
    /// Create a new bot.
    ///
    /// # Errors
    /// Returns an error if the token is empty or the Serenity client fails to
    /// initialize.
    #[instrument(skip(token, config), fields(token_len = token.len()))]
    pub async fn new(token: String, config: Arc<ConfigStore>) -> DiscordResult<Self> {
        info!("Initializing Warden Discord bot");

        if token.trim().is_empty() {
            return Err(DiscordError::new(DiscordErrorKind::InvalidToken));
        }

        let console = Arc::new(AdminConsole::from_store(Arc::clone(&config)));
        let guards = Arc::new(GuildGuards::new(config));
        let handler = WardenHandler::new(Arc::clone(&console), Arc::clone(&guards));

        let intents = WardenHandler::intents();
        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(&token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        client
            .data
            .write()
            .await
            .insert::<ShardManagerKey>(Arc::clone(&client.shard_manager));

        Ok(Self {
            client,
            console,
            guards,
        })
    }

    /// Connect and process events until the client stops.
    ///
    /// # Errors
    /// Returns an error if the client fails to start or encounters a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> DiscordResult<()> {
        info!("Starting Discord bot");

        let sweeper = spawn_sweeper(Arc::clone(&self.guards), Arc::clone(&self.console));
        let result = self.client.start().await;
        sweeper.abort();

        result.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })
    }

    /// Handle for shutting the gateway down from another task.
    pub fn shard_manager(&self) -> Arc<ShardManager> {
        Arc::clone(&self.client.shard_manager)
    }
}

fn spawn_sweeper(guards: Arc<GuildGuards>, console: Arc<AdminConsole>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = guards.sweep(Instant::now());
            console.cooldown().sweep();
            debug!(removed, "Periodic sweep complete");
        }
    })
}
