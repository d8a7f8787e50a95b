//! Per-guild policy engines and dispatchers.

use super::membership::{GuildLogChannel, GuildMembership};
use dashmap::DashMap;
use serenity::all::{GuildId, Http};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use warden_config::ConfigStore;
use warden_core::ActorId;
use warden_rate_limit::WindowTracker;
use warden_security::{EnforcementDispatcher, Guard, PolicyEngine};

/// One [`Guard`] per guild, created on first use.
///
/// Each guild gets its own window tracker and in-flight ban set, so activity in
/// one guild never counts toward a threshold in another. All guards share the
/// configuration store.
pub struct GuildGuards {
    config: Arc<ConfigStore>,
    guards: DashMap<GuildId, Arc<Guard>>,
}

impl GuildGuards {
    /// Create an empty registry.
    pub fn new(config: Arc<ConfigStore>) -> Self {
        Self {
            config,
            guards: DashMap::new(),
        }
    }

    /// The guard for `guild`, creating it if needed.
    pub fn guard(&self, http: &Arc<Http>, guild: GuildId, self_id: ActorId) -> Arc<Guard> {
        self.guards
            .entry(guild)
            .or_insert_with(|| {
                info!(guild = guild.get(), "Creating guard for guild");
                Arc::new(Guard::new(
                    PolicyEngine::new(
                        self_id,
                        Arc::clone(&self.config),
                        Arc::new(WindowTracker::new()),
                    ),
                    EnforcementDispatcher::new(
                        Arc::new(GuildMembership::new(Arc::clone(http), guild)),
                        Arc::new(GuildLogChannel::new(Arc::clone(http), guild)),
                        Arc::clone(&self.config),
                    ),
                ))
            })
            .clone()
    }

    /// Drop expired window state in every guild.
    pub fn sweep(&self, now: Instant) -> usize {
        let removed: usize = self
            .guards
            .iter()
            .map(|guard| guard.engine().sweep(now))
            .sum();
        debug!(removed, guilds = self.guards.len(), "Swept guild trackers");
        removed
    }

    /// Number of guilds with a guard.
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// True when no guild has a guard yet.
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}
