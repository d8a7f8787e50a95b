//! Platform-agnostic administrative commands.
//!
//! The console owns the gating rules shared by every platform: which commands
//! need administrator permission, the per-command cooldown, and the wording of
//! the replies. Platforms translate their interactions into an [`AdminInvocation`]
//! and render the returned [`AdminReply`].

use derive_getters::Getters;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};
use warden_config::ConfigStore;
use warden_core::{ActorId, RoleId, Severity};
use warden_rate_limit::CommandCooldown;

/// Administrative command.
#[derive(Debug, Clone, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum AdminCommand {
    /// Report gateway latency.
    Ping {
        /// Latency measured by the platform.
        latency: Duration,
    },
    /// Replace the whitelist with a single role.
    SetWhitelist(RoleId),
    /// Show the current guard configuration.
    ViewConfig,
}

impl AdminCommand {
    /// Registered command name.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Whether the invoker must hold administrator permission.
    pub fn requires_admin(&self) -> bool {
        !matches!(self, AdminCommand::Ping { .. })
    }

    /// Short description for command registration.
    pub fn description(&self) -> &'static str {
        match self {
            AdminCommand::Ping { .. } => "Check bot latency",
            AdminCommand::SetWhitelist(_) => "Set the whitelisted role ID (admin only)",
            AdminCommand::ViewConfig => "View current bot configuration (admin only)",
        }
    }
}

/// A command together with facts about who invoked it.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct AdminInvocation {
    user: ActorId,
    is_admin: bool,
    command: AdminCommand,
}

impl AdminInvocation {
    /// Create an invocation.
    pub fn new(user: ActorId, is_admin: bool, command: AdminCommand) -> Self {
        Self {
            user,
            is_admin,
            command,
        }
    }
}

/// Titled field list attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ReplyPanel {
    title: String,
    severity: Severity,
    fields: Vec<(String, String)>,
}

/// What to send back to the invoker.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct AdminReply {
    content: Option<String>,
    panel: Option<ReplyPanel>,
    ephemeral: bool,
}

impl AdminReply {
    fn public(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            panel: None,
            ephemeral: false,
        }
    }

    fn private(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            panel: None,
            ephemeral: true,
        }
    }

    fn with_panel(panel: ReplyPanel) -> Self {
        Self {
            content: None,
            panel: Some(panel),
            ephemeral: true,
        }
    }
}

/// Handles administrative commands against the configuration store.
pub struct AdminConsole {
    store: Arc<ConfigStore>,
    cooldown: CommandCooldown,
}

impl AdminConsole {
    /// Create a console with the given per-user, per-command cooldown.
    pub fn new(store: Arc<ConfigStore>, cooldown: Duration) -> Self {
        Self {
            store,
            cooldown: CommandCooldown::new(cooldown),
        }
    }

    /// Create a console using the store's configured cooldown.
    pub fn from_store(store: Arc<ConfigStore>) -> Self {
        let cooldown = store.view().command_cooldown_duration();
        Self::new(store, cooldown)
    }

    /// The backing configuration store.
    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    /// The command cooldown.
    pub fn cooldown(&self) -> &CommandCooldown {
        &self.cooldown
    }

    /// Run a command and produce the reply.
    ///
    /// Permission is checked before the cooldown, so rejected invocations do not
    /// use up the invoker's slot. Each command has its own slot per user.
    #[instrument(skip_all, fields(user = invocation.user().get(), command = %invocation.command()))]
    pub fn handle(&self, invocation: &AdminInvocation) -> AdminReply {
        let command = invocation.command();

        if command.requires_admin() && !invocation.is_admin() {
            warn!("Administrator permission missing");
            return AdminReply::private("You need administrator permissions to use this command!");
        }

        if let Err(retry_after) = self.cooldown.check(*invocation.user(), command.name()) {
            return AdminReply::private(format!(
                "Command on cooldown! Try again in {:.1} seconds.",
                retry_after.as_secs_f64()
            ));
        }

        match command {
            AdminCommand::Ping { latency } => {
                AdminReply::public(format!("Pong! Latency: {}ms", latency.as_millis()))
            }
            AdminCommand::SetWhitelist(role) => match self.store.set_whitelist(*role) {
                Ok(_) => {
                    info!(role = role.get(), "Whitelisted role set");
                    AdminReply::public(format!("Whitelisted role set to {}", role))
                }
                Err(e) => {
                    warn!(error = %e, "Failed to set whitelisted role");
                    AdminReply::private(format!("An error occurred: {}", e.kind()))
                }
            },
            AdminCommand::ViewConfig => AdminReply::with_panel(ReplyPanel {
                title: "Anti-Nuke Bot Config".to_string(),
                severity: Severity::Info,
                fields: self.store.view().fields(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ping_is_open_to_everyone() {
        assert!(!AdminCommand::Ping { latency: Duration::ZERO }.requires_admin());
        assert!(AdminCommand::SetWhitelist(RoleId::new(1)).requires_admin());
        assert!(AdminCommand::ViewConfig.requires_admin());
    }

    #[test]
    fn test_command_names() {
        assert_eq!(AdminCommand::Ping { latency: Duration::ZERO }.to_string(), "ping");
        assert_eq!(AdminCommand::SetWhitelist(RoleId::new(1)).to_string(), "setwhitelist");
        assert_eq!(AdminCommand::ViewConfig.to_string(), "viewconfig");
        assert_eq!(AdminCommand::ViewConfig.name(), "viewconfig");
        assert_eq!(AdminCommand::SetWhitelist(RoleId::new(1)).name(), "setwhitelist");
    }
}
