//! Serenity event handler for the Warden bot.
//!
//! Each gateway event of interest becomes one [`AttributedAction`] handed to the
//! guild's guard. Failures are traced and never propagate out of the handler.

use super::attribution::AuditAttributor;
use super::client::ShardManagerKey;
use super::commands;
use super::conversions::{actor_id, member_profile};
use super::guards::GuildGuards;
use crate::AdminConsole;
use serenity::all::{
    ChannelId, GuildChannel, GuildId, Interaction, Member, Message, Ready, Role, User,
};
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::gateway::GatewayIntents;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use warden_core::{ActionCategory, ActorId, AttributedAction};

/// Event handler for the Warden Discord bot.
pub struct WardenHandler {
    console: Arc<AdminConsole>,
    guards: Arc<GuildGuards>,
    self_id: OnceLock<ActorId>,
}

impl WardenHandler {
    /// Create a handler.
    pub fn new(console: Arc<AdminConsole>, guards: Arc<GuildGuards>) -> Self {
        Self {
            console,
            guards,
            self_id: OnceLock::new(),
        }
    }

    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::GUILD_MODERATION
            | GatewayIntents::GUILD_WEBHOOKS
    }

    /// Attribute an audit-logged event and run it through the guild's guard.
    async fn observe(&self, ctx: &Context, guild: GuildId, category: ActionCategory) {
        let observed_at = Instant::now();

        let actor = match AuditAttributor::new(Arc::clone(&ctx.http))
            .resolve(guild, category)
            .await
        {
            Ok(actor) => actor,
            Err(e) => {
                debug!(guild = guild.get(), %category, error = %e, "Attribution unavailable, dropping event");
                return;
            }
        };

        self.enforce(ctx, guild, AttributedAction::new(actor, category, observed_at))
            .await;
    }

    async fn enforce(&self, ctx: &Context, guild: GuildId, action: AttributedAction) {
        let Some(&self_id) = self.self_id.get() else {
            warn!(guild = guild.get(), "Event received before ready, skipping");
            return;
        };

        let outcome = self
            .guards
            .guard(&ctx.http, guild, self_id)
            .observe(&action)
            .await;

        if outcome.is_violation() {
            info!(guild = guild.get(), ?outcome, "Violation handled");
        }
    }

    async fn latency(ctx: &Context) -> Duration {
        let data = ctx.data.read().await;
        let Some(manager) = data.get::<ShardManagerKey>() else {
            return Duration::ZERO;
        };
        let runners = manager.runners.lock().await;
        runners
            .get(&ctx.shard_id)
            .and_then(|runner| runner.latency)
            .unwrap_or_default()
    }
}

#[async_trait]
impl EventHandler for WardenHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        if self.self_id.set(actor_id(ready.user.id)).is_err() {
            debug!("Session resumed");
        }

        info!(
            bot_user = %ready.user.name,
            bot_id = %ready.user.id,
            guilds = ready.guilds.len(),
            "Bot connected to Discord"
        );

        match commands::register(&ctx.http).await {
            Ok(count) => info!(count, "Synced slash commands"),
            Err(e) => error!(error = %e, "Failed to sync slash commands"),
        }
    }

    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        if !new_member.user.bot {
            return;
        }

        info!(
            guild = new_member.guild_id.get(),
            bot = %new_member.user.id,
            "Bot joined guild"
        );
        let action = AttributedAction::now(member_profile(&new_member), ActionCategory::BotAdded);
        self.enforce(&ctx, new_member.guild_id, action).await;
    }

    async fn webhook_update(&self, ctx: Context, guild_id: GuildId, belongs_to_channel_id: ChannelId) {
        debug!(guild = guild_id.get(), channel = belongs_to_channel_id.get(), "Webhooks updated");
        self.observe(&ctx, guild_id, ActionCategory::WebhookCreated)
            .await;
    }

    async fn guild_ban_addition(&self, ctx: Context, guild_id: GuildId, banned_user: User) {
        debug!(guild = guild_id.get(), user = %banned_user.id, "Member banned");
        self.observe(&ctx, guild_id, ActionCategory::MemberBanned)
            .await;
    }

    async fn channel_create(&self, ctx: Context, channel: GuildChannel) {
        debug!(guild = channel.guild_id.get(), channel = %channel.name, "Channel created");
        self.observe(&ctx, channel.guild_id, ActionCategory::ChannelCreated)
            .await;
    }

    async fn channel_delete(
        &self,
        ctx: Context,
        channel: GuildChannel,
        _messages: Option<Vec<Message>>,
    ) {
        debug!(guild = channel.guild_id.get(), channel = %channel.name, "Channel deleted");
        self.observe(&ctx, channel.guild_id, ActionCategory::ChannelDeleted)
            .await;
    }

    async fn guild_role_create(&self, ctx: Context, new: Role) {
        debug!(guild = new.guild_id.get(), role = %new.name, "Role created");
        self.observe(&ctx, new.guild_id, ActionCategory::RoleCreated)
            .await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let latency = Self::latency(&ctx).await;
        let response = match commands::invocation(&command, latency) {
            Ok(invocation) => commands::response(&self.console.handle(&invocation)),
            Err(e) => {
                warn!(command = %command.data.name, error = %e, "Could not handle interaction");
                commands::error_response(&e)
            }
        };

        if let Err(e) = commands::respond(&ctx.http, &command, response).await {
            error!(command = %command.data.name, error = %e, "Failed to respond to interaction");
        }
    }
}
