//! Guild bans and the moderation log channel.

use super::conversions::{dispatch_error, embed, user_id};
use async_trait::async_trait;
use serenity::all::{ChannelType, CreateMessage, GuildId, Http};
use std::sync::Arc;
use tracing::{debug, instrument};
use warden_core::{ActorId, LogEntry};
use warden_error::{DispatchError, LogDeliveryError, LogDeliveryErrorKind};
use warden_security::{LogSink, MembershipService};

/// Bans members of one guild.
#[derive(Clone)]
pub struct GuildMembership {
    http: Arc<Http>,
    guild: GuildId,
}

impl GuildMembership {
    /// Create a membership service for `guild`.
    pub fn new(http: Arc<Http>, guild: GuildId) -> Self {
        Self { http, guild }
    }
}

#[async_trait]
impl MembershipService for GuildMembership {
    #[instrument(skip(self, reason), fields(guild = self.guild.get(), actor = actor.get()))]
    async fn ban(&self, actor: ActorId, reason: &str) -> Result<(), DispatchError> {
        self.guild
            .ban_with_reason(&self.http, user_id(actor), 0, reason)
            .await
            .map_err(dispatch_error)
    }
}

/// Posts log entries to a named text channel in one guild.
#[derive(Clone)]
pub struct GuildLogChannel {
    http: Arc<Http>,
    guild: GuildId,
}

impl GuildLogChannel {
    /// Create a log sink for `guild`.
    pub fn new(http: Arc<Http>, guild: GuildId) -> Self {
        Self { http, guild }
    }
}

#[async_trait]
impl LogSink for GuildLogChannel {
    #[instrument(skip(self, entry), fields(guild = self.guild.get(), title = %entry.title()))]
    async fn send_log(&self, channel: &str, entry: &LogEntry) -> Result<(), LogDeliveryError> {
        let channels = self.guild.channels(&self.http).await.map_err(|e| {
            LogDeliveryError::new(LogDeliveryErrorKind::SendFailed(format!(
                "Failed to list channels: {}",
                e
            )))
        })?;

        let target = channels
            .values()
            .filter(|c| c.kind == ChannelType::Text && c.name == channel)
            .min_by_key(|c| (c.position, c.id))
            .ok_or_else(|| {
                LogDeliveryError::new(LogDeliveryErrorKind::ChannelNotFound(channel.to_string()))
            })?;

        target
            .id
            .send_message(&self.http, CreateMessage::new().embed(embed(entry)))
            .await
            .map_err(|e| LogDeliveryError::new(LogDeliveryErrorKind::SendFailed(e.to_string())))?;

        debug!(channel_id = target.id.get(), "Log entry delivered");
        Ok(())
    }
}
