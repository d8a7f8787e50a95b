//! Action categories and the counter buckets they feed.

use serde::{Deserialize, Serialize};

/// Kind of privileged action observed on the platform.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    /// A bot account joined the guild.
    BotAdded,
    /// A webhook was created.
    WebhookCreated,
    /// A member was banned.
    MemberBanned,
    /// A channel was created.
    ChannelCreated,
    /// A channel was deleted.
    ChannelDeleted,
    /// A role was created.
    RoleCreated,
}

/// Sliding-window counter family.
///
/// Channel creation and deletion share the `Channels` bucket so rapid churn in
/// either direction counts as one signal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum Bucket {
    /// Bans issued by the actor.
    Bans,
    /// Channels created or deleted by the actor.
    Channels,
    /// Roles created by the actor.
    Roles,
}

impl ActionCategory {
    /// The counter bucket for windowed categories, `None` for immediate ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use warden_core::{ActionCategory, Bucket};
    ///
    /// assert_eq!(ActionCategory::ChannelCreated.bucket(), Some(Bucket::Channels));
    /// assert_eq!(ActionCategory::ChannelDeleted.bucket(), Some(Bucket::Channels));
    /// assert_eq!(ActionCategory::BotAdded.bucket(), None);
    /// ```
    pub fn bucket(self) -> Option<Bucket> {
        match self {
            ActionCategory::BotAdded | ActionCategory::WebhookCreated => None,
            ActionCategory::MemberBanned => Some(Bucket::Bans),
            ActionCategory::ChannelCreated | ActionCategory::ChannelDeleted => {
                Some(Bucket::Channels)
            }
            ActionCategory::RoleCreated => Some(Bucket::Roles),
        }
    }

    /// Whether a single occurrence is itself the violation.
    pub fn is_immediate(self) -> bool {
        self.bucket().is_none()
    }

    /// Whether the actor is resolved from the audit log rather than being the
    /// account the event is about.
    pub fn is_audit_attributed(self) -> bool {
        !matches!(self, ActionCategory::BotAdded)
    }

    /// Audit reason attached to the ban request.
    pub fn ban_reason(self) -> &'static str {
        match self {
            ActionCategory::BotAdded => "Anti-nuke: Unauthorized bot added",
            ActionCategory::WebhookCreated => "Anti-nuke: Created webhook",
            ActionCategory::MemberBanned => "Anti-nuke: Rapid banning detected",
            ActionCategory::ChannelCreated => "Anti-nuke: Rapid channel creation",
            ActionCategory::ChannelDeleted => "Anti-nuke: Rapid channel deletion",
            ActionCategory::RoleCreated => "Anti-nuke: Rapid role creation",
        }
    }

    /// Title of the log entry written after a successful ban.
    pub fn log_title(self) -> &'static str {
        match self {
            ActionCategory::BotAdded => "Bot Banned",
            ActionCategory::WebhookCreated => "Webhook Creation Detected",
            ActionCategory::MemberBanned => "Rapid Ban Detected",
            ActionCategory::ChannelCreated => "Rapid Channel Creation",
            ActionCategory::ChannelDeleted => "Rapid Channel Deletion",
            ActionCategory::RoleCreated => "Rapid Role Creation",
        }
    }
}
