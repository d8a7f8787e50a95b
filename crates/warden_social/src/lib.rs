//! Administrative commands and platform integrations for Warden.
//!
//! # Admin Console
//!
//! The platform-agnostic [`AdminConsole`] handles `ping`, `setwhitelist`, and
//! `viewconfig`: administrator gating, the per-user cooldown, and reply wording.
//!
//! # Platform Support
//!
//! - `discord` - Discord bot integration (requires `discord` feature)
//!
//! The Discord module follows a common pattern:
//! - Platform-specific error types
//! - Attribution of events to accounts
//! - `MembershipService` and `LogSink` implementations for enforcement
//! - Client/handler for platform API interaction

#![warn(missing_docs)]

mod admin;

#[cfg(feature = "discord")]
mod discord;

pub use admin::{AdminCommand, AdminConsole, AdminInvocation, AdminReply, ReplyPanel};

#[cfg(feature = "discord")]
pub use discord::{
    AuditAttributor, DiscordError, DiscordErrorKind, DiscordResult, GuildGuards, GuildLogChannel,
    GuildMembership, ShardManagerKey, WardenBot, WardenHandler, audit_action, dispatch_error,
    dispatch_kind_for_status, member_profile,
};
