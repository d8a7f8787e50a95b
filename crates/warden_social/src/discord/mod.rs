//! Discord integration for Warden.
//!
//! This module provides the Discord side of the moderation agent using the
//! Serenity library:
//! - Attribute guild events to accounts through the audit log
//! - Ban through the guild API and post embed entries to the log channel
//! - Register and answer the administrative slash commands
//!
//! # Architecture
//!
//! - **attribution**: audit-log lookups turning events into actor profiles
//! - **membership**: `MembershipService` and `LogSink` for one guild
//! - **guards**: per-guild policy engines and dispatchers
//! - **commands**: slash command definitions and reply rendering
//! - **handler**: Serenity `EventHandler`
//! - **client**: client setup and lifecycle
//! - **error**: Discord-specific error types
//!
//! Available with the `discord` feature.

mod attribution;
mod client;
mod commands;
mod conversions;
mod error;
mod guards;
mod handler;
mod membership;

pub use attribution::{AuditAttributor, audit_action};
pub use client::{ShardManagerKey, WardenBot};
pub use conversions::{dispatch_error, dispatch_kind_for_status, member_profile};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use guards::GuildGuards;
pub use handler::WardenHandler;
pub use membership::{GuildLogChannel, GuildMembership};
