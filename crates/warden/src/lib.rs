//! Warden - anti-nuke moderation agent for Discord guilds.
//!
//! Warden watches privileged guild events, attributes each one to the account
//! that caused it, and bans accounts whose activity crosses configured limits
//! inside sliding time windows. Every ban, and every failed ban, is reported to
//! a log channel.
//!
//! # Features
//!
//! - **Sliding windows**: per-actor, per-category counters with exact expiry
//! - **Immediate violations**: unauthorized bot additions and webhook creation
//! - **Whitelisting**: holders of trusted roles are never enforced against
//! - **Persisted configuration**: thresholds and windows stored as TOML and
//!   editable at runtime through slash commands
//! - **Keep-alive endpoint**: `GET /` for uptime monitors
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use warden::{ConfigStore, WardenBot};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(ConfigStore::open("guard.toml")?);
//!     let mut bot = WardenBot::new(std::env::var("DISCORD_TOKEN")?, config).await?;
//!     bot.start().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `discord` - Discord bot integration (required by the `warden` binary)
//!
//! # Architecture
//!
//! - `warden_error` - Error types
//! - `warden_core` - Core data types (ids, categories, decisions, log entries)
//! - `warden_config` - Guard configuration store and bootstrap settings
//! - `warden_rate_limit` - Sliding-window tracker and command cooldown
//! - `warden_security` - Policy engine and enforcement dispatcher
//! - `warden_social` - Admin console and Discord integration
//!
//! This crate (`warden`) re-exports everything for convenience.

pub mod health;
mod logging;

pub use logging::{LoggingConfig, init_logging};

pub use warden_config::*;
pub use warden_core::*;
pub use warden_error::*;
pub use warden_rate_limit::*;
pub use warden_security::*;
pub use warden_social::*;
