//! Configuration for the Warden moderation agent.
//!
//! Two kinds of configuration live here:
//!
//! - [`GuardConfig`] is the enforcement policy: thresholds, windows, the role
//!   whitelist, the log channel, and the command cooldown. It is persisted, mutable
//!   at runtime through [`ConfigStore`], and read on every policy decision.
//! - [`Settings`] is process bootstrap: where the guard record lives, the
//!   keep-alive address, and log formatting. It is layered from defaults, an
//!   optional `warden.toml`, and `WARDEN_*` environment variables.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod guard;
mod settings;
mod store;

pub use guard::{CategoryLimit, GuardConfig};
pub use settings::Settings;
pub use store::{ConfigBackend, ConfigStore, MemoryBackend, TomlFileBackend};
