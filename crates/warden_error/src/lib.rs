//! Error types for the Warden moderation agent.
//!
//! This crate provides the foundation error types used throughout the Warden workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use warden_error::{ConfigError, WardenResult};
//!
//! fn load_threshold() -> WardenResult<u32> {
//!     Err(ConfigError::new("ban_threshold missing"))?
//! }
//!
//! match load_threshold() {
//!     Ok(value) => println!("Got: {}", value),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attribution;
mod config;
mod dispatch;
mod error;
mod log_delivery;
mod persistence;
mod server;

pub use attribution::AttributionError;
pub use config::ConfigError;
pub use dispatch::{DispatchError, DispatchErrorKind};
pub use error::{WardenError, WardenErrorKind, WardenResult};
pub use log_delivery::{LogDeliveryError, LogDeliveryErrorKind};
pub use persistence::{PersistenceError, PersistenceErrorKind};
pub use server::ServerError;
