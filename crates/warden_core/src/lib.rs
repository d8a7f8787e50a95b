//! Core data types for the Warden moderation agent.
//!
//! This crate provides the values that flow between the event source, the policy
//! engine, and the enforcement dispatcher: account identities, action categories,
//! attributed actions, enforcement decisions, and log entries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod action;
mod category;
mod decision;
mod ids;
mod log_entry;

pub use action::{ActorProfile, AttributedAction};
pub use category::{ActionCategory, Bucket};
pub use decision::EnforcementDecision;
pub use ids::{ActorId, RoleId};
pub use log_entry::{LogEntry, Severity};
