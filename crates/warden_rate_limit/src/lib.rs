//! Rate tracking for the Warden moderation agent.
//!
//! Two mechanisms live here:
//!
//! - [`WindowTracker`] counts an actor's recent actions per bucket inside a sliding
//!   window. The policy engine compares the count against a threshold.
//! - [`CommandCooldown`] throttles administrative commands per user using
//!   governor's GCRA limiter.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cooldown;
mod window;

pub use cooldown::CommandCooldown;
pub use window::WindowTracker;
