//! Anti-nuke policy evaluation and enforcement for Warden.
//!
//! This crate turns attributed actions into bans. It has three parts:
//!
//! 1. **Policy Engine** - decides whether an action is a violation, using the
//!    live guard configuration and a sliding-window tracker
//! 2. **Enforcement Dispatcher** - bans the actor and writes a log entry through
//!    platform collaborators, isolating failures of either side effect
//! 3. **Guard** - runs the two in sequence for one event and reports the outcome
//!    without ever propagating an error into the event stream
//!
//! Platform access happens only through the [`MembershipService`] and
//! [`LogSink`] traits.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod dispatcher;
mod guard;
mod policy;

pub use dispatcher::{DispatchReport, EnforcementDispatcher, LogSink, MembershipService};
pub use guard::{Guard, GuardOutcome};
pub use policy::PolicyEngine;
