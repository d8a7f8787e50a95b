//! Per-event evaluation and enforcement.

use crate::{DispatchReport, EnforcementDispatcher, PolicyEngine};
use tracing::{debug, error};
use warden_core::AttributedAction;
use warden_error::DispatchError;

/// Result of running one attributed action through the guard.
#[derive(Debug, Clone)]
pub enum GuardOutcome {
    /// No violation.
    Ignored,
    /// A violation was found and dispatched.
    Enforced(DispatchReport),
    /// A violation was found but the ban failed.
    Failed(DispatchError),
}

impl GuardOutcome {
    /// True when a violation was detected, whether or not the ban succeeded.
    pub fn is_violation(&self) -> bool {
        !matches!(self, GuardOutcome::Ignored)
    }
}

/// Pairs a policy engine with the dispatcher that carries out its decisions.
pub struct Guard {
    engine: PolicyEngine,
    dispatcher: EnforcementDispatcher,
}

impl Guard {
    /// Create a guard.
    pub fn new(engine: PolicyEngine, dispatcher: EnforcementDispatcher) -> Self {
        Self { engine, dispatcher }
    }

    /// The policy engine.
    pub fn engine(&self) -> &PolicyEngine {
        &self.engine
    }

    /// The dispatcher.
    pub fn dispatcher(&self) -> &EnforcementDispatcher {
        &self.dispatcher
    }

    /// Evaluate `action` and enforce any resulting decision.
    ///
    /// Failures are folded into the outcome so one bad event never disturbs the
    /// handling of the next.
    pub async fn observe(&self, action: &AttributedAction) -> GuardOutcome {
        let Some(decision) = self.engine.evaluate(action) else {
            return GuardOutcome::Ignored;
        };

        match self.dispatcher.execute(&decision).await {
            Ok(report) => {
                debug!(?report, "Decision dispatched");
                GuardOutcome::Enforced(report)
            }
            Err(e) => {
                error!(error = %e, "Enforcement failed");
                GuardOutcome::Failed(e)
            }
        }
    }
}
