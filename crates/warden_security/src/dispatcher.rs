//! Enforcement dispatch: ban, then log.

use async_trait::async_trait;
use dashmap::DashSet;
use derive_getters::Getters;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use warden_config::ConfigStore;
use warden_core::{ActorId, EnforcementDecision, LogEntry};
use warden_error::{DispatchError, LogDeliveryError};

/// Platform service able to ban an account.
#[async_trait]
pub trait MembershipService: Send + Sync {
    /// Ban `actor`, attaching `reason` to the platform's audit trail.
    async fn ban(&self, actor: ActorId, reason: &str) -> Result<(), DispatchError>;
}

/// Destination for moderation log entries.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Deliver `entry` to the channel named `channel`.
    async fn send_log(&self, channel: &str, entry: &LogEntry) -> Result<(), LogDeliveryError>;
}

/// What a dispatch accomplished.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct DispatchReport {
    actor: ActorId,
    banned: bool,
    logged: bool,
    coalesced: bool,
}

impl DispatchReport {
    fn coalesced_for(actor: ActorId) -> Self {
        Self {
            actor,
            banned: false,
            logged: false,
            coalesced: true,
        }
    }
}

/// Carries out enforcement decisions against the platform.
///
/// Each decision produces one ban request followed by one log entry. A failed
/// ban is reported to the log channel and returned to the caller; a failed log
/// delivery is only traced, since there is nowhere else to report it. Nothing
/// is retried.
///
/// Decisions for an actor whose ban is still in flight are coalesced: the later
/// decision returns without issuing a second request.
pub struct EnforcementDispatcher {
    membership: Arc<dyn MembershipService>,
    log_sink: Arc<dyn LogSink>,
    config: Arc<ConfigStore>,
    in_flight: DashSet<ActorId>,
}

impl EnforcementDispatcher {
    /// Create a dispatcher over the given collaborators.
    pub fn new(
        membership: Arc<dyn MembershipService>,
        log_sink: Arc<dyn LogSink>,
        config: Arc<ConfigStore>,
    ) -> Self {
        Self {
            membership,
            log_sink,
            config,
            in_flight: DashSet::new(),
        }
    }

    /// Ban the decision's actor and log the outcome.
    ///
    /// # Errors
    ///
    /// Returns the ban failure after a failure entry has been sent to the log
    /// channel. Log delivery problems never surface as errors.
    #[instrument(
        skip_all,
        fields(actor = decision.actor().get(), category = %decision.category())
    )]
    pub async fn execute(
        &self,
        decision: &EnforcementDecision,
    ) -> Result<DispatchReport, DispatchError> {
        let actor = *decision.actor();

        let Some(_claim) = InFlight::claim(&self.in_flight, actor) else {
            info!("Ban already in flight, coalescing decision");
            return Ok(DispatchReport::coalesced_for(actor));
        };

        let outcome = self.membership.ban(actor, decision.reason()).await;
        let channel = self.config.view().log_channel().clone();

        match outcome {
            Ok(()) => {
                info!(reason = %decision.reason(), "Actor banned");
                let logged = self.deliver(&channel, &decision.success_entry()).await;
                Ok(DispatchReport {
                    actor,
                    banned: true,
                    logged,
                    coalesced: false,
                })
            }
            Err(e) => {
                error!(error = %e, "Failed to ban actor");
                self.deliver(&channel, &decision.failure_entry(e.kind()))
                    .await;
                Err(e)
            }
        }
    }

    /// Number of bans currently awaiting a platform response.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    async fn deliver(&self, channel: &str, entry: &LogEntry) -> bool {
        match self.log_sink.send_log(channel, entry).await {
            Ok(()) => true,
            Err(e) => {
                warn!(channel, error = %e, "Failed to deliver log entry");
                false
            }
        }
    }
}

/// Marks an actor as having a ban in flight until dropped.
struct InFlight<'a> {
    set: &'a DashSet<ActorId>,
    actor: ActorId,
}

impl<'a> InFlight<'a> {
    fn claim(set: &'a DashSet<ActorId>, actor: ActorId) -> Option<Self> {
        set.insert(actor).then_some(Self { set, actor })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.actor);
    }
}
