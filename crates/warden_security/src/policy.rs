//! Policy decisions for attributed actions.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use warden_config::ConfigStore;
use warden_core::{ActorId, AttributedAction, EnforcementDecision};
use warden_rate_limit::WindowTracker;

/// Maps attributed actions to enforcement decisions.
///
/// The engine owns no configuration of its own: every evaluation reads the
/// latest snapshot from the [`ConfigStore`], so administrative updates apply
/// to the next action evaluated.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use warden_config::{ConfigStore, MemoryBackend};
/// use warden_core::{ActionCategory, ActorId, ActorProfile, AttributedAction};
/// use warden_rate_limit::WindowTracker;
/// use warden_security::PolicyEngine;
///
/// let config = Arc::new(ConfigStore::load(Arc::new(MemoryBackend::new())).unwrap());
/// let engine = PolicyEngine::new(ActorId::new(1), config, Arc::new(WindowTracker::new()));
///
/// let action = AttributedAction::now(
///     ActorProfile::member(ActorId::new(2), vec![]),
///     ActionCategory::WebhookCreated,
/// );
/// assert!(engine.evaluate(&action).is_some());
/// ```
pub struct PolicyEngine {
    self_id: ActorId,
    config: Arc<ConfigStore>,
    tracker: Arc<WindowTracker>,
}

impl PolicyEngine {
    /// Create an engine acting as `self_id`.
    pub fn new(self_id: ActorId, config: Arc<ConfigStore>, tracker: Arc<WindowTracker>) -> Self {
        Self {
            self_id,
            config,
            tracker,
        }
    }

    /// The identity whose own actions are never evaluated.
    pub fn self_id(&self) -> ActorId {
        self.self_id
    }

    /// The configuration store read on every evaluation.
    pub fn config(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    /// The window tracker backing windowed categories.
    pub fn tracker(&self) -> &Arc<WindowTracker> {
        &self.tracker
    }

    /// Decide whether an action warrants enforcement.
    ///
    /// Returns `None` on the normal, non-triggering path. Windowed categories are
    /// recorded even when they do not trigger, so they count toward later
    /// evaluations.
    #[instrument(
        skip_all,
        fields(actor = action.actor().id().get(), category = %action.category())
    )]
    pub fn evaluate(&self, action: &AttributedAction) -> Option<EnforcementDecision> {
        let actor = action.actor();
        let category = *action.category();

        if *actor.id() == self.self_id {
            debug!("Skipping own action");
            return None;
        }

        if *actor.automated() && category.is_audit_attributed() {
            debug!("Skipping automated actor");
            return None;
        }

        let config = self.config.view();
        if config.is_whitelisted(actor) {
            debug!("Actor holds a whitelisted role");
            return None;
        }

        let Some(bucket) = category.bucket() else {
            warn!("Immediate violation");
            return Some(EnforcementDecision::immediate(*actor.id(), category));
        };

        let limit = config.limit(bucket);
        let observed = self
            .tracker
            .record(*actor.id(), bucket, limit.window, *action.timestamp());

        if observed > limit.threshold as usize {
            warn!(
                observed,
                threshold = limit.threshold,
                window_secs = limit.window.as_secs(),
                "Threshold exceeded"
            );
            Some(EnforcementDecision::new(
                *actor.id(),
                category,
                observed,
                limit.window.as_secs(),
            ))
        } else {
            debug!(observed, threshold = limit.threshold, "Within threshold");
            None
        }
    }

    /// Drop window state that no longer falls inside any configured window.
    pub fn sweep(&self, now: Instant) -> usize {
        let config = self.config.view();
        self.tracker.sweep(now, |bucket| config.limit(bucket).window)
    }
}
