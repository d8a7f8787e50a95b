//! Enforcement decisions.

use crate::{ActionCategory, ActorId, LogEntry, Severity};
use derive_getters::Getters;

/// Instruction to ban an actor and log why.
///
/// Produced by the policy engine, consumed by the dispatcher. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct EnforcementDecision {
    actor: ActorId,
    reason: String,
    category: ActionCategory,
    observed_count: usize,
    window_secs: u64,
}

impl EnforcementDecision {
    /// Create a decision for a windowed category.
    pub fn new(
        actor: ActorId,
        category: ActionCategory,
        observed_count: usize,
        window_secs: u64,
    ) -> Self {
        Self {
            actor,
            reason: category.ban_reason().to_string(),
            category,
            observed_count,
            window_secs,
        }
    }

    /// Create a decision for a category where one occurrence is the violation.
    pub fn immediate(actor: ActorId, category: ActionCategory) -> Self {
        Self::new(actor, category, 1, 0)
    }

    /// Human-readable account of what the actor did.
    ///
    /// # Examples
    ///
    /// ```
    /// use warden_core::{ActionCategory, ActorId, EnforcementDecision};
    ///
    /// let decision = EnforcementDecision::new(ActorId::new(5), ActionCategory::MemberBanned, 3, 10);
    /// assert_eq!(
    ///     decision.description(),
    ///     "Banned <@5> for banning 3 members in 10 seconds."
    /// );
    /// ```
    pub fn description(&self) -> String {
        let actor = self.actor;
        let count = self.observed_count;
        let window = self.window_secs;
        match self.category {
            ActionCategory::BotAdded => {
                format!("Banned {actor} for adding an unauthorized bot.")
            }
            ActionCategory::WebhookCreated => {
                format!("Banned {actor} for creating a webhook.")
            }
            ActionCategory::MemberBanned => {
                format!("Banned {actor} for banning {count} members in {window} seconds.")
            }
            ActionCategory::ChannelCreated => {
                format!("Banned {actor} for creating {count} channels in {window} seconds.")
            }
            ActionCategory::ChannelDeleted => {
                format!("Banned {actor} for deleting {count} channels in {window} seconds.")
            }
            ActionCategory::RoleCreated => {
                format!("Banned {actor} for creating {count} roles in {window} seconds.")
            }
        }
    }

    /// Log entry reporting a completed ban.
    pub fn success_entry(&self) -> LogEntry {
        LogEntry::new(self.category.log_title(), self.description(), Severity::Alert)
    }

    /// Log entry reporting that the ban request failed.
    pub fn failure_entry(&self, error: impl std::fmt::Display) -> LogEntry {
        LogEntry::new(
            "Error",
            format!("Failed to ban {}: {}", self.actor, error),
            Severity::Failure,
        )
    }
}
