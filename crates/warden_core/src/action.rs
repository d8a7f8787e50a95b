//! Attributed actions.

use crate::{ActionCategory, ActorId, RoleId};
use derive_getters::Getters;
use std::time::Instant;

/// The account an action was attributed to, as resolved by the event source.
///
/// Role membership and the automated flag are facts supplied by the platform;
/// the policy engine only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ActorProfile {
    id: ActorId,
    automated: bool,
    roles: Vec<RoleId>,
}

impl ActorProfile {
    /// A human account with the given roles.
    pub fn member(id: ActorId, roles: Vec<RoleId>) -> Self {
        Self {
            id,
            automated: false,
            roles,
        }
    }

    /// A bot account with the given roles.
    pub fn bot(id: ActorId, roles: Vec<RoleId>) -> Self {
        Self {
            id,
            automated: true,
            roles,
        }
    }

    /// Whether the actor holds `role`.
    pub fn has_role(&self, role: RoleId) -> bool {
        self.roles.contains(&role)
    }
}

/// A platform event already resolved to the account responsible for it.
///
/// # Examples
///
/// ```
/// use std::time::Instant;
/// use warden_core::{ActionCategory, ActorId, ActorProfile, AttributedAction};
///
/// let action = AttributedAction::new(
///     ActorProfile::member(ActorId::new(7), vec![]),
///     ActionCategory::RoleCreated,
///     Instant::now(),
/// );
/// assert_eq!(action.actor().id().get(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct AttributedAction {
    actor: ActorProfile,
    category: ActionCategory,
    timestamp: Instant,
}

impl AttributedAction {
    /// Create a new attributed action.
    pub fn new(actor: ActorProfile, category: ActionCategory, timestamp: Instant) -> Self {
        Self {
            actor,
            category,
            timestamp,
        }
    }

    /// Create an action stamped with the current instant.
    pub fn now(actor: ActorProfile, category: ActionCategory) -> Self {
        Self::new(actor, category, Instant::now())
    }
}
