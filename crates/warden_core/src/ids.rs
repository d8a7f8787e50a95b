//! Platform identities.

use serde::{Deserialize, Serialize};

/// Opaque identity of a platform account.
///
/// Displays as a mention so it can be dropped straight into log text.
///
/// # Examples
///
/// ```
/// use warden_core::ActorId;
///
/// let actor = ActorId::new(42);
/// assert_eq!(actor.get(), 42);
/// assert_eq!(actor.to_string(), "<@42>");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::From,
    derive_more::Display,
)]
#[display("<@{}>", _0)]
#[serde(transparent)]
pub struct ActorId(u64);

impl ActorId {
    /// Create an actor id from its raw snowflake.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw snowflake.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Opaque identity of a guild role.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::From,
    derive_more::Display,
)]
#[display("<@&{}>", _0)]
#[serde(transparent)]
pub struct RoleId(u64);

impl RoleId {
    /// Create a role id from its raw snowflake.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw snowflake.
    pub const fn get(self) -> u64 {
        self.0
    }
}
