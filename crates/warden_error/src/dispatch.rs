//! Ban dispatch errors.

/// Specific ban failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DispatchErrorKind {
    /// The agent's own principal lacks the authority to ban the target.
    #[display("Permission denied: {}", _0)]
    PermissionDenied(String),

    /// The target is already banned or no longer present.
    #[display("Target unavailable: {}", _0)]
    TargetUnavailable(String),

    /// The membership service could not be reached or answered unexpectedly.
    #[display("Transport failure: {}", _0)]
    Transport(String),
}

/// Ban dispatch error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Dispatch Error: {} at line {} in {}", kind, line, file)]
pub struct DispatchError {
    kind: DispatchErrorKind,
    line: u32,
    file: &'static str,
}

impl DispatchError {
    /// Create a new dispatch error with caller location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use warden_error::{DispatchError, DispatchErrorKind};
    ///
    /// let err = DispatchError::new(DispatchErrorKind::PermissionDenied("Missing Permissions".into()));
    /// assert!(err.is_permission_denied());
    /// ```
    #[track_caller]
    pub fn new(kind: DispatchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DispatchErrorKind {
        &self.kind
    }

    /// True when the ban was rejected for lack of authority.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self.kind, DispatchErrorKind::PermissionDenied(_))
    }

    /// True when the target was already banned or gone.
    pub fn is_target_unavailable(&self) -> bool {
        matches!(self.kind, DispatchErrorKind::TargetUnavailable(_))
    }
}
