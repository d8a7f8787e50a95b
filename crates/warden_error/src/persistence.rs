//! Configuration persistence errors.

/// Specific persistence error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PersistenceErrorKind {
    /// Reading the persisted record failed.
    #[display("Read failed for '{}': {}", path, reason)]
    Read {
        /// Location of the record
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// Writing the persisted record failed.
    #[display("Write failed for '{}': {}", path, reason)]
    Write {
        /// Location of the record
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// The persisted record could not be decoded.
    #[display("Parse failed: {}", _0)]
    Parse(String),

    /// The record could not be encoded.
    #[display("Serialize failed: {}", _0)]
    Serialize(String),

    /// The updated record violates a configuration rule.
    #[display("Invalid configuration: {}", _0)]
    Invalid(String),
}

/// Persistence error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Persistence Error: {} at line {} in {}", kind, line, file)]
pub struct PersistenceError {
    kind: PersistenceErrorKind,
    line: u32,
    file: &'static str,
}

impl PersistenceError {
    /// Create a new persistence error with caller location tracking.
    #[track_caller]
    pub fn new(kind: PersistenceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PersistenceErrorKind {
        &self.kind
    }
}
