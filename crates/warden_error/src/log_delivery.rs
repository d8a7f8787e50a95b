//! Log channel delivery errors.

/// Specific log delivery failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum LogDeliveryErrorKind {
    /// No text channel with the configured name exists.
    #[display("Log channel not found: {}", _0)]
    ChannelNotFound(String),

    /// The message could not be sent.
    #[display("Send failed: {}", _0)]
    SendFailed(String),
}

/// Log delivery error with location tracking.
///
/// There is no secondary channel to report these on, so callers only trace them.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Log Delivery Error: {} at line {} in {}", kind, line, file)]
pub struct LogDeliveryError {
    kind: LogDeliveryErrorKind,
    line: u32,
    file: &'static str,
}

impl LogDeliveryError {
    /// Create a new log delivery error with caller location tracking.
    #[track_caller]
    pub fn new(kind: LogDeliveryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LogDeliveryErrorKind {
        &self.kind
    }
}
