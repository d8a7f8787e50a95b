//! Attribution error types.

/// The audit log did not name an actor for an observed event.
///
/// The event is dropped without a decision; this never aborts event processing.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Attribution Error: {} at line {} in {}", message, line, file)]
pub struct AttributionError {
    /// What could not be attributed
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl AttributionError {
    /// Create a new AttributionError at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
