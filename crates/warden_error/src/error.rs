//! Top-level error wrapper types.

use crate::{
    AttributionError, ConfigError, DispatchError, LogDeliveryError, PersistenceError, ServerError,
};

/// This is the foundation error enum. Every concern-specific error converts into it.
///
/// # Examples
///
/// ```
/// use warden_error::{ConfigError, WardenError};
///
/// let config_err = ConfigError::new("missing token");
/// let err: WardenError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum WardenErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Persisted configuration could not be read or written
    #[from(PersistenceError)]
    Persistence(PersistenceError),
    /// Ban dispatch failed
    #[from(DispatchError)]
    Dispatch(DispatchError),
    /// Log channel delivery failed
    #[from(LogDeliveryError)]
    LogDelivery(LogDeliveryError),
    /// Event could not be attributed to an actor
    #[from(AttributionError)]
    Attribution(AttributionError),
    /// Keep-alive server failed
    #[from(ServerError)]
    Server(ServerError),
}

/// Warden error with kind discrimination.
///
/// # Examples
///
/// ```
/// use warden_error::{ConfigError, WardenResult};
///
/// fn might_fail() -> WardenResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Warden Error: {}", _0)]
pub struct WardenError(Box<WardenErrorKind>);

impl WardenError {
    /// Create a new error from a kind.
    pub fn new(kind: WardenErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &WardenErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to WardenErrorKind
impl<T> From<T> for WardenError
where
    T: Into<WardenErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Warden operations.
pub type WardenResult<T> = std::result::Result<T, WardenError>;
