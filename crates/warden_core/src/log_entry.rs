//! Structured entries for the moderation log channel.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// How loudly an entry should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Severity {
    /// An enforcement action was taken.
    Alert,
    /// An enforcement action failed.
    Failure,
    /// Informational output such as configuration views.
    Info,
}

impl Severity {
    /// Embed colour as a 24-bit RGB value.
    pub fn colour(self) -> u32 {
        match self {
            Severity::Alert => 0xE7_4C_3C,
            Severity::Failure => 0xE6_7E_22,
            Severity::Info => 0x34_98_DB,
        }
    }
}

/// One message for the log channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LogEntry {
    title: String,
    description: String,
    severity: Severity,
    timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Create an entry stamped with the current time.
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self::at(title, description, severity, Utc::now())
    }

    /// Create an entry with an explicit timestamp.
    pub fn at(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
            timestamp,
        }
    }
}
