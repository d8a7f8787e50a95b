//! The persisted enforcement policy.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;
use warden_core::{ActorProfile, Bucket, RoleId};
use warden_error::ConfigError;

/// Threshold and window for one counter bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryLimit {
    /// Actions allowed inside the window; one more triggers enforcement.
    pub threshold: u32,
    /// Length of the sliding window.
    pub window: Duration,
}

/// Enforcement policy record.
///
/// Windows and the cooldown are whole seconds, matching the persisted layout.
///
/// # Examples
///
/// ```
/// use warden_config::GuardConfig;
/// use warden_core::Bucket;
///
/// let config = GuardConfig::default().with_ban_threshold(5);
/// assert_eq!(config.limit(Bucket::Bans).threshold, 5);
/// assert_eq!(config.log_channel(), "mod-logs");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct GuardConfig {
    /// Roles whose holders are never enforced against
    #[serde(default)]
    whitelisted_role_ids: BTreeSet<RoleId>,

    /// Bans allowed per window
    #[serde(default = "default_ban_threshold")]
    ban_threshold: u32,

    /// Ban window (seconds)
    #[serde(default = "default_window")]
    ban_window: u64,

    /// Channel creations/deletions allowed per window
    #[serde(default = "default_channel_threshold")]
    channel_threshold: u32,

    /// Channel window (seconds)
    #[serde(default = "default_window")]
    channel_window: u64,

    /// Role creations allowed per window
    #[serde(default = "default_role_threshold")]
    role_threshold: u32,

    /// Role window (seconds)
    #[serde(default = "default_window")]
    role_window: u64,

    /// Name of the text channel that receives enforcement logs
    #[serde(default = "default_log_channel")]
    #[setters(into)]
    log_channel: String,

    /// Per-user cooldown for administrative commands (seconds)
    #[serde(default = "default_command_cooldown")]
    command_cooldown: u64,
}

fn default_ban_threshold() -> u32 {
    2
}

fn default_channel_threshold() -> u32 {
    3
}

fn default_role_threshold() -> u32 {
    2
}

fn default_window() -> u64 {
    10
}

fn default_log_channel() -> String {
    "mod-logs".to_string()
}

fn default_command_cooldown() -> u64 {
    5
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            whitelisted_role_ids: BTreeSet::new(),
            ban_threshold: default_ban_threshold(),
            ban_window: default_window(),
            channel_threshold: default_channel_threshold(),
            channel_window: default_window(),
            role_threshold: default_role_threshold(),
            role_window: default_window(),
            log_channel: default_log_channel(),
            command_cooldown: default_command_cooldown(),
        }
    }
}

impl GuardConfig {
    /// Threshold and window for a counter bucket.
    pub fn limit(&self, bucket: Bucket) -> CategoryLimit {
        let (threshold, window_secs) = match bucket {
            Bucket::Bans => (self.ban_threshold, self.ban_window),
            Bucket::Channels => (self.channel_threshold, self.channel_window),
            Bucket::Roles => (self.role_threshold, self.role_window),
        };
        CategoryLimit {
            threshold,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Whether the actor holds any whitelisted role.
    pub fn is_whitelisted(&self, actor: &ActorProfile) -> bool {
        actor
            .roles()
            .iter()
            .any(|role| self.whitelisted_role_ids.contains(role))
    }

    /// Command cooldown as a duration.
    pub fn command_cooldown_duration(&self) -> Duration {
        Duration::from_secs(self.command_cooldown)
    }

    /// Replace the whitelist with a single role.
    pub fn set_whitelist(&mut self, role: RoleId) {
        self.whitelisted_role_ids.clear();
        self.whitelisted_role_ids.insert(role);
    }

    /// Add a role to the whitelist. Returns false if it was already present.
    pub fn add_whitelisted_role(&mut self, role: RoleId) -> bool {
        self.whitelisted_role_ids.insert(role)
    }

    /// Remove a role from the whitelist. Returns false if it was absent.
    pub fn remove_whitelisted_role(&mut self, role: RoleId) -> bool {
        self.whitelisted_role_ids.remove(&role)
    }

    /// Check the record for values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns an error if any window or the cooldown is zero, or the log channel
    /// name is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, secs) in [
            ("ban_window", self.ban_window),
            ("channel_window", self.channel_window),
            ("role_window", self.role_window),
            ("command_cooldown", self.command_cooldown),
        ] {
            if secs == 0 {
                return Err(ConfigError::new(format!("{} must be non-zero", name)));
            }
        }
        if self.log_channel.trim().is_empty() {
            return Err(ConfigError::new("log_channel must not be empty"));
        }
        Ok(())
    }

    /// Field names and values for display, in persisted order.
    ///
    /// Names are title-cased (`ban_threshold` becomes `Ban Threshold`).
    pub fn fields(&self) -> Vec<(String, String)> {
        let whitelist = if self.whitelisted_role_ids.is_empty() {
            "none".to_string()
        } else {
            self.whitelisted_role_ids
                .iter()
                .map(|role| role.get().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };

        [
            ("whitelisted_role_ids", whitelist),
            ("ban_threshold", self.ban_threshold.to_string()),
            ("ban_window", self.ban_window.to_string()),
            ("channel_threshold", self.channel_threshold.to_string()),
            ("channel_window", self.channel_window.to_string()),
            ("role_threshold", self.role_threshold.to_string()),
            ("role_window", self.role_window.to_string()),
            ("log_channel", self.log_channel.clone()),
            ("command_cooldown", self.command_cooldown.to_string()),
        ]
        .into_iter()
        .map(|(key, value)| (title_case(key), value))
        .collect()
    }
}

fn title_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::ActorId;

    #[test]
    fn test_default_limits_and_windows() {
        let config = GuardConfig::default();
        assert_eq!(config.limit(Bucket::Bans).threshold, 2);
        assert_eq!(config.limit(Bucket::Channels).threshold, 3);
        assert_eq!(config.limit(Bucket::Roles).threshold, 2);
        assert_eq!(config.limit(Bucket::Roles).window, Duration::from_secs(10));
        assert_eq!(config.command_cooldown_duration(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_whitelist_membership() {
        let mut config = GuardConfig::default();
        config.set_whitelist(RoleId::new(77));

        let exempt = ActorProfile::member(ActorId::new(1), vec![RoleId::new(5), RoleId::new(77)]);
        let plain = ActorProfile::member(ActorId::new(2), vec![RoleId::new(5)]);

        assert!(config.is_whitelisted(&exempt));
        assert!(!config.is_whitelisted(&plain));
    }

    #[test]
    fn test_set_whitelist_replaces() {
        let mut config = GuardConfig::default();
        assert!(config.add_whitelisted_role(RoleId::new(1)));
        assert!(!config.add_whitelisted_role(RoleId::new(1)));
        config.set_whitelist(RoleId::new(2));
        assert_eq!(config.whitelisted_role_ids().len(), 1);
        assert!(config.whitelisted_role_ids().contains(&RoleId::new(2)));
        assert!(config.remove_whitelisted_role(RoleId::new(2)));
        assert!(config.whitelisted_role_ids().is_empty());
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let config = GuardConfig::default().with_channel_window(0);
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("channel_window"));
    }

    #[test]
    fn test_validate_rejects_blank_log_channel() {
        let config = GuardConfig::default().with_log_channel("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fields_are_title_cased() {
        let fields = GuardConfig::default().fields();
        assert_eq!(fields[0], ("Whitelisted Role Ids".to_string(), "none".to_string()));
        assert_eq!(fields[1], ("Ban Threshold".to_string(), "2".to_string()));
        assert_eq!(fields[7], ("Log Channel".to_string(), "mod-logs".to_string()));
        assert_eq!(fields.len(), 9);
    }
}
