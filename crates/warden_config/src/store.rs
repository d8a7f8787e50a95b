//! Runtime-mutable, persisted guard configuration.

use crate::GuardConfig;
use parking_lot::{Mutex, RwLock};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use warden_core::RoleId;
use warden_error::{PersistenceError, PersistenceErrorKind};

/// Where the guard record is persisted.
pub trait ConfigBackend: Send + Sync {
    /// Read the persisted record, `None` if nothing has been stored yet.
    fn read(&self) -> Result<Option<GuardConfig>, PersistenceError>;

    /// Replace the persisted record.
    fn write(&self, config: &GuardConfig) -> Result<(), PersistenceError>;

    /// Short description for diagnostics.
    fn describe(&self) -> String;
}

/// TOML file backend.
///
/// Writes go to a sibling temporary file that is renamed into place, so a failed
/// write never leaves a truncated record behind.
#[derive(Debug, Clone)]
pub struct TomlFileBackend {
    path: PathBuf,
}

impl TomlFileBackend {
    /// Create a backend for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The record's path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigBackend for TomlFileBackend {
    fn read(&self) -> Result<Option<GuardConfig>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::Read {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })
        })?;

        toml::from_str(&content)
            .map(Some)
            .map_err(|e| PersistenceError::new(PersistenceErrorKind::Parse(e.to_string())))
    }

    fn write(&self, config: &GuardConfig) -> Result<(), PersistenceError> {
        let content = toml::to_string_pretty(config)
            .map_err(|e| PersistenceError::new(PersistenceErrorKind::Serialize(e.to_string())))?;

        let write_err = |e: std::io::Error| {
            PersistenceError::new(PersistenceErrorKind::Write {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })
        };

        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, content).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory backend for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slot: Mutex<Option<GuardConfig>>,
    fail_writes: Mutex<bool>,
}

impl MemoryBackend {
    /// Empty backend: the first load stores defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that already holds a record.
    pub fn with_config(config: GuardConfig) -> Self {
        Self {
            slot: Mutex::new(Some(config)),
            fail_writes: Mutex::new(false),
        }
    }

    /// Make subsequent writes fail, simulating an unwritable store.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock() = fail;
    }

    /// The currently stored record.
    pub fn stored(&self) -> Option<GuardConfig> {
        self.slot.lock().clone()
    }
}

impl ConfigBackend for MemoryBackend {
    fn read(&self) -> Result<Option<GuardConfig>, PersistenceError> {
        Ok(self.slot.lock().clone())
    }

    fn write(&self, config: &GuardConfig) -> Result<(), PersistenceError> {
        if *self.fail_writes.lock() {
            return Err(PersistenceError::new(PersistenceErrorKind::Write {
                path: "memory".to_string(),
                reason: "writes disabled".to_string(),
            }));
        }
        *self.slot.lock() = Some(config.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Holds the live guard configuration and keeps it in sync with its backend.
///
/// Readers always get a complete snapshot. Updates are applied to a copy,
/// validated, persisted, and only then swapped in; if any step fails the live
/// value stays at its last good state.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use warden_config::{ConfigStore, MemoryBackend};
/// use warden_core::RoleId;
///
/// let store = ConfigStore::load(Arc::new(MemoryBackend::new())).unwrap();
/// let updated = store.set_whitelist(RoleId::new(42)).unwrap();
/// assert!(updated.whitelisted_role_ids().contains(&RoleId::new(42)));
/// assert_eq!(store.view(), updated);
/// ```
pub struct ConfigStore {
    backend: Arc<dyn ConfigBackend>,
    current: RwLock<GuardConfig>,
    update_lock: Mutex<()>,
}

impl ConfigStore {
    /// Load the persisted record, creating and persisting defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read or parsed, fails
    /// validation, or the defaults cannot be written.
    #[instrument(skip(backend), fields(store = %backend.describe()))]
    pub fn load(backend: Arc<dyn ConfigBackend>) -> Result<Self, PersistenceError> {
        let config = match backend.read()? {
            Some(config) => {
                debug!("Loaded persisted guard configuration");
                config
                    .validate()
                    .map_err(|e| PersistenceError::new(PersistenceErrorKind::Invalid(e.message)))?;
                config
            }
            None => {
                info!("No guard configuration found, writing defaults");
                let config = GuardConfig::default();
                backend.write(&config)?;
                config
            }
        };

        Ok(Self {
            backend,
            current: RwLock::new(config),
            update_lock: Mutex::new(()),
        })
    }

    /// Load from a TOML file, creating it with defaults if missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        Self::load(Arc::new(TomlFileBackend::new(path)))
    }

    /// Snapshot of the current configuration.
    pub fn view(&self) -> GuardConfig {
        self.current.read().clone()
    }

    /// Apply a change, persist it, and return the new configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the changed record is invalid or cannot be persisted.
    /// The live configuration is unchanged in that case.
    #[instrument(skip(self, mutator), fields(store = %self.backend.describe()))]
    pub fn update<F>(&self, mutator: F) -> Result<GuardConfig, PersistenceError>
    where
        F: FnOnce(&mut GuardConfig),
    {
        let _serialized = self.update_lock.lock();

        let mut next = self.current.read().clone();
        mutator(&mut next);

        if let Err(e) = next.validate() {
            warn!(error = %e, "Rejected invalid guard configuration update");
            return Err(PersistenceError::new(PersistenceErrorKind::Invalid(e.message)));
        }

        if let Err(e) = self.backend.write(&next) {
            warn!(error = %e, "Failed to persist guard configuration, keeping last good value");
            return Err(e);
        }

        *self.current.write() = next.clone();
        info!("Guard configuration updated");
        Ok(next)
    }

    /// Replace the whitelist with a single role.
    pub fn set_whitelist(&self, role: RoleId) -> Result<GuardConfig, PersistenceError> {
        self.update(|config| config.set_whitelist(role))
    }

    /// Add a role to the whitelist.
    pub fn add_whitelisted_role(&self, role: RoleId) -> Result<GuardConfig, PersistenceError> {
        self.update(|config| {
            config.add_whitelisted_role(role);
        })
    }

    /// Remove a role from the whitelist.
    pub fn remove_whitelisted_role(&self, role: RoleId) -> Result<GuardConfig, PersistenceError> {
        self.update(|config| {
            config.remove_whitelisted_role(role);
        })
    }
}
