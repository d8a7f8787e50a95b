//! Tests for the persisted guard configuration store.

use std::io::Write;
use std::sync::Arc;
use warden_config::{ConfigBackend, ConfigStore, GuardConfig, MemoryBackend, Settings, TomlFileBackend};
use warden_core::{Bucket, RoleId};
use warden_error::PersistenceErrorKind;

#[test]
fn test_load_creates_defaults_when_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guard.toml");
    assert!(!path.exists());

    let store = ConfigStore::open(&path).unwrap();

    assert!(path.exists());
    assert_eq!(store.view(), GuardConfig::default());

    let persisted = TomlFileBackend::new(&path).read().unwrap().unwrap();
    assert_eq!(persisted, GuardConfig::default());
}

#[test]
fn test_load_reads_existing_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guard.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"
whitelisted_role_ids = [123456789012345678]
ban_threshold = 4
ban_window = 30
log_channel = "audit"
"#
    )
    .unwrap();

    let store = ConfigStore::open(&path).unwrap();
    let config = store.view();

    assert_eq!(*config.ban_threshold(), 4);
    assert_eq!(config.limit(Bucket::Bans).window.as_secs(), 30);
    assert_eq!(config.log_channel(), "audit");
    assert!(
        config
            .whitelisted_role_ids()
            .contains(&RoleId::new(123456789012345678))
    );
    // Unspecified fields fall back to defaults
    assert_eq!(*config.channel_threshold(), 3);
    assert_eq!(*config.command_cooldown(), 5);
}

#[test]
fn test_update_persists_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guard.toml");

    let store = ConfigStore::open(&path).unwrap();
    store.set_whitelist(RoleId::new(99)).unwrap();

    let reopened = ConfigStore::open(&path).unwrap();
    assert!(reopened.view().whitelisted_role_ids().contains(&RoleId::new(99)));
}

#[test]
fn test_update_failure_keeps_last_good_value() {
    let backend = Arc::new(MemoryBackend::new());
    let store = ConfigStore::load(backend.clone()).unwrap();
    store.set_whitelist(RoleId::new(1)).unwrap();

    backend.set_fail_writes(true);
    let err = store.set_whitelist(RoleId::new(2)).unwrap_err();
    assert!(matches!(err.kind(), PersistenceErrorKind::Write { .. }));

    let live = store.view();
    assert!(live.whitelisted_role_ids().contains(&RoleId::new(1)));
    assert!(!live.whitelisted_role_ids().contains(&RoleId::new(2)));
    assert_eq!(backend.stored().unwrap(), live);
}

#[test]
fn test_invalid_update_is_rejected() {
    let backend = Arc::new(MemoryBackend::new());
    let store = ConfigStore::load(backend.clone()).unwrap();

    let err = store
        .update(|config| *config = config.clone().with_role_window(0))
        .unwrap_err();

    assert!(matches!(err.kind(), PersistenceErrorKind::Invalid(_)));
    assert_eq!(*store.view().role_window(), 10);
}

#[test]
fn test_invalid_persisted_record_fails_load() {
    let backend = Arc::new(MemoryBackend::with_config(
        GuardConfig::default().with_ban_window(0),
    ));
    assert!(ConfigStore::load(backend).is_err());
}

#[test]
fn test_corrupt_file_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guard.toml");
    std::fs::write(&path, "ban_threshold = \"lots\"").unwrap();

    let err = ConfigStore::open(&path).err().unwrap();
    assert!(matches!(err.kind(), PersistenceErrorKind::Parse(_)));
}

#[test]
fn test_add_and_remove_whitelisted_roles() {
    let store = ConfigStore::load(Arc::new(MemoryBackend::new())).unwrap();
    store.add_whitelisted_role(RoleId::new(1)).unwrap();
    store.add_whitelisted_role(RoleId::new(2)).unwrap();
    assert_eq!(store.view().whitelisted_role_ids().len(), 2);

    store.remove_whitelisted_role(RoleId::new(1)).unwrap();
    let roles = store.view().whitelisted_role_ids().clone();
    assert_eq!(roles.into_iter().collect::<Vec<_>>(), vec![RoleId::new(2)]);
}

#[test]
fn test_settings_from_file_overrides_defaults() {
    let mut temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        temp_file,
        r#"
guard_config_path = "/var/lib/warden/guard.toml"
json_logs = true
"#
    )
    .unwrap();

    let settings = Settings::from_file(temp_file.path()).unwrap();
    assert_eq!(
        settings.guard_config_path().to_str(),
        Some("/var/lib/warden/guard.toml")
    );
    assert!(*settings.json_logs());
    assert_eq!(settings.health_addr(), "0.0.0.0:8080");
    assert!(*settings.health_enabled());
}
