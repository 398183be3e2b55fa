// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for basic configuration store operations.

mod common;

use common::{write_file, EnvGuard, MockConfigSource};
use ministruts::domain::{ConnectionSettings, Dao, PersistableObject};
use ministruts::prelude::*;
use std::sync::atomic::Ordering;
use std::sync::{Arc, RwLock};
use std::thread;

fn key(s: &str) -> ConfigKey {
    ConfigKey::new(s).unwrap()
}

#[test]
fn test_fallback_on_empty_store() {
    let store = ConfigStore::new();
    assert_eq!(
        store.get_or(&key("db.host"), "localhost"),
        ConfigValue::from("localhost")
    );
    // the fallback is not stored
    assert!(!store.has(&key("db.host")));
}

#[test]
fn test_set_then_get() {
    let mut store = ConfigStore::new();
    store.set_str("db.host", "10.0.0.5").unwrap();
    assert_eq!(store.get_str("db.host").unwrap(), ConfigValue::from("10.0.0.5"));
}

#[test]
fn test_missing_key_error_names_key() {
    let store = ConfigStore::new();
    let err = store.get_str("missing.key").unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("missing.key"));
}

#[test]
fn test_invalid_key_is_not_a_miss() {
    let store = ConfigStore::new();
    let err = store.get_str_or("a..b", "fallback").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidKey { .. }));
}

#[test]
#[cfg(feature = "yaml")]
fn test_yaml_file_tree() {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        dir.path(),
        "app.yaml",
        "db:\n  main:\n    connector: mysql\n    host: 10.0.0.5\n    port: 3306\nservers:\n  - a\n  - b\n",
    );

    let store = ConfigStore::builder()
        .with_yaml_file(dir.path().join("app.yaml"))
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(store.get_str("db.main.port").unwrap(), ConfigValue::Integer(3306));
    assert_eq!(store.get_str("db/main/host").unwrap(), ConfigValue::from("10.0.0.5"));
    assert_eq!(store.get_str("db.main").unwrap().as_map().unwrap().len(), 3);
    assert_eq!(store.get_str("servers.1").unwrap(), ConfigValue::from("b"));
    assert!(!store.has(&key("servers.2")));
}

#[test]
fn test_properties_file() {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        dir.path(),
        "app.properties",
        "# comment\ndb.main.connector = pgsql\ndb.main.port = 5432\n",
    );

    let store = ConfigStore::builder()
        .with_properties_file(dir.path().join("app.properties"))
        .unwrap()
        .build()
        .unwrap();

    // properties values stay strings; typed access converts
    let port = store.get_str("db.main.port").unwrap();
    assert_eq!(port, ConfigValue::from("5432"));
    assert_eq!(port.as_u16("db.main.port").unwrap(), 5432);
}

#[test]
fn test_malformed_properties_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "bad.properties", "no separator here\n");

    let result = ConfigStore::builder().with_properties_file(dir.path().join("bad.properties"));
    assert!(matches!(result.err(), Some(ConfigError::ParseError { .. })));
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = ConfigStore::builder().with_properties_file(dir.path().join("nope.properties"));
    assert!(result.is_err());
}

#[test]
fn test_keys_after_merge() {
    let store = ConfigStore::builder()
        .with_source(Box::new(
            MockConfigSource::new("a", 1)
                .with_value("b.y", "1")
                .with_value("a", "1"),
        ))
        .with_source(Box::new(MockConfigSource::new("b", 2).with_value("b.x", "2")))
        .build()
        .unwrap();

    let keys: Vec<String> = store.keys().into_iter().map(String::from).collect();
    assert_eq!(keys, vec!["a", "b.x", "b.y"]);
}

#[test]
fn test_reload_preserves_runtime_overrides() {
    let source = MockConfigSource::new("file", 1)
        .with_value("db.host", "file")
        .with_value("db.port", "1");
    let mut store = ConfigStore::builder()
        .with_source(Box::new(source))
        .build()
        .unwrap();

    store.set_str("db.host", "runtime").unwrap();
    store.reload().unwrap();

    assert_eq!(store.get_str("db.host").unwrap(), ConfigValue::from("runtime"));
    assert_eq!(store.get_str("db.port").unwrap(), ConfigValue::from("1"));
}

#[test]
fn test_reload_skips_failing_source() {
    let flaky = MockConfigSource::new("flaky", 1).with_value("a", "1");
    let switch = flaky.fail_switch();
    let mut store = ConfigStore::builder()
        .with_source(Box::new(flaky))
        .with_source(Box::new(MockConfigSource::new("ok", 2).with_value("b", "2")))
        .build()
        .unwrap();

    switch.store(true, Ordering::SeqCst);
    assert!(store.reload().is_ok());
    assert!(store.has(&key("b")));
}

#[test]
fn test_shared_store_behind_rwlock() {
    let store = Arc::new(RwLock::new(ConfigStore::new()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = store.clone();
            thread::spawn(move || {
                let k = key(&format!("worker.{}", i));
                store.write().unwrap().set(k.clone(), ConfigValue::from(i as i64));
                store.read().unwrap().get(&k).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), ConfigValue::from(i as i64));
    }
    assert_eq!(store.read().unwrap().keys().len(), 4);
}

struct AccountDao;

impl Dao for AccountDao {
    fn entity_name(&self) -> &str {
        "Account"
    }

    fn connection(&self) -> &str {
        "main"
    }
}

struct Account;

impl PersistableObject for Account {
    fn dao() -> &'static dyn Dao {
        static DAO: AccountDao = AccountDao;
        &DAO
    }
}

#[test]
fn test_dao_connection_settings_from_store() {
    let mut store = ConfigStore::new();
    store.set_str("db.main.connector", "mysql").unwrap();
    store.set_str("db.main.port", 3306).unwrap();
    store.set_str("db.main.username", "app").unwrap();

    let settings = Account::dao().connection_settings(&store).unwrap();
    assert_eq!(
        settings,
        ConnectionSettings {
            name: "main".to_string(),
            connector: "mysql".to_string(),
            host: "localhost".to_string(),
            port: Some(3306),
            database: None,
            username: Some("app".to_string()),
            password: None,
        }
    );
}

#[test]
fn test_dao_missing_connector() {
    let store = ConfigStore::new();
    let err = Account::dao().connection_settings(&store).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
#[cfg(feature = "env")]
fn test_oversized_env_vars_are_skipped() {
    let mut guard = EnvGuard::new();
    guard.set("MSBIG_SMALL", "ok");
    guard.set("MSBIG_HUGE", &"x".repeat(1024 * 1024 + 1));
    guard.set(&format!("MSBIG_{}", "K".repeat(600)), "long name");

    let adapter = EnvVarAdapter::with_prefix("MSBIG_");
    let keys = adapter.all_keys().unwrap();
    assert_eq!(keys, vec![key("SMALL")]);
    assert!(adapter.get(&key("HUGE")).unwrap().is_none());
}

#[test]
fn test_with_defaults_without_default_file() {
    let store = ConfigStore::with_defaults("ministruts-no-such-app-7f3a", "org.example").unwrap();

    #[cfg(feature = "env")]
    assert_eq!(store.source_names(), vec!["env"]);
    #[cfg(not(feature = "env"))]
    assert!(store.source_names().is_empty());

    for k in store.keys() {
        assert!(store.get(&k).is_ok());
    }
}
