// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for application bootstrap.

mod common;

use common::write_file;
use ministruts::domain::ConnectionSettings;
use ministruts::prelude::*;
use std::fs;

fn app_root() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir(root.path().join("config")).unwrap();
    root
}

#[test]
fn test_bootstrap_reads_config_dir() {
    let root = app_root();
    let config = root.path().join("config");
    write_file(&config, "config.dist.properties", "db.main.connector = mysql\ndb.main.host = dist\n");
    write_file(&config, "config.properties", "db.main.host = 10.0.0.5\n");

    let ctx = AppContext::new(AppOptions::new(root.path())).unwrap();
    let settings = ConnectionSettings::from_config(ctx.config(), "main").unwrap();

    assert_eq!(settings.connector, "mysql");
    assert_eq!(settings.host, "10.0.0.5");
}

#[test]
fn test_bootstrap_records_directories() {
    let root = app_root();
    let ctx = AppContext::new(AppOptions::new(root.path())).unwrap();

    let root_value = ctx.config().get_str("app.dir.root").unwrap();
    let config_value = ctx.config().get_str("app.dir.config").unwrap();
    assert_eq!(root_value.as_str(), Some(root.path().to_str().unwrap()));
    assert_eq!(
        config_value.as_str(),
        Some(root.path().join("config").to_str().unwrap())
    );
}

#[test]
fn test_directories_survive_reload() {
    let root = app_root();
    let mut ctx = AppContext::new(AppOptions::new(root.path())).unwrap();
    ctx.config_mut().reload().unwrap();
    assert!(ctx.config().get_str("app.dir.root").is_ok());
}

#[test]
fn test_bootstrap_without_config_dir_fails() {
    let root = tempfile::tempdir().unwrap();
    assert!(AppContext::new(AppOptions::new(root.path())).is_err());
}

#[test]
fn test_independent_contexts() {
    let first = app_root();
    let second = app_root();
    write_file(&first.path().join("config"), "config.properties", "app.name = first\n");
    write_file(&second.path().join("config"), "config.properties", "app.name = second\n");

    let a = AppContext::new(AppOptions::new(first.path())).unwrap();
    let b = AppContext::new(AppOptions::new(second.path())).unwrap();

    assert_eq!(a.config().get_str("app.name").unwrap(), ConfigValue::from("first"));
    assert_eq!(b.config().get_str("app.name").unwrap(), ConfigValue::from("second"));
}

#[test]
#[cfg(feature = "env")]
fn test_bootstrap_env_prefix() {
    let mut guard = common::EnvGuard::new();
    guard.set("MSCTX_APP_NAME", "from-env");

    let root = app_root();
    write_file(&root.path().join("config"), "config.properties", "app.name = from-file\n");

    let ctx = AppContext::new(AppOptions::new(root.path()).env_prefix("MSCTX_")).unwrap();
    assert_eq!(ctx.config().get_str("app.name").unwrap(), ConfigValue::from("from-env"));
}

#[test]
fn test_messenger_requires_default() {
    let root = app_root();
    let ctx = AppContext::new(AppOptions::new(root.path())).unwrap();
    assert!(ctx.messenger().is_err());
}
