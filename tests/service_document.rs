//! Loading and saving the aggregated document on disk.

use std::time::Duration;

use cluster_config::config::loader::default_config;
use cluster_config::config::{load_config, ConfigError, ConfigManager};

mod common;

#[test]
fn test_load_config_from_file() {
    let (_dir, path) = common::write_document(common::SERVICE_JSON);
    let config = load_config(&path).unwrap();

    let proxy = config.proxy().unwrap();
    assert_eq!(proxy.proxy_socket_addr(), Some("0.0.0.0:9095".parse().unwrap()));
    assert_eq!(proxy.node_socket_addr(), Some("10.0.0.5:5001".parse().unwrap()));
    assert_eq!(proxy.proxy_read_timeout.as_timeout(), Some(Duration::from_secs(600)));
    assert_eq!(proxy.proxy_write_timeout.as_timeout(), None);
    assert_eq!(proxy.proxy_idle_timeout.as_timeout(), Some(Duration::from_secs(90)));

    let informer = config.informer().unwrap();
    assert_eq!(informer.metric_ttl.to_std(), Some(Duration::from_secs(15)));
}

#[test]
fn test_save_then_load_round_trip() {
    let (_dir, path) = common::write_document(common::SERVICE_JSON);
    let config = load_config(&path).unwrap();

    let copy = path.with_file_name("copy.json");
    config.save_to_file(&copy).unwrap();
    assert_eq!(load_config(&copy).unwrap(), config);

    let doc = common::read_document(&copy);
    assert_eq!(doc["api"]["ipfsproxy"]["proxy_idle_timeout"], "1m30s");
    assert_eq!(doc["informer"]["numpin"]["metric_ttl"], "15s");
}

#[test]
fn test_saved_defaults_are_stable() {
    let (_dir, path) = common::write_document("");
    default_config().unwrap().save_to_file(&path).unwrap();
    let first = std::fs::read_to_string(&path).unwrap();

    load_config(&path).unwrap().save_to_file(&path).unwrap();
    let second = std::fs::read_to_string(&path).unwrap();

    assert_eq!(first, second);
    assert!(first.starts_with("{\n  \"api\": {\n    \"ipfsproxy\": {"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_invalid_component_aborts_load() {
    let (_dir, path) = common::write_document(
        r#"{"api": {"ipfsproxy": {"proxy_read_timeout": "-5s"}}}"#,
    );
    let err = load_config(&path).unwrap_err();
    assert_eq!(err.component(), Some("ipfsproxy"));
    assert_eq!(err.field(), Some("proxy_read_timeout"));
}

#[test]
fn test_partial_document_fills_defaults() {
    let (_dir, path) = common::write_document(r#"{"informer": {"numpin": {"metric_ttl": "1m"}}}"#);
    let config = load_config(&path).unwrap();

    let mut expected = ConfigManager::with_all_components();
    expected.apply_defaults().unwrap();
    assert_eq!(config.proxy(), expected.proxy());
    assert_ne!(config.informer(), expected.informer());
}
