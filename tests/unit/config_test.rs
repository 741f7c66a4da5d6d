//! Tests for configuration validation

use std::path::PathBuf;

use slotkeeper::config::{EngineConfig, StoreBackendConfig};

#[test]
fn test_default_config_is_valid() {
    let cfg = EngineConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.seed_resources.len(), 3);
}

#[test]
fn test_json_file_backend_requires_data_dir() {
    let cfg = EngineConfig {
        store: StoreBackendConfig::JsonFile,
        data_dir: None,
        ..EngineConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = EngineConfig {
        store: StoreBackendConfig::JsonFile,
        data_dir: Some(PathBuf::from("/tmp/slotkeeper")),
        ..EngineConfig::default()
    };
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_zero_shard_count_is_invalid() {
    let cfg = EngineConfig {
        shard_count: Some(0),
        ..EngineConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_seed_resources_are_validated() {
    let mut cfg = EngineConfig::default();
    cfg.seed_resources[0].capacity = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.seed_resources[1].cost = -1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.seed_resources[2].id = "  ".into();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "store": "in_memory",
        "shard_count": 8
    }"#;
    let cfg = EngineConfig::from_json_str(json).unwrap();
    assert!(matches!(cfg.store, StoreBackendConfig::InMemory));
    assert_eq!(cfg.shard_count, Some(8));
    // Absent seed list falls back to the stock halls.
    assert_eq!(cfg.seed_resources.len(), 3);
}

#[test]
fn test_config_from_json_rejects_invalid_values() {
    let json = r#"{
        "store": "json_file"
    }"#;
    assert!(EngineConfig::from_json_str(json).is_err());

    assert!(EngineConfig::from_json_str("not json").is_err());
}
