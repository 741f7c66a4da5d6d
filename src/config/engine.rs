//! Engine configuration structures.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::model::Resource;

/// Environment variable naming a JSON config file to load.
pub const CONFIG_PATH_ENV: &str = "SLOTKEEPER_CONFIG";

/// Record store backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackendConfig {
    /// Sharded in-memory store for development/testing and embedded use.
    InMemory,
    /// JSON-file store; one file per collection under `data_dir`.
    JsonFile,
}

/// Root engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Backend used for resources, accounts, and bookings.
    pub store: StoreBackendConfig,
    /// Directory for collection files; required for the JSON-file backend.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Shard count for the in-memory backend; defaults to the core count.
    #[serde(default)]
    pub shard_count: Option<usize>,
    /// Resources seeded into an empty catalog store at first boot.
    #[serde(default = "EngineConfig::default_seed")]
    pub seed_resources: Vec<Resource>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            store: StoreBackendConfig::InMemory,
            data_dir: None,
            shard_count: None,
            seed_resources: Self::default_seed(),
        }
    }
}

impl EngineConfig {
    /// The stock catalog: three community halls.
    #[must_use]
    pub fn default_seed() -> Vec<Resource> {
        vec![
            Resource {
                id: "c1".into(),
                name: "Community Hall A".into(),
                location: "Dhaka".into(),
                capacity: 50,
                cost: 500.0,
            },
            Resource {
                id: "c2".into(),
                name: "Community Hall B".into(),
                location: "Chittagong".into(),
                capacity: 100,
                cost: 1000.0,
            },
            Resource {
                id: "c3".into(),
                name: "Community Hall C".into(),
                location: "Sylhet".into(),
                capacity: 30,
                cost: 300.0,
            },
        ]
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// A human-readable description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if matches!(self.store, StoreBackendConfig::JsonFile) && self.data_dir.is_none() {
            return Err("json_file backend requires data_dir".into());
        }
        if self.shard_count == Some(0) {
            return Err("shard_count must be greater than 0".into());
        }
        for resource in &self.seed_resources {
            if resource.id.trim().is_empty() {
                return Err("seed resource with empty id".into());
            }
            if resource.capacity == 0 {
                return Err(format!("seed resource `{}` has zero capacity", resource.id));
            }
            if resource.cost < 0.0 {
                return Err(format!("seed resource `{}` has negative cost", resource.id));
            }
        }
        Ok(())
    }

    /// Parse engine configuration from a JSON string and validate.
    ///
    /// # Errors
    /// A human-readable parse or validation failure.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the environment.
    ///
    /// Reads `.env` if present (via dotenvy), then the file named by
    /// `SLOTKEEPER_CONFIG`. Falls back to the in-memory default when the
    /// variable is unset.
    ///
    /// # Errors
    /// A human-readable failure reading or parsing the named file.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .map_err(|e| format!("cannot read {path}: {e}"))?;
                Self::from_json_str(&raw)
            }
            Err(_) => Ok(Self::default()),
        }
    }
}
