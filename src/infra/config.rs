// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub iteration: IterationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

/// Per-role model overrides in "provider/model" form. Unset roles fall
/// back to the resolved default model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelsConfig {
    pub generator: Option<String>,
    pub evaluator: Option<String>,
    pub reviser: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationConfig {
    /// Default revision cap when the request doesn't specify one (1-5).
    pub default_max_iteration: u8,
}

impl Default for IterationConfig {
    fn default() -> Self {
        Self {
            default_max_iteration: 3,
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
