//! Configuration management for CLI tools.
//!
//! Configuration is stored in ~/.handsign/{app_name}/config.yaml:
//!
//! ```yaml
//! k: 3
//! dimension: 63
//! storage:
//!   backend: redb        # redb | json | memory
//!   path: data/training.redb
//! model: /path/to/model.json
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::paths::{Paths, DEFAULT_DATA_DIR};

/// Where the durable training slot lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// A key in a redb database.
    #[default]
    Redb,
    /// A JSON model file.
    Json,
    /// Nothing is kept between runs.
    Memory,
}

impl Backend {
    /// Returns the lowercase name used in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Redb => "redb",
            Self::Json => "json",
            Self::Memory => "memory",
        }
    }

    fn default_file(self) -> &'static str {
        match self {
            Self::Redb => "training.redb",
            Self::Json | Self::Memory => "training.json",
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redb" => Ok(Self::Redb),
            "json" => Ok(Self::Json),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend: {other} (want redb, json or memory)")),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable slot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: Backend,

    /// Slot location. Relative paths are resolved against the config
    /// directory; empty selects `data/training.<ext>`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Neighbors consulted per classification.
    #[serde(default = "default_k")]
    pub k: usize,

    /// Feature vector length.
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    #[serde(default)]
    pub storage: StorageConfig,

    /// Model file imported at startup when the slot is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<PathBuf>,

    /// Path to the config file (not serialized).
    #[serde(skip)]
    config_path: PathBuf,
}

fn default_k() -> usize {
    3
}

fn default_dimension() -> usize {
    63
}

impl Default for Config {
    fn default() -> Self {
        Self {
            k: default_k(),
            dimension: default_dimension(),
            storage: StorageConfig::default(),
            model: None,
            config_path: PathBuf::new(),
        }
    }
}

impl Config {
    /// Gets the default config file path.
    pub fn default_config_path(app_name: &str) -> Option<PathBuf> {
        Paths::new(app_name).ok().map(|p| p.config_file())
    }

    /// Returns the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Returns the config directory path.
    pub fn dir(&self) -> Option<&Path> {
        self.config_path.parent()
    }

    /// Resolves the slot location for the configured backend.
    pub fn storage_path(&self) -> PathBuf {
        let base = self.dir().map(Path::to_path_buf).unwrap_or_default();
        if self.storage.path.is_empty() {
            return base
                .join(DEFAULT_DATA_DIR)
                .join(self.storage.backend.default_file());
        }
        let p = PathBuf::from(&self.storage.path);
        if p.is_absolute() {
            p
        } else {
            base.join(p)
        }
    }

    /// Saves the configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }
}

/// Loads configuration for the specified app, creating a default file if
/// none exists.
pub fn load_config(app_name: &str, custom_path: Option<&str>) -> anyhow::Result<Config> {
    let config_path = match custom_path {
        Some(p) => PathBuf::from(p),
        None => Config::default_config_path(app_name)
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path"))?,
    };

    // Ensure config directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut cfg: Config = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        serde_yaml::from_str(&content)?
    } else {
        let cfg = Config::default();
        let content = serde_yaml::to_string(&cfg)?;
        std::fs::write(&config_path, content)?;
        cfg
    };

    if cfg.k == 0 {
        anyhow::bail!("{}: k must be positive", config_path.display());
    }
    if cfg.dimension == 0 {
        anyhow::bail!("{}: dimension must be positive", config_path.display());
    }

    cfg.config_path = config_path;
    Ok(cfg)
}
