//! Configuration for the `serc` tool.
//!
//! Loaded from TOML, resolved in order: `--config` flag, `SERC_CONFIG`,
//! then `<platform config dir>/serc/config.toml`. A missing file means
//! defaults. A few environment variables override individual values.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serc_content::admin::DEFAULT_ADMIN_PASSPHRASE;
use serc_content::images::DEFAULT_IMAGE_KEY;
use serc_content::overrides::DEFAULT_OVERRIDE_KEY;

use crate::error::{Error, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SERC_CONFIG";

// ============================================================================
// ConfigManager
// ============================================================================

/// Behaviour shared by file-backed TOML configurations.
pub trait ConfigManager: Default + Serialize + DeserializeOwned {
    /// Short project name, used for the config directory and messages.
    fn project_name() -> &'static str;

    /// `<platform config dir>/<project>/config.toml`, if the platform has one.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(Self::project_name()).join("config.toml"))
    }

    /// Resolve the config file path from an explicit value, the environment,
    /// or the platform default.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf>;

    /// Load the configuration, falling back to defaults when no file exists.
    fn load(config_path: Option<&str>) -> Result<Self>;

    /// Render as TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Environment variables that reproduce this configuration.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>>;
}

// ============================================================================
// SiteConfig
// ============================================================================

/// Where baseline documents come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory path or `http(s)://` base URL holding `<section>.json`
    pub root: String,
    /// Check documents against section shapes
    pub validate_schema: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: "./public/data".to_string(),
            validate_schema: true,
        }
    }
}

/// Where local state is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage directory (`~` is expanded)
    pub dir: String,
    /// Key holding section overrides
    pub override_key: String,
    /// Key holding the image library
    pub image_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let dir = dirs::data_dir()
            .map(|d| d.join("serc").display().to_string())
            .unwrap_or_else(|| "~/.serc".to_string());
        Self {
            dir,
            override_key: DEFAULT_OVERRIDE_KEY.to_string(),
            image_key: DEFAULT_IMAGE_KEY.to_string(),
        }
    }
}

/// Admin gate settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Passphrase that unlocks admin commands
    pub passphrase: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            passphrase: DEFAULT_ADMIN_PASSPHRASE.to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Full `serc` configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// `[content]`
    pub content: ContentConfig,
    /// `[storage]`
    pub storage: StorageConfig,
    /// `[admin]`
    pub admin: AdminConfig,
    /// `[logging]`
    pub logging: LoggingConfig,
}

impl SiteConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Apply `SERC_*` overrides using `lookup` to read variables.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup("SERC_CONTENT_ROOT") {
            self.content.root = root;
        }
        if let Some(dir) = lookup("SERC_STORAGE_DIR") {
            self.storage.dir = dir;
        }
        if let Some(level) = lookup("SERC_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Content root with `~` expanded.
    pub fn content_root(&self) -> String {
        shellexpand::tilde(&self.content.root).into_owned()
    }

    /// Storage directory with `~` expanded.
    pub fn storage_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.storage.dir).into_owned())
    }
}

impl ConfigManager for SiteConfig {
    fn project_name() -> &'static str {
        "serc"
    }

    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(shellexpand::tilde(path).into_owned()));
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(shellexpand::tilde(&path).into_owned()));
        }
        Self::default_config_path()
    }

    fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(config_path) {
            Some(path) if path.exists() => {
                log::debug!("Loading config from {}", path.display());
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
                toml::from_str(&content).map_err(|e| {
                    Error::config(format!("Failed to parse {}: {e}", path.display()))
                })?
            }
            _ => Self::default(),
        };
        config.apply_env_with(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        Ok(vec![
            ("SERC_CONTENT_ROOT".to_string(), self.content.root.clone()),
            ("SERC_STORAGE_DIR".to_string(), self.storage.dir.clone()),
            ("SERC_LOG_LEVEL".to_string(), self.logging.level.clone()),
        ])
    }
}
