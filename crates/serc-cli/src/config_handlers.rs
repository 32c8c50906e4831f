//! `serc config` subcommands.
//!
//! Keys are `<table>.<field>` pairs from [`SiteConfig`], e.g. `content.root`
//! or `storage.dir`. Only keys that exist in the configuration can be set,
//! and values take the type of the field they replace.

use std::path::{Path, PathBuf};

use toml::Value;

use crate::cli::ConfigAction;
use crate::config::{ConfigManager, SiteConfig};
use crate::error::{Error, Result};

/// Run a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => show_path(config_path),
        ConfigAction::Get { key } => {
            let config = SiteConfig::load(config_path)?;
            println!("{}", get_value(&config, &key)?);
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let path = existing_config_path(config_path)?;
            set_value(&path, &key, &value)?;
            println!("Set {key} = {value} in {}", path.display());
            Ok(())
        }
        ConfigAction::Init { file, force } => {
            // An explicit --config also names the file to create.
            let target = match file.as_deref().or(config_path) {
                Some(p) => PathBuf::from(p),
                None => SiteConfig::default_config_path()
                    .ok_or_else(|| Error::config("Could not determine config directory"))?,
            };
            init(&target, force)?;
            println!("Config file created at {}", target.display());
            Ok(())
        }
        ConfigAction::Export { docker_env } => {
            let config = SiteConfig::load(config_path)?;
            for line in env_lines(&config, docker_env)? {
                println!("{line}");
            }
            Ok(())
        }
    }
}

fn show_path(config_path: Option<&str>) -> Result<()> {
    let path = SiteConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `serc config init` to create it)");
    }
    Ok(())
}

fn existing_config_path(config_path: Option<&str>) -> Result<PathBuf> {
    let path = SiteConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `serc config init` first.",
            path.display()
        )));
    }
    Ok(path)
}

/// Render one value, or a whole table, of the effective configuration.
pub fn get_value(config: &SiteConfig, key: &str) -> Result<String> {
    let tree = Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    let value = match key.split_once('.') {
        None => tree.get(key),
        Some((table, field)) => tree.get(table).and_then(|t| t.get(field)),
    }
    .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))?;

    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Table(_) => toml::to_string_pretty(value).map_err(|e| Error::config(e.to_string())),
        other => Ok(other.to_string()),
    }
}

/// Set `<table>.<field>` in the file at `path`.
///
/// The file is left untouched unless the edited document still loads.
pub fn set_value(path: &Path, key: &str, raw: &str) -> Result<()> {
    let (table, field) = key
        .split_once('.')
        .ok_or_else(|| Error::config(format!("Expected <table>.<field>, got '{key}'")))?;

    let defaults = Value::try_from(SiteConfig::default()).map_err(|e| Error::config(e.to_string()))?;
    let value = match defaults.get(table).and_then(|t| t.get(field)) {
        Some(Value::Boolean(_)) => match raw {
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            _ => {
                return Err(Error::config(format!(
                    "'{key}' takes true or false, got '{raw}'"
                )));
            }
        },
        Some(Value::String(_)) => Value::String(raw.to_string()),
        _ => return Err(Error::config(format!("Unknown config key '{key}'"))),
    };

    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    let mut doc: toml::Table = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
    doc.entry(table)
        .or_insert(Value::Table(toml::Table::new()))
        .as_table_mut()
        .ok_or_else(|| Error::config(format!("'{table}' in {} is not a table", path.display())))?
        .insert(field.to_string(), value);

    let rendered = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    SiteConfig::from_toml_str(&rendered)?;
    std::fs::write(path, rendered).map_err(|e| Error::io_with_path(e, path))
}

/// Write a default configuration file at `path`.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }
    let rendered = SiteConfig::default().to_toml_string()?;
    std::fs::write(path, rendered).map_err(|e| Error::io_with_path(e, path))
}

/// `KEY=VALUE` lines, or `--env KEY=VALUE` for docker.
pub fn env_lines(config: &SiteConfig, docker_env: bool) -> Result<Vec<String>> {
    let prefix = if docker_env { "--env " } else { "" };
    Ok(config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| format!("{prefix}{key}={value}"))
        .collect())
}
