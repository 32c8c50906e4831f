//! Durable section overrides.
//!
//! All overrides live under a single storage key as one JSON object mapping
//! section name to the replacement document. Reads are lenient: a missing,
//! unreadable, or malformed entry means "no overrides". Writes are not: a
//! store that cannot be read is never overwritten.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::content::OverrideMap;
use crate::error::Result;
use crate::kv::KeyValueStore;
use crate::section::Section;

/// Default storage key for the override mapping.
pub const DEFAULT_OVERRIDE_KEY: &str = "customContent";

/// Section-keyed override mapping over a [`KeyValueStore`].
#[derive(Clone)]
pub struct OverrideStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl OverrideStore {
    /// Create an override store using [`DEFAULT_OVERRIDE_KEY`].
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_OVERRIDE_KEY)
    }

    /// Create an override store using a custom storage key.
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The storage key holding the mapping.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current override mapping.
    ///
    /// Never fails: absent, unreadable, or malformed data yields an empty
    /// mapping, and entries for unknown sections are dropped.
    pub fn read_all(&self) -> OverrideMap {
        self.load().unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable overrides at '{}': {e}", self.key);
            OverrideMap::new()
        })
    }

    /// Like [`read_all`](Self::read_all), but a failing store read is an
    /// error. Read-modify-write paths go through here so an unreadable
    /// mapping is never overwritten.
    fn load(&self) -> Result<OverrideMap> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(OverrideMap::new());
        };

        let object = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(object)) => object,
            Ok(other) => {
                log::warn!(
                    "Ignoring overrides at '{}': expected an object, found {}",
                    self.key,
                    json_kind(&other)
                );
                return Ok(OverrideMap::new());
            }
            Err(e) => {
                log::warn!("Ignoring malformed overrides at '{}': {e}", self.key);
                return Ok(OverrideMap::new());
            }
        };

        Ok(object
            .into_iter()
            .filter_map(|(name, value)| match name.parse::<Section>() {
                Ok(section) => Some((section, value)),
                Err(_) => {
                    log::warn!("Dropping override for unknown section '{name}'");
                    None
                }
            })
            .collect())
    }

    /// Persist `value` as the override for `section`.
    pub fn write(&self, section: Section, value: &Value) -> Result<()> {
        let mut overrides = self.load()?;
        overrides.insert(section, value.clone());
        self.persist(&overrides)
    }

    /// Remove the override for `section`, if any.
    pub fn clear_section(&self, section: Section) -> Result<()> {
        let mut overrides = self.load()?;
        if overrides.remove(&section).is_none() {
            return Ok(());
        }
        if overrides.is_empty() {
            self.store.remove(&self.key)
        } else {
            self.persist(&overrides)
        }
    }

    /// Remove every override.
    pub fn clear_all(&self) -> Result<()> {
        self.store.remove(&self.key)
    }

    fn persist(&self, overrides: &OverrideMap) -> Result<()> {
        let object: Map<String, Value> = overrides
            .iter()
            .map(|(s, v)| (s.as_str().to_string(), v.clone()))
            .collect();
        let raw = serde_json::to_string(&Value::Object(object))?;
        self.store.set(&self.key, &raw)
    }
}

impl std::fmt::Debug for OverrideStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverrideStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
