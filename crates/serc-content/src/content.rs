//! Baseline and effective content snapshots.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::section::Section;

/// Section → overridden value, as persisted by the override store.
pub type OverrideMap = BTreeMap<Section, Value>;

/// A complete set of baseline documents, one per known section.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineContent {
    sections: BTreeMap<Section, Value>,
}

impl BaselineContent {
    /// Build a baseline from documents, requiring every section to be present.
    pub fn from_documents(documents: impl IntoIterator<Item = (Section, Value)>) -> Result<Self> {
        let sections: BTreeMap<Section, Value> = documents.into_iter().collect();
        if let Some(missing) = Section::ALL.iter().find(|s| !sections.contains_key(s)) {
            return Err(Error::load(
                *missing,
                format!("No baseline document for {missing}"),
            ));
        }
        Ok(Self { sections })
    }

    /// The baseline value of a section.
    pub fn get(&self, section: Section) -> Option<&Value> {
        self.sections.get(&section)
    }

    /// Iterate over sections in order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &Value)> {
        self.sections.iter().map(|(s, v)| (*s, v))
    }
}

/// The resolved view: override if present, else baseline, for every section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EffectiveContent {
    sections: BTreeMap<Section, Value>,
}

impl EffectiveContent {
    /// Resolve the effective view.
    ///
    /// Overrides replace a section wholesale. Override entries for sections
    /// outside the baseline cannot exist, since both maps are keyed by
    /// [`Section`] and the baseline is complete.
    pub fn resolve(baseline: &BaselineContent, overrides: &OverrideMap) -> Self {
        let sections = baseline
            .iter()
            .map(|(section, base)| {
                let value = overrides.get(&section).unwrap_or(base);
                (section, value.clone())
            })
            .collect();
        Self { sections }
    }

    /// The effective value of a section.
    pub fn get(&self, section: Section) -> Option<&Value> {
        self.sections.get(&section)
    }

    /// Deserialize a section into its typed shape.
    ///
    /// See [`crate::schema`] for the shapes.
    pub fn typed<T: DeserializeOwned>(&self, section: Section) -> Result<T> {
        let value = self
            .get(section)
            .ok_or_else(|| Error::UnknownSection(section.to_string()))?;
        T::deserialize(value).map_err(|e| Error::schema(section, e.to_string()))
    }

    /// Iterate over sections in order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &Value)> {
        self.sections.iter().map(|(s, v)| (*s, v))
    }

    /// The whole snapshot as one JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.sections
                .iter()
                .map(|(s, v)| (s.as_str().to_string(), v.clone()))
                .collect(),
        )
    }

    pub(crate) fn replace(&mut self, section: Section, value: Value) {
        self.sections.insert(section, value);
    }
}
