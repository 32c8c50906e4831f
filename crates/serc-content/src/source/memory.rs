//! In-memory baseline source.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use super::ContentSource;
use crate::error::{Error, Result};
use crate::section::Section;

/// Serves baseline documents held in memory.
///
/// Documents can be replaced and sections marked unreachable at runtime,
/// which makes this the source of choice for exercising load failures.
#[derive(Debug, Default)]
pub struct MemorySource {
    documents: RwLock<BTreeMap<Section, Value>>,
    unreachable: RwLock<BTreeSet<Section>>,
    fetches: AtomicUsize,
}

impl MemorySource {
    /// Create an empty source. Every fetch fails until documents are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source holding the given documents.
    pub fn with_documents(documents: impl IntoIterator<Item = (Section, Value)>) -> Self {
        let source = Self::new();
        for (section, value) in documents {
            source.insert(section, value);
        }
        source
    }

    /// Set or replace a section's document.
    pub fn insert(&self, section: Section, value: Value) {
        if let Ok(mut docs) = self.documents.write() {
            docs.insert(section, value);
        }
    }

    /// Make fetches of `section` fail (or succeed again).
    pub fn set_unreachable(&self, section: Section, unreachable: bool) {
        if let Ok(mut set) = self.unreachable.write() {
            if unreachable {
                set.insert(section);
            } else {
                set.remove(&section);
            }
        }
    }

    /// Number of fetches served or refused so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    fn location(&self, section: Section) -> String {
        format!("memory://{}", section.file_name())
    }

    async fn fetch(&self, section: Section) -> Result<Value> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let location = self.location(section);

        let unreachable = self
            .unreachable
            .read()
            .map(|set| set.contains(&section))
            .unwrap_or(false);
        if unreachable {
            return Err(Error::load(
                section,
                format!("Failed to fetch {location}: Not Found"),
            ));
        }

        self.documents
            .read()
            .ok()
            .and_then(|docs| docs.get(&section).cloned())
            .ok_or_else(|| Error::load(section, format!("Failed to fetch {location}: Not Found")))
    }
}
