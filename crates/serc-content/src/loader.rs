//! Baseline content loader.
//!
//! Fans out one retrieval per section and joins them with a fail-fast
//! barrier: the first failure aborts the load and no partial baseline is
//! ever returned.

use std::sync::Arc;

use futures::future::try_join_all;
use serde_json::Value;

use crate::content::BaselineContent;
use crate::error::{Error, Result};
use crate::schema;
use crate::section::Section;
use crate::source::ContentSource;

/// Loads baseline documents from a [`ContentSource`].
#[derive(Clone)]
pub struct ContentLoader {
    source: Arc<dyn ContentSource>,
    validate: bool,
}

impl ContentLoader {
    /// Create a loader with shape validation enabled.
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            validate: true,
        }
    }

    /// Enable or disable shape validation of loaded documents.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }

    /// Whether loaded and written documents are shape-checked.
    pub fn validates(&self) -> bool {
        self.validate
    }

    /// The underlying source.
    pub fn source(&self) -> &Arc<dyn ContentSource> {
        &self.source
    }

    /// Load every section concurrently.
    ///
    /// Succeeds only if every retrieval succeeds.
    pub async fn load_all(&self) -> Result<BaselineContent> {
        let fetches = Section::ALL.iter().map(|&section| async move {
            let value = self.load_one(section).await?;
            Ok::<_, Error>((section, value))
        });

        let documents = try_join_all(fetches).await?;
        log::debug!("Loaded {} baseline sections", documents.len());
        BaselineContent::from_documents(documents)
    }

    /// Load a single section.
    pub async fn load_one(&self, section: Section) -> Result<Value> {
        let value = self.source.fetch(section).await?;

        if self.validate {
            schema::validate(section, &value).map_err(|e| {
                Error::load(
                    section,
                    format!("{} is not valid: {e}", self.source.location(section)),
                )
            })?;
        }

        Ok(value)
    }
}

impl std::fmt::Debug for ContentLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentLoader")
            .field("root", &self.source.location(Section::NavLinks))
            .field("validate", &self.validate)
            .finish()
    }
}
