//! Baseline content sources.
//!
//! A [`ContentSource`] maps each [`Section`] to a location under a content
//! root and retrieves the JSON document stored there. Three implementations
//! are provided:
//!
//! - [`FsSource`]: a local directory (`<root>/<name>.json`)
//! - [`HttpSource`]: a base URL (`<base>/<name>.json`)
//! - [`MemorySource`]: in-process documents, for tests and embedding
//!
//! Sources only retrieve and parse; shape validation is the loader's job.

mod fs;
mod http;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::section::Section;

pub use fs::FsSource;
pub use http::HttpSource;
pub use memory::MemorySource;

/// Retrieves baseline documents by section.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Where the section's baseline lives, for messages and listings.
    fn location(&self, section: Section) -> String;

    /// Retrieve and parse the section's baseline document.
    ///
    /// Any failure is reported as [`Error::Load`] naming the location.
    async fn fetch(&self, section: Section) -> Result<Value>;
}

/// Build a source from a content root string.
///
/// `http://` and `https://` roots produce an [`HttpSource`]; anything else is
/// treated as a directory path.
pub fn from_root(root: &str) -> Result<Arc<dyn ContentSource>> {
    if root.starts_with("http://") || root.starts_with("https://") {
        Ok(Arc::new(HttpSource::new(root)?))
    } else {
        Ok(Arc::new(FsSource::new(root)))
    }
}

/// Parse a fetched body, reporting malformed JSON as a load failure.
pub(crate) fn parse_body(section: Section, location: &str, body: &str) -> Result<Value> {
    serde_json::from_str(body)
        .map_err(|e| Error::load(section, format!("Malformed JSON in {location}: {e}")))
}
