//! Directory-backed baseline source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use super::{ContentSource, parse_body};
use crate::error::{Error, Result};
use crate::section::Section;

/// Reads `<root>/<section>.json` from the local filesystem.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The content root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, section: Section) -> PathBuf {
        self.root.join(section.file_name())
    }
}

#[async_trait]
impl ContentSource for FsSource {
    fn location(&self, section: Section) -> String {
        self.path_for(section).display().to_string()
    }

    async fn fetch(&self, section: Section) -> Result<Value> {
        let path = self.path_for(section);
        let location = path.display().to_string();
        log::debug!("Reading baseline {section} from {location}");

        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::load(section, format!("Failed to fetch {location}: {e}")))?;

        parse_body(section, &location, &body)
    }
}
