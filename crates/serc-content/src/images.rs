//! Locally stored image library for the admin panel.
//!
//! Uploaded images are kept as `data:` URLs so they can be pasted straight
//! into section documents. The library lives under its own storage key,
//! independent of content overrides.

use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::confirm::{ConfirmationGate, ConfirmationToken};
use crate::error::{Error, Result};
use crate::kv::KeyValueStore;

/// Default storage key for the image library.
pub const DEFAULT_IMAGE_KEY: &str = "serc-image-library";

/// An image in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedImage {
    /// `<file name>-<unix millis>`
    pub id: String,
    /// Original file name
    pub name: String,
    /// `data:<mime>;base64,<payload>`
    pub src: String,
}

/// Image list persisted in a [`KeyValueStore`], newest first.
pub struct ImageLibrary {
    store: Arc<dyn KeyValueStore>,
    key: String,
    confirmations: ConfirmationGate<String>,
}

impl ImageLibrary {
    /// Create a library using [`DEFAULT_IMAGE_KEY`].
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_IMAGE_KEY)
    }

    /// Create a library under a custom storage key.
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            confirmations: ConfirmationGate::new(),
        }
    }

    /// All images, newest first. Malformed storage reads as empty.
    pub fn list(&self) -> Vec<ManagedImage> {
        match self.store.get(&self.key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::error!("Failed to parse image library at '{}': {e}", self.key);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::error!("Failed to read image library at '{}': {e}", self.key);
                Vec::new()
            }
        }
    }

    /// Look up an image by id.
    pub fn get(&self, id: &str) -> Option<ManagedImage> {
        self.list().into_iter().find(|img| img.id == id)
    }

    /// Add an image from raw bytes. The MIME type follows the file extension.
    pub fn add(&self, name: &str, bytes: &[u8]) -> Result<ManagedImage> {
        let image = ManagedImage {
            id: format!("{name}-{}", chrono::Utc::now().timestamp_millis()),
            name: name.to_string(),
            src: data_url(mime_for(name), bytes),
        };

        let mut images = self.list();
        images.insert(0, image.clone());
        self.save(&images)?;

        log::info!("Added image '{}' ({} bytes)", image.name, bytes.len());
        Ok(image)
    }

    /// Add an image file from disk.
    pub fn add_file(&self, path: &Path) -> Result<ManagedImage> {
        let bytes = std::fs::read(path).map_err(|e| Error::io_with_path(e, path))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::config(format!("{} has no file name", path.display())))?;
        self.add(&name, &bytes)
    }

    /// Ask to delete an image. Nothing happens until confirmed.
    pub fn request_remove(&mut self, id: &str) -> Result<ConfirmationToken> {
        let image = self
            .get(id)
            .ok_or_else(|| Error::ImageNotFound(id.to_string()))?;
        Ok(self.confirmations.request(
            image.id,
            format!("Are you sure you want to delete {}?", image.name),
        ))
    }

    /// Delete the image named by a confirmed token.
    pub fn confirm_remove(&mut self, token: &ConfirmationToken) -> Result<ManagedImage> {
        let id = self.confirmations.confirm(token)?;
        let mut images = self.list();
        let position = images
            .iter()
            .position(|img| img.id == id)
            .ok_or_else(|| Error::ImageNotFound(id.clone()))?;
        let removed = images.remove(position);
        self.save(&images)?;

        log::info!("Removed image '{}'", removed.name);
        Ok(removed)
    }

    /// Withdraw a pending delete.
    pub fn cancel(&mut self, token: &ConfirmationToken) -> bool {
        self.confirmations.cancel(token)
    }

    fn save(&self, images: &[ManagedImage]) -> Result<()> {
        let raw = serde_json::to_string(images)?;
        self.store.set(&self.key, &raw)
    }
}

fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

fn mime_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
