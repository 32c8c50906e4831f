//! SERC Content: baseline loading, local overrides, and admin primitives.
//!
//! Every page of the site reads its text from one of twelve sections. Each
//! section has a baseline document served alongside the site; an editor can
//! replace any section locally, and the replacement survives restarts until
//! it is reverted.
//!
//! # Modules
//!
//! - [`section`]: The fixed set of content sections
//! - [`source`]: Where baseline documents come from (files, HTTP, memory)
//! - [`loader`]: Concurrent, all-or-nothing baseline loading
//! - [`kv`]: Durable string key-value stores
//! - [`overrides`]: The persisted map of locally edited sections
//! - [`content`]: Baseline and effective content snapshots
//! - [`service`]: The content service pages and the admin panel talk to
//! - [`status`]: Observable lifecycle state
//! - [`confirm`]: Two-step confirmation for destructive actions
//! - [`schema`]: Typed section shapes and validation
//! - [`export`]: Writing edited sections out as data files
//! - [`images`]: The admin image library
//! - [`admin`]: Session-scoped admin gate
//! - [`error`]: Error types and Result alias

pub mod admin;
pub mod confirm;
pub mod content;
pub mod error;
pub mod export;
pub mod images;
pub mod kv;
pub mod loader;
pub mod overrides;
pub mod schema;
pub mod section;
pub mod service;
pub mod source;
pub mod status;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};

pub use admin::AdminGate;
pub use confirm::ConfirmationToken;
pub use content::{BaselineContent, EffectiveContent, OverrideMap};
pub use images::{ImageLibrary, ManagedImage};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use loader::ContentLoader;
pub use overrides::OverrideStore;
pub use section::Section;
pub use service::{ContentAction, ContentService};
pub use source::{ContentSource, FsSource, HttpSource, MemorySource};
pub use status::{ContentState, StatusHandle};
