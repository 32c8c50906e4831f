//! # serc-cli
//!
//! Admin command-line tool for SERC site content.
//!
//! - Inspecting effective and baseline content
//! - Editing, reverting, and resetting sections
//! - Exporting edited sections for publishing
//! - Managing the image library
//! - Configuration file management

#![warn(clippy::all)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;

pub use config::{ConfigManager, SiteConfig};
pub use error::{Error, Result};
