//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serc_content::Section;

/// SERC CLI - Site content administration
#[derive(Parser, Debug)]
#[command(name = "serc")]
#[command(author, version, about = "SERC site content administration tool", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Admin password for commands that change content
    #[arg(long, env = "SERC_ADMIN_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load content and report its state
    Status,

    /// List sections with their source and whether they are edited
    Sections,

    /// Print effective content (one section, or everything)
    Show {
        /// Section name, e.g. `about` or `newsAndEvents`
        section: Option<Section>,
    },

    /// Print a section's baseline, ignoring local edits
    Baseline {
        /// Section name
        section: Section,
    },

    /// Replace a section with the JSON document in FILE
    Edit {
        /// Section name
        section: Section,
        /// JSON file holding the new value
        file: PathBuf,
    },

    /// Discard local edits for one section
    Revert {
        /// Section name
        section: Section,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Discard all local edits
    Reset {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Write effective documents as `<section>.json` files for publishing
    Export {
        /// Only this section (default: every edited section)
        #[arg(short, long)]
        section: Option<Section>,
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Manage the image library
    Images {
        /// Image action
        #[command(subcommand)]
        action: ImageAction,
    },

    /// Configuration operations
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Image library subcommands.
#[derive(Subcommand, Debug)]
pub enum ImageAction {
    /// List images, newest first
    List,
    /// Add an image file
    Add {
        /// Image file
        path: PathBuf,
    },
    /// Delete an image
    Remove {
        /// Image id
        id: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Get a value by dotted key, e.g. `content.root`
    Get {
        /// Dotted key
        key: String,
    },
    /// Set a value by dotted key
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },
    /// Write a default config file
    Init {
        /// Target file (default: the platform config path)
        #[arg(short, long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration as environment variables
    Export {
        /// Format as `--env KEY=VALUE` for docker
        #[arg(long)]
        docker_env: bool,
    },
}
