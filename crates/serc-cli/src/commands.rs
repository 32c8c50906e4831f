//! Command implementations.
//!
//! Each command builds what it needs from a [`Context`], runs against the
//! content service, and prints to stdout. Commands that change content or
//! images require an authorized admin session.

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use serc_content::export;
use serc_content::source;
use serc_content::{
    AdminGate, ConfirmationToken, ContentLoader, ContentService, ContentSource, FileStore,
    ImageLibrary, MemoryStore, OverrideStore, Section,
};
use serde_json::Value;

use crate::cli::{Command, ImageAction};
use crate::config::SiteConfig;
use crate::error::{Error, Result};

/// Everything a command needs: configuration, storage, and the admin gate.
pub struct Context {
    config: SiteConfig,
    store: Arc<FileStore>,
    admin: AdminGate,
}

impl Context {
    /// Build a context. A password, when given, is presented to the admin
    /// gate straight away.
    pub fn new(config: SiteConfig, password: Option<&str>) -> Result<Self> {
        let store = Arc::new(FileStore::new(config.storage_dir()));
        // Each invocation is its own session.
        let admin = AdminGate::with_passphrase(
            Arc::new(MemoryStore::new()),
            config.admin.passphrase.clone(),
        );
        if let Some(password) = password {
            admin.login(password)?;
        }
        Ok(Self {
            config,
            store,
            admin,
        })
    }

    /// The loaded configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// An uninitialized content service for the configured root and storage.
    pub fn service(&self) -> Result<ContentService> {
        let source = source::from_root(&self.config.content_root())?;
        let loader = ContentLoader::new(source).with_validation(self.config.content.validate_schema);
        let overrides =
            OverrideStore::with_key(self.store.clone(), self.config.storage.override_key.clone());
        Ok(ContentService::new(loader, overrides))
    }

    /// A content service that has loaded successfully.
    pub async fn ready_service(&self) -> Result<ContentService> {
        let mut service = self.service()?;
        service.initialize().await?;
        Ok(service)
    }

    /// The image library in configured storage.
    pub fn images(&self) -> ImageLibrary {
        ImageLibrary::with_key(self.store.clone(), self.config.storage.image_key.clone())
    }

    fn require_admin(&self) -> Result<()> {
        self.admin.require().map_err(Error::from)
    }
}

/// Run a content or image command. Config commands are handled separately.
pub async fn run(ctx: &Context, command: Command, input: &mut dyn BufRead) -> Result<()> {
    match command {
        Command::Status => cmd_status(ctx).await,
        Command::Sections => cmd_sections(ctx).await,
        Command::Show { section } => cmd_show(ctx, section).await,
        Command::Baseline { section } => cmd_baseline(ctx, section).await,
        Command::Edit { section, file } => cmd_edit(ctx, section, &file).await,
        Command::Revert { section, yes } => cmd_revert(ctx, section, yes, input).await,
        Command::Reset { yes } => cmd_reset(ctx, yes, input).await,
        Command::Export { section, out } => cmd_export(ctx, section, &out).await,
        Command::Images { action } => cmd_images(ctx, action, input),
        Command::Config { .. } => Err(Error::config(
            "config commands are dispatched before content is loaded",
        )),
    }
}

// ============================================================================
// Read commands
// ============================================================================

/// Load content and report the outcome.
pub async fn cmd_status(ctx: &Context) -> Result<()> {
    let mut service = ctx.service()?;
    let result = service.initialize().await;
    println!("State: {}", service.state());
    result?;

    let modified = service.modified_sections();
    if modified.is_empty() {
        println!("No local changes");
    } else {
        let names: Vec<&str> = modified.iter().map(|s| s.as_str()).collect();
        println!("Modified: {}", names.join(", "));
    }
    Ok(())
}

/// List sections, their baseline locations, and which are edited.
pub async fn cmd_sections(ctx: &Context) -> Result<()> {
    let service = ctx.ready_service().await?;
    let source = service.loader().source();
    for section in Section::ALL {
        let marker = if service.is_modified(section) { "*" } else { " " };
        println!(
            "{marker} {:<16} {:<16} {}",
            section.as_str(),
            section.label(),
            source.location(section)
        );
    }
    Ok(())
}

/// Print one section, or all effective content.
pub async fn cmd_show(ctx: &Context, section: Option<Section>) -> Result<()> {
    let service = ctx.ready_service().await?;
    let value = match section {
        Some(section) => service.section(section)?.clone(),
        None => service.get()?.to_json(),
    };
    println!("{}", export::to_pretty_json(&value)?);
    Ok(())
}

/// Print a section's baseline.
pub async fn cmd_baseline(ctx: &Context, section: Section) -> Result<()> {
    let service = ctx.service()?;
    let value = service.get_baseline(section).await?;
    println!("{}", export::to_pretty_json(&value)?);
    Ok(())
}

// ============================================================================
// Write commands
// ============================================================================

/// Replace a section with the contents of a JSON file.
pub async fn cmd_edit(ctx: &Context, section: Section, file: &Path) -> Result<()> {
    ctx.require_admin()?;
    let value = read_json(file)?;

    let mut service = ctx.ready_service().await?;
    service.update_section(section, value)?;
    println!("Updated {section}");
    Ok(())
}

/// Revert one section after confirmation.
pub async fn cmd_revert(
    ctx: &Context,
    section: Section,
    yes: bool,
    input: &mut dyn BufRead,
) -> Result<()> {
    ctx.require_admin()?;
    let mut service = ctx.ready_service().await?;
    let token = service.request_revert(section)?;
    confirm_and_apply(&mut service, token, yes, input).await
}

/// Discard every local change after confirmation.
pub async fn cmd_reset(ctx: &Context, yes: bool, input: &mut dyn BufRead) -> Result<()> {
    ctx.require_admin()?;
    let mut service = ctx.ready_service().await?;
    let token = service.request_reset()?;
    confirm_and_apply(&mut service, token, yes, input).await
}

async fn confirm_and_apply(
    service: &mut ContentService,
    token: ConfirmationToken,
    yes: bool,
    input: &mut dyn BufRead,
) -> Result<()> {
    if !(yes || ask(token.prompt(), input)?) {
        service.cancel(&token);
        println!("Cancelled");
        return Ok(());
    }
    let action = service.confirm(&token).await?;
    log::debug!("Applied {action:?}");
    println!("Done");
    Ok(())
}

/// Export effective documents for publishing.
pub async fn cmd_export(ctx: &Context, section: Option<Section>, out: &Path) -> Result<()> {
    let service = ctx.ready_service().await?;
    let paths = match section {
        Some(section) => vec![export::export_section(service.get()?, section, out)?],
        None => export::export_modified(&service, out)?,
    };

    if paths.is_empty() {
        println!("No local changes to export");
    }
    for path in paths {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

// ============================================================================
// Images
// ============================================================================

/// Image library commands.
pub fn cmd_images(ctx: &Context, action: ImageAction, input: &mut dyn BufRead) -> Result<()> {
    let mut library = ctx.images();
    match action {
        ImageAction::List => {
            for image in library.list() {
                println!("{}\t{}", image.id, image.name);
            }
            Ok(())
        }
        ImageAction::Add { path } => {
            ctx.require_admin()?;
            let image = library.add_file(&path)?;
            println!("Added {}", image.id);
            Ok(())
        }
        ImageAction::Remove { id, yes } => {
            ctx.require_admin()?;
            let token = library.request_remove(&id)?;
            if !(yes || ask(token.prompt(), input)?) {
                library.cancel(&token);
                println!("Cancelled");
                return Ok(());
            }
            let removed = library.confirm_remove(&token)?;
            println!("Removed {}", removed.id);
            Ok(())
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Put a yes/no question on stderr and read the answer from `input`.
///
/// Only `y` and `yes` (any case) count as agreement.
pub fn ask(prompt: &str, input: &mut dyn BufRead) -> Result<bool> {
    eprint!("{prompt} [y/N] ");
    std::io::stderr()
        .flush()
        .map_err(|e| Error::io_with_path(e, "<stderr>"))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| Error::io_with_path(e, "<stdin>"))?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    serde_json::from_str(&text).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}
