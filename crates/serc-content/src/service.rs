//! The content service: the single source of truth for site content.
//!
//! Combines a [`ContentLoader`] and an [`OverrideStore`], owns the live
//! [`EffectiveContent`] snapshot and the set of modified sections, and
//! exposes the read/write/revert/reset surface that pages and the admin
//! panel use.
//!
//! Effective content is always a pure function of the baseline and the
//! durable overrides. Revert and reset therefore clear storage and reload
//! everything rather than patching the snapshot in place.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::confirm::{ConfirmationGate, ConfirmationToken};
use crate::content::EffectiveContent;
use crate::error::{Error, Result};
use crate::loader::ContentLoader;
use crate::overrides::OverrideStore;
use crate::schema;
use crate::section::Section;
use crate::status::{ContentState, StatusHandle};

/// A destructive action awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentAction {
    /// Drop the override for one section.
    Revert(Section),
    /// Drop every override.
    ResetAll,
}

/// Façade over baseline loading and local overrides.
pub struct ContentService {
    loader: ContentLoader,
    overrides: OverrideStore,
    status: StatusHandle,
    snapshot: Option<EffectiveContent>,
    modified: BTreeSet<Section>,
    confirmations: ConfirmationGate<ContentAction>,
}

impl ContentService {
    /// Create an uninitialized service.
    pub fn new(loader: ContentLoader, overrides: OverrideStore) -> Self {
        Self {
            loader,
            overrides,
            status: StatusHandle::new("site-content"),
            snapshot: None,
            modified: BTreeSet::new(),
            confirmations: ConfirmationGate::new(),
        }
    }

    /// A handle for observing state without holding the service.
    pub fn status(&self) -> StatusHandle {
        self.status.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ContentState {
        self.status.state()
    }

    /// The loader in use.
    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    /// The override store in use.
    pub fn overrides(&self) -> &OverrideStore {
        &self.overrides
    }

    /// Load baselines, apply overrides, and become ready.
    ///
    /// Also used to rebuild state after revert and reset. Pending
    /// confirmations are dropped, since they were asked against the old
    /// state. On failure the
    /// service is left in [`ContentState::Failed`] with no content and no
    /// modified sections; a failed service cannot be initialized again.
    pub async fn initialize(&mut self) -> Result<()> {
        let state = self.status.state();
        if state.is_terminal() {
            return Err(Error::invalid_state("initialize", state));
        }

        self.snapshot = None;
        self.modified.clear();
        self.confirmations.clear();
        self.status.set_state(ContentState::Loading);

        match self.loader.load_all().await {
            Ok(baseline) => {
                let overrides = self.overrides.read_all();
                self.modified = overrides.keys().copied().collect();
                self.snapshot = Some(EffectiveContent::resolve(&baseline, &overrides));
                log::debug!("{} section(s) overridden locally", self.modified.len());
                self.status.set_state(ContentState::Ready);
                Ok(())
            }
            Err(e) => {
                self.status.set_state(ContentState::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// The effective content snapshot. Only available when ready.
    pub fn get(&self) -> Result<&EffectiveContent> {
        self.snapshot
            .as_ref()
            .ok_or_else(|| Error::invalid_state("read content", self.status.state()))
    }

    /// The effective value of one section.
    pub fn section(&self, section: Section) -> Result<&Value> {
        self.get()?
            .get(section)
            .ok_or_else(|| Error::UnknownSection(section.to_string()))
    }

    /// Sections currently overridden.
    pub fn modified_sections(&self) -> &BTreeSet<Section> {
        &self.modified
    }

    /// Whether a section is currently overridden.
    pub fn is_modified(&self, section: Section) -> bool {
        self.modified.contains(&section)
    }

    /// Replace a section wholesale and persist the override.
    ///
    /// When the loader validates shapes, a non-conforming value is rejected
    /// before anything changes. The override is persisted before the
    /// snapshot is updated, so a storage failure leaves both untouched.
    pub fn update_section(&mut self, section: Section, value: Value) -> Result<()> {
        let state = self.status.state();
        let Some(snapshot) = self.snapshot.as_mut() else {
            return Err(Error::invalid_state("update a section", state));
        };

        if self.loader.validates() {
            schema::validate(section, &value)?;
        }

        if let Err(e) = self.overrides.write(section, &value) {
            log::error!("Failed to persist override for {section}: {e}");
            return Err(e);
        }

        snapshot.replace(section, value);
        if self.modified.insert(section) {
            log::info!("Section {section} marked modified");
        }
        Ok(())
    }

    /// Fetch the section's baseline without touching any state.
    pub async fn get_baseline(&self, section: Section) -> Result<Value> {
        self.loader.load_one(section).await
    }

    /// Ask to revert one section to its baseline.
    ///
    /// Nothing happens until the returned token is passed to [`confirm`].
    ///
    /// [`confirm`]: ContentService::confirm
    pub fn request_revert(&mut self, section: Section) -> Result<ConfirmationToken> {
        self.require_ready("revert a section")?;
        Ok(self.confirmations.request(
            ContentAction::Revert(section),
            format!("Are you sure you want to revert changes for {section}?"),
        ))
    }

    /// Ask to discard every local change.
    ///
    /// Nothing happens until the returned token is passed to [`confirm`].
    ///
    /// [`confirm`]: ContentService::confirm
    pub fn request_reset(&mut self) -> Result<ConfirmationToken> {
        self.require_ready("reset content")?;
        Ok(self.confirmations.request(
            ContentAction::ResetAll,
            "Are you sure you want to discard all local changes? \
             This will reload and revert to the original content.",
        ))
    }

    /// Carry out a confirmed revert or reset, then reinitialize.
    pub async fn confirm(&mut self, token: &ConfirmationToken) -> Result<ContentAction> {
        self.require_ready("confirm a change")?;
        let action = self.confirmations.confirm(token)?;

        match action {
            ContentAction::Revert(section) => {
                log::info!("Reverting {section} to baseline");
                self.overrides.clear_section(section)?;
            }
            ContentAction::ResetAll => {
                log::info!("Discarding all local changes");
                self.overrides.clear_all()?;
            }
        }

        self.initialize().await?;
        Ok(action)
    }

    /// Withdraw a pending request. Returns `false` if it was not pending.
    pub fn cancel(&mut self, token: &ConfirmationToken) -> bool {
        self.confirmations.cancel(token)
    }

    fn require_ready(&self, operation: &'static str) -> Result<()> {
        let state = self.status.state();
        if state.is_ready() {
            Ok(())
        } else {
            Err(Error::invalid_state(operation, state))
        }
    }
}

impl std::fmt::Debug for ContentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentService")
            .field("state", &self.status.state())
            .field("modified", &self.modified)
            .field("pending_confirmations", &self.confirmations.pending())
            .finish()
    }
}
