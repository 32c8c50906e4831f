//! Publishing edited sections as data files.
//!
//! Local overrides only affect this client. To publish, the effective
//! document of each edited section is written out as `<section>.json` and
//! copied over the baseline file in the site's data directory.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::content::EffectiveContent;
use crate::error::{Error, Result};
use crate::section::Section;
use crate::service::ContentService;

/// Render a document the way data files are laid out: four-space indent.
pub fn to_pretty_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| Error::config(format!("non-UTF-8 JSON output: {e}")))
}

/// Write one section's effective document to `<dir>/<section>.json`.
pub fn export_section(content: &EffectiveContent, section: Section, dir: &Path) -> Result<PathBuf> {
    let value = content
        .get(section)
        .ok_or_else(|| Error::UnknownSection(section.to_string()))?;

    std::fs::create_dir_all(dir).map_err(|e| Error::io_with_path(e, dir))?;
    let path = dir.join(section.file_name());
    std::fs::write(&path, to_pretty_json(value)?).map_err(|e| Error::io_with_path(e, &path))?;

    log::info!("Exported {section} to {}", path.display());
    Ok(path)
}

/// Write every listed section. Returns the written paths in order.
pub fn export_sections<'a>(
    content: &EffectiveContent,
    sections: impl IntoIterator<Item = &'a Section>,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    sections
        .into_iter()
        .map(|section| export_section(content, *section, dir))
        .collect()
}

/// Write every section the service holds as modified.
pub fn export_modified(service: &ContentService, dir: &Path) -> Result<Vec<PathBuf>> {
    export_sections(service.get()?, service.modified_sections(), dir)
}
