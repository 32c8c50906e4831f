//! Common test utilities and harness for serc-content integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use serc_content::{
    ContentLoader, ContentService, FileStore, KeyValueStore, MemorySource, OverrideStore, Section,
};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Test harness for integration tests.
///
/// Holds an in-memory baseline source seeded with schema-valid documents for
/// every section, and a file-backed store in a temporary directory so that
/// overrides survive across service instances.
pub struct TestHarness {
    /// Baseline documents
    pub source: Arc<MemorySource>,
    /// Durable override storage
    pub store: Arc<FileStore>,
    _dir: TempDir,
}

impl TestHarness {
    /// Creates a harness with fixture baselines and empty storage.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(FileStore::new(dir.path().join("storage")));
        let source = Arc::new(MemorySource::with_documents(fixtures()));
        Self {
            source,
            store,
            _dir: dir,
        }
    }

    /// A fresh, uninitialized service over this harness's source and storage.
    pub fn service(&self) -> ContentService {
        ContentService::new(
            ContentLoader::new(self.source.clone()),
            OverrideStore::new(self.store.clone()),
        )
    }

    /// A fresh service that has been initialized.
    pub async fn ready_service(&self) -> ContentService {
        let mut service = self.service();
        service.initialize().await.unwrap();
        service
    }

    /// The raw override mapping currently in durable storage.
    pub fn stored_overrides(&self) -> Option<Value> {
        self.store
            .get(serc_content::overrides::DEFAULT_OVERRIDE_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    /// Section keys of the durable override mapping.
    pub fn stored_sections(&self) -> Vec<String> {
        match self.stored_overrides() {
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Baseline fixtures for every section.
pub fn fixtures() -> Vec<(Section, Value)> {
    Section::ALL.iter().map(|s| (*s, fixture(*s))).collect()
}

/// A schema-valid baseline document for `section`.
pub fn fixture(section: Section) -> Value {
    match section {
        Section::NavLinks => json!([
            { "name": "Home", "path": "/" },
            { "name": "Facilities", "path": "/facilities", "subLinks": [
                { "name": "Systems", "path": "/systems" }
            ]}
        ]),
        Section::HeroSlides => json!([
            { "image": "/img/hero1.jpg", "title": "SERC", "subtitle": "Supercomputing" }
        ]),
        Section::About => json!({
            "short": "Supercomputer Education and Research Centre",
            "directorMessage": "Welcome to SERC.",
            "overview": "A"
        }),
        Section::ResearchAreas => json!([
            { "name": "HPC", "description": "High performance computing", "icon": "Cpu" }
        ]),
        Section::NewsAndEvents => json!([{
            "id": "mpi-2024",
            "title": "MPI Workshop",
            "date": "2024-03-01",
            "type": "Workshop",
            "summary": "Hands-on MPI",
            "image": "/img/mpi.jpg",
            "registrationOpen": true
        }]),
        Section::Infrastructures => json!([
            { "name": "Data Centre", "image": "/img/dc.jpg", "description": "Tier III" }
        ]),
        Section::People => json!({
            "faculty": [{
                "name": "A. Professor",
                "title": "Chair",
                "image": "/img/a.jpg",
                "researchInterests": ["Compilers"],
                "email": "a@example.org"
            }],
            "scientificStaff": [],
            "technicalStaff": [],
            "administrativeStaff": []
        }),
        Section::Courses => json!([
            { "code": "DS 221", "title": "Data Structures", "instructor": "B", "description": "Intro" }
        ]),
        Section::Contact => json!({
            "address": "Bangalore 560012",
            "phone": "+91 80 0000 0000",
            "email": "office@example.org",
            "mapUrl": "https://maps.example.org/serc"
        }),
        Section::Systems => json!({
            "param-pravega": {
                "name": "Param Pravega",
                "image": "/img/pravega.jpg",
                "overview": "Petascale system",
                "specifications": [{ "label": "Peak", "value": "3.3 PF" }],
                "usagePolicy": "Research use"
            }
        }),
        Section::Software => json!([{
            "id": "compilers",
            "name": "Compilers",
            "items": [{ "name": "GCC", "version": "12.2", "description": "GNU compilers" }]
        }]),
        Section::Services => json!([
            { "id": "hpc", "name": "HPC", "description": "Compute allocations" }
        ]),
    }
}

/// A schema-valid value for `section` that differs from its fixture.
pub fn edited(section: Section, tag: &str) -> Value {
    match section {
        Section::About => json!({
            "short": tag,
            "directorMessage": tag,
            "overview": tag
        }),
        Section::Contact => json!({
            "address": tag,
            "phone": tag,
            "email": tag,
            "mapUrl": tag
        }),
        Section::People => json!({
            "faculty": [],
            "scientificStaff": [],
            "technicalStaff": [],
            "administrativeStaff": [{ "name": tag, "title": tag, "image": tag, "email": tag }]
        }),
        Section::Systems => json!({}),
        Section::Services => json!([{ "id": tag, "name": tag, "description": tag }]),
        // Every other section is a list; an empty list is valid for all of them.
        _ => json!([]),
    }
}

/// Write every fixture as `<dir>/<section>.json`.
pub fn write_fixtures(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    for (section, value) in fixtures() {
        let text = serde_json::to_string_pretty(&value).unwrap();
        std::fs::write(dir.join(section.file_name()), text).unwrap();
    }
}
