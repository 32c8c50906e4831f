//! Overrides persist across service instances and reinitialization.

use serc_content::overrides::DEFAULT_OVERRIDE_KEY;
use serc_content::{KeyValueStore, Section};
use serde_json::json;

use crate::common::{TestHarness, edited, fixture};

#[tokio::test]
async fn test_update_survives_reinitialize() {
    let harness = TestHarness::new();
    let mut service = harness.ready_service().await;

    let value = json!({ "short": "S", "directorMessage": "D", "overview": "B" });
    service.update_section(Section::About, value.clone()).unwrap();
    assert_eq!(service.section(Section::About).unwrap()["overview"], "B");

    service.initialize().await.unwrap();
    assert_eq!(service.section(Section::About).unwrap()["overview"], "B");
    assert!(service.is_modified(Section::About));
}

#[tokio::test]
async fn test_update_survives_new_service() {
    let harness = TestHarness::new();
    {
        let mut service = harness.ready_service().await;
        service
            .update_section(Section::Services, edited(Section::Services, "grid"))
            .unwrap();
    }

    let service = harness.ready_service().await;
    assert_eq!(
        service.section(Section::Services).unwrap(),
        &edited(Section::Services, "grid")
    );
    assert_eq!(
        service.modified_sections().iter().copied().collect::<Vec<_>>(),
        vec![Section::Services]
    );
}

#[tokio::test]
async fn test_storage_layout_is_section_keyed_object() {
    let harness = TestHarness::new();
    let mut service = harness.ready_service().await;
    service
        .update_section(Section::Contact, edited(Section::Contact, "c"))
        .unwrap();
    service
        .update_section(Section::Courses, json!([]))
        .unwrap();

    let stored = harness.stored_overrides().unwrap();
    assert_eq!(
        stored,
        json!({
            "contact": edited(Section::Contact, "c"),
            "courses": []
        })
    );
}

#[tokio::test]
async fn test_malformed_storage_means_no_overrides() {
    let harness = TestHarness::new();
    harness.store.set(DEFAULT_OVERRIDE_KEY, "{not json").unwrap();

    let mut service = harness.ready_service().await;
    assert!(service.modified_sections().is_empty());
    assert_eq!(service.section(Section::About).unwrap(), &fixture(Section::About));

    // The next write replaces the unreadable entry.
    service
        .update_section(Section::About, edited(Section::About, "fresh"))
        .unwrap();
    assert_eq!(harness.stored_sections(), vec!["about".to_string()]);
}

#[tokio::test]
async fn test_unknown_stored_sections_are_ignored() {
    let harness = TestHarness::new();
    harness
        .store
        .set(
            DEFAULT_OVERRIDE_KEY,
            r#"{"blog": [1], "courses": []}"#,
        )
        .unwrap();

    let service = harness.ready_service().await;
    assert_eq!(
        service.modified_sections().iter().copied().collect::<Vec<_>>(),
        vec![Section::Courses]
    );
    assert_eq!(service.section(Section::Courses).unwrap(), &json!([]));
}
