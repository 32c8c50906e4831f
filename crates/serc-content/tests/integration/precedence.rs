//! Override precedence and baseline fallback.

use serc_content::{Error, Section};
use serde_json::json;

use crate::common::{TestHarness, edited, fixture};

#[tokio::test]
async fn test_overridden_sections_read_override() {
    let harness = TestHarness::new();
    let mut service = harness.ready_service().await;

    for section in [Section::About, Section::Services, Section::People] {
        service
            .update_section(section, edited(section, "local"))
            .unwrap();
    }

    for section in [Section::About, Section::Services, Section::People] {
        assert_eq!(service.section(section).unwrap(), &edited(section, "local"));
    }
}

#[tokio::test]
async fn test_untouched_sections_read_baseline() {
    let harness = TestHarness::new();
    let mut service = harness.ready_service().await;
    service
        .update_section(Section::Contact, edited(Section::Contact, "x"))
        .unwrap();

    for section in Section::ALL {
        if section != Section::Contact {
            assert_eq!(service.section(section).unwrap(), &fixture(section));
        }
    }
}

#[tokio::test]
async fn test_override_wins_over_changed_baseline() {
    let harness = TestHarness::new();
    let mut service = harness.ready_service().await;
    service
        .update_section(Section::About, edited(Section::About, "mine"))
        .unwrap();

    // The published baseline moves on; the local override still wins.
    harness.source.insert(
        Section::About,
        json!({ "short": "new", "directorMessage": "new", "overview": "new" }),
    );
    service.initialize().await.unwrap();

    assert_eq!(
        service.section(Section::About).unwrap(),
        &edited(Section::About, "mine")
    );
}

#[tokio::test]
async fn test_update_replaces_wholesale() {
    let harness = TestHarness::new();
    let mut service = harness.ready_service().await;

    let value = json!({
        "short": "S",
        "directorMessage": "D",
        "overview": "B",
        "extra": [1, 2, 3]
    });
    service.update_section(Section::About, value.clone()).unwrap();
    assert_eq!(service.section(Section::About).unwrap(), &value);

    let about: serc_content::schema::AboutContent =
        service.get().unwrap().typed(Section::About).unwrap();
    assert_eq!(about.overview, "B");
}

#[tokio::test]
async fn test_invalid_update_rejected_without_side_effects() {
    let harness = TestHarness::new();
    let mut service = harness.ready_service().await;

    let err = service
        .update_section(Section::About, json!({ "overview": "B" }))
        .unwrap_err();
    assert!(matches!(err, Error::Schema { section: Section::About, .. }));

    assert_eq!(service.section(Section::About).unwrap(), &fixture(Section::About));
    assert!(!service.is_modified(Section::About));
    assert!(harness.stored_overrides().is_none());
}
