//! Initialization, fail-fast loading, and state observation.

use std::sync::Arc;
use std::time::Duration;

use serc_content::overrides::DEFAULT_OVERRIDE_KEY;
use serc_content::{
    ContentLoader, ContentService, ContentState, Error, KeyValueStore, MemorySource,
    OverrideStore, Section,
};
use serde_json::json;

use crate::common::{TestHarness, fixture, fixtures};

#[tokio::test]
async fn test_initialize_fetches_every_section_once() {
    let harness = TestHarness::new();
    let service = harness.ready_service().await;

    assert!(service.state().is_ready());
    assert_eq!(harness.source.fetch_count(), Section::ALL.len());
    assert_eq!(service.get().unwrap().iter().count(), Section::ALL.len());
}

#[tokio::test]
async fn test_one_unreachable_section_fails_everything() {
    let harness = TestHarness::new();
    harness.source.set_unreachable(Section::Software, true);

    let mut service = harness.service();
    let err = service.initialize().await.unwrap_err();

    assert!(err.is_load_failure());
    assert!(err.to_string().contains("software.json"));
    assert!(matches!(service.state(), ContentState::Failed(_)));
    assert!(matches!(service.get(), Err(Error::InvalidState { .. })));
    assert!(service.section(Section::About).is_err());
    assert!(service.modified_sections().is_empty());
}

#[tokio::test]
async fn test_override_does_not_rescue_missing_baseline() {
    let harness = TestHarness::new();
    harness
        .store
        .set(DEFAULT_OVERRIDE_KEY, r#"{"about": {"overview": "B"}}"#)
        .unwrap();
    harness.source.set_unreachable(Section::About, true);

    let mut service = harness.service();
    assert!(service.initialize().await.is_err());
    assert!(service.state().is_terminal());
    assert!(service.get().is_err());
}

#[tokio::test]
async fn test_invalid_baseline_is_load_failure() {
    let harness = TestHarness::new();
    harness.source.insert(Section::Contact, json!({ "phone": 42 }));

    let mut service = harness.service();
    let err = service.initialize().await.unwrap_err();
    assert!(err.is_load_failure());
    assert!(err.to_string().contains("not valid"));
}

#[tokio::test]
async fn test_unvalidated_loader_accepts_any_json() {
    let source = Arc::new(MemorySource::with_documents(fixtures()));
    source.insert(Section::Contact, json!("just a string"));
    let store = Arc::new(serc_content::MemoryStore::new());

    let mut service = ContentService::new(
        ContentLoader::new(source).with_validation(false),
        OverrideStore::new(store),
    );
    service.initialize().await.unwrap();
    assert_eq!(service.section(Section::Contact).unwrap(), &json!("just a string"));
}

#[tokio::test]
async fn test_status_handle_observes_ready() {
    let harness = TestHarness::new();
    let mut service = harness.service();
    let status = service.status();
    assert_eq!(status.state(), ContentState::Uninitialized);

    let waiter = tokio::spawn(async move { status.wait_ready(Duration::from_secs(5)).await });
    service.initialize().await.unwrap();

    waiter.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_status_handle_observes_failure() {
    let harness = TestHarness::new();
    harness.source.set_unreachable(Section::Courses, true);
    let mut service = harness.service();
    let status = service.status();

    let _ = service.initialize().await;

    let err = status.wait_ready(Duration::from_secs(1)).await.unwrap_err();
    assert!(matches!(err, Error::InvalidState { .. }));
    assert!(status.state().error_message().is_some());
}

#[tokio::test]
async fn test_get_baseline_reads_source_not_snapshot() {
    let harness = TestHarness::new();
    let mut service = harness.ready_service().await;
    service
        .update_section(Section::Courses, json!([]))
        .unwrap();

    let baseline = service.get_baseline(Section::Courses).await.unwrap();
    assert_eq!(baseline, fixture(Section::Courses));
    assert_eq!(service.section(Section::Courses).unwrap(), &json!([]));
}
