//! Confirmed revert and reset.

use serc_content::{ContentAction, Error, Section};

use crate::common::{TestHarness, edited, fixture};

#[tokio::test]
async fn test_revert_restores_baseline() {
    let harness = TestHarness::new();
    let mut service = harness.ready_service().await;
    service
        .update_section(Section::About, edited(Section::About, "B"))
        .unwrap();
    service
        .update_section(Section::Contact, edited(Section::Contact, "C"))
        .unwrap();

    let token = service.request_revert(Section::About).unwrap();
    assert!(token.prompt().contains("about"));
    let action = service.confirm(&token).await.unwrap();

    assert_eq!(action, ContentAction::Revert(Section::About));
    assert_eq!(service.section(Section::About).unwrap(), &fixture(Section::About));
    assert!(!service.is_modified(Section::About));
    assert!(service.is_modified(Section::Contact));
    assert_eq!(harness.stored_sections(), vec!["contact".to_string()]);
}

#[tokio::test]
async fn test_revert_unmodified_section_is_noop() {
    let harness = TestHarness::new();
    let mut service = harness.ready_service().await;

    let token = service.request_revert(Section::Contact).unwrap();
    service.confirm(&token).await.unwrap();

    assert!(service.modified_sections().is_empty());
    assert!(service.state().is_ready());
    assert_eq!(service.section(Section::Contact).unwrap(), &fixture(Section::Contact));
    assert!(harness.stored_overrides().is_none());
}

#[tokio::test]
async fn test_revert_last_override_removes_storage_entry() {
    let harness = TestHarness::new();
    let mut service = harness.ready_service().await;
    service
        .update_section(Section::Courses, edited(Section::Courses, "x"))
        .unwrap();

    let token = service.request_revert(Section::Courses).unwrap();
    service.confirm(&token).await.unwrap();
    assert!(harness.stored_overrides().is_none());
}

#[tokio::test]
async fn test_reset_after_update_restores_everything() {
    let harness = TestHarness::new();
    let mut service = harness.ready_service().await;
    service
        .update_section(Section::Services, edited(Section::Services, "new"))
        .unwrap();
    service
        .update_section(Section::People, edited(Section::People, "p"))
        .unwrap();

    let token = service.request_reset().unwrap();
    assert!(token.prompt().contains("discard all local changes"));
    assert_eq!(service.confirm(&token).await.unwrap(), ContentAction::ResetAll);

    assert!(service.modified_sections().is_empty());
    for section in Section::ALL {
        assert_eq!(service.section(section).unwrap(), &fixture(section));
    }
    assert!(harness.stored_overrides().is_none());
}

#[tokio::test]
async fn test_unconfirmed_requests_change_nothing() {
    let harness = TestHarness::new();
    let mut service = harness.ready_service().await;
    service
        .update_section(Section::About, edited(Section::About, "B"))
        .unwrap();

    let _revert = service.request_revert(Section::About).unwrap();
    let _reset = service.request_reset().unwrap();

    assert!(service.is_modified(Section::About));
    assert_eq!(harness.stored_sections(), vec!["about".to_string()]);
}

#[tokio::test]
async fn test_token_is_single_use() {
    let harness = TestHarness::new();
    let mut service = harness.ready_service().await;

    let token = service.request_reset().unwrap();
    service.confirm(&token).await.unwrap();
    let err = service.confirm(&token).await.unwrap_err();
    assert!(matches!(err, Error::UnknownConfirmation(_)));
}

#[tokio::test]
async fn test_reinitialize_failure_after_revert_reports_error() {
    let harness = TestHarness::new();
    let mut service = harness.ready_service().await;
    service
        .update_section(Section::About, edited(Section::About, "B"))
        .unwrap();

    let token = service.request_revert(Section::About).unwrap();
    harness.source.set_unreachable(Section::Systems, true);

    let err = service.confirm(&token).await.unwrap_err();
    assert!(err.is_load_failure());
    assert!(service.state().is_terminal());
    assert!(service.get().is_err());
    // The override was already cleared before reloading.
    assert!(harness.stored_overrides().is_none());
}
