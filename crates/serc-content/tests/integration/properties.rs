//! Property tests over random sequences of edits, reverts, and resets.

use std::collections::BTreeMap;

use proptest::prelude::*;
use serc_content::{ContentService, Section};
use serde_json::Value;

use crate::common::{TestHarness, edited, fixture};

#[derive(Debug, Clone)]
enum Op {
    Update(Section, u8),
    UpdateTwice(Section, u8),
    Revert(Section),
    Reset,
}

fn section_strategy() -> impl Strategy<Value = Section> {
    (0..Section::ALL.len()).prop_map(|i| Section::ALL[i])
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (section_strategy(), any::<u8>()).prop_map(|(s, t)| Op::Update(s, t)),
        2 => (section_strategy(), any::<u8>()).prop_map(|(s, t)| Op::UpdateTwice(s, t)),
        2 => section_strategy().prop_map(Op::Revert),
        1 => Just(Op::Reset),
    ]
}

async fn apply(service: &mut ContentService, expected: &mut BTreeMap<Section, Value>, op: &Op) {
    match op {
        Op::Update(section, tag) => {
            let value = edited(*section, &tag.to_string());
            service.update_section(*section, value.clone()).unwrap();
            expected.insert(*section, value);
        }
        Op::UpdateTwice(section, tag) => {
            let value = edited(*section, &tag.to_string());
            service.update_section(*section, value.clone()).unwrap();
            service.update_section(*section, value.clone()).unwrap();
            expected.insert(*section, value);
        }
        Op::Revert(section) => {
            let token = service.request_revert(*section).unwrap();
            service.confirm(&token).await.unwrap();
            expected.remove(section);
        }
        Op::Reset => {
            let token = service.request_reset().unwrap();
            service.confirm(&token).await.unwrap();
            expected.clear();
        }
    }
}

fn check(harness: &TestHarness, service: &ContentService, expected: &BTreeMap<Section, Value>) {
    // Modified set mirrors the durable mapping's keys.
    let mut stored = harness.stored_sections();
    stored.sort();
    let mut modified: Vec<String> = service
        .modified_sections()
        .iter()
        .map(|s| s.as_str().to_string())
        .collect();
    modified.sort();
    assert_eq!(stored, modified);

    // Overrides win, everything else falls back to baseline.
    for section in Section::ALL {
        let want = expected.get(&section).cloned().unwrap_or_else(|| fixture(section));
        assert_eq!(service.section(section).unwrap(), &want);
    }

    if let Some(Value::Object(map)) = harness.stored_overrides() {
        for (name, value) in map {
            let section: Section = name.parse().unwrap();
            assert_eq!(expected.get(&section), Some(&value));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_effective_content_tracks_storage(ops in prop::collection::vec(op_strategy(), 1..12)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let harness = TestHarness::new();
            let mut service = harness.ready_service().await;
            let mut expected = BTreeMap::new();

            for op in &ops {
                apply(&mut service, &mut expected, op).await;
                check(&harness, &service, &expected);
            }

            // A fresh instance over the same storage sees the same content.
            let reopened = harness.ready_service().await;
            check(&harness, &reopened, &expected);
        });
    }
}
