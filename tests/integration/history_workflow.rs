//! Sessions feeding the history.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use troubleshoot_wizard::catalog::{EmbeddedSource, WizardCatalog};
use troubleshoot_wizard::engine::Choice;
use troubleshoot_wizard::graph::DeadEndPolicy;
use troubleshoot_wizard::history::{DiagnosisStore, OutcomeKind};
use troubleshoot_wizard::recorder::SessionRecorder;
use troubleshoot_wizard::storage::MemoryStorage;

#[tokio::test]
async fn test_one_session_per_wizard() {
    let catalog = WizardCatalog::load(&EmbeddedSource, DeadEndPolicy::Warn);
    let storage = MemoryStorage::new();
    let mut store = DiagnosisStore::open(storage.clone(), 10).await;

    for graph in catalog.offered() {
        let mut engine = catalog.start(graph.wizard()).unwrap();
        let mut recorder = SessionRecorder::new();
        engine.choose(Choice::hazard(true)).unwrap();
        recorder.capture_if_terminal(&engine, &mut store).await.unwrap();
    }

    let kinds: Vec<&str> = store.list().iter().map(|r| r.wizard_kind.as_str()).collect();
    assert_eq!(kinds, vec!["motorcycle", "lawn-garden", "automotive", "electrical"]);
    assert!(store
        .list()
        .iter()
        .all(|r| r.outcome.kind == OutcomeKind::Stop));
    assert_eq!(storage.save_count(), 4);
}

#[tokio::test]
async fn test_shared_recorder_stores_each_wizard() {
    let catalog = WizardCatalog::load(&EmbeddedSource, DeadEndPolicy::Warn);
    let mut store = DiagnosisStore::open(MemoryStorage::new(), 10).await;
    let mut recorder = SessionRecorder::new();

    let mut electrical = catalog.start("electrical").unwrap();
    electrical.choose(Choice::hazard(true)).unwrap();
    let first = recorder.capture_if_terminal(&electrical, &mut store).await.unwrap();

    let mut automotive = catalog.start("automotive").unwrap();
    automotive.choose(Choice::hazard(true)).unwrap();
    let second = recorder.capture_if_terminal(&automotive, &mut store).await.unwrap();

    assert!(first.is_some());
    assert!(second.is_some());
    let kinds: Vec<&str> = store.list().iter().map(|r| r.wizard_kind.as_str()).collect();
    assert_eq!(kinds, vec!["automotive", "electrical"]);
}

#[tokio::test]
async fn test_unsaved_session_still_shows_outcome() {
    let catalog = WizardCatalog::load(&EmbeddedSource, DeadEndPolicy::Warn);
    let storage = MemoryStorage::new();
    let mut store = DiagnosisStore::open(storage.clone(), 10).await;
    let mut recorder = SessionRecorder::new();
    let mut engine = catalog.start("automotive").unwrap();

    engine.choose(Choice::hazard(true)).unwrap();
    storage.fail_saves(true);
    assert!(recorder.capture_if_terminal(&engine, &mut store).await.is_err());

    // The engine is untouched by the storage failure.
    assert!(engine.is_terminal());
    assert!(store.is_empty());
    assert!(recorder.snapshot(&engine).is_some());
}

proptest! {
    // Inserting capacity + k records keeps the newest `capacity`, newest first.
    #[test]
    fn prop_bounded_history(capacity in 1usize..12, extra in 1usize..8) {
        let catalog = WizardCatalog::load(&EmbeddedSource, DeadEndPolicy::Warn);
        let (stored, expected) = tokio_test::block_on(async {
            let mut store = DiagnosisStore::open(MemoryStorage::new(), capacity).await;
            let mut recorder = SessionRecorder::new();
            let mut engine = catalog.start("electrical").unwrap();
            let mut ids = Vec::new();
            for _ in 0..capacity + extra {
                engine.restart();
                engine.choose(Choice::hazard(true)).unwrap();
                let record = recorder
                    .capture_if_terminal(&engine, &mut store)
                    .await
                    .unwrap()
                    .unwrap();
                ids.push(record.id);
            }
            let stored: Vec<String> = store.list().iter().map(|r| r.id.clone()).collect();
            let expected: Vec<String> = ids.into_iter().rev().take(capacity).collect();
            (stored, expected)
        });
        prop_assert_eq!(stored.len(), capacity);
        prop_assert_eq!(stored, expected);
    }
}
