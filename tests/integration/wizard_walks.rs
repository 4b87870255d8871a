//! Random walks over every bundled wizard.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use troubleshoot_wizard::catalog::{EmbeddedSource, WizardCatalog};
use troubleshoot_wizard::engine::TraversalEngine;
use troubleshoot_wizard::graph::DeadEndPolicy;

const WIZARDS: [&str; 4] = ["electrical", "automotive", "lawn-garden", "motorcycle"];

/// Wizards without "try again" loops.
const ACYCLIC: [&str; 3] = ["electrical", "automotive", "lawn-garden"];

fn engine_for(wizard: &str) -> TraversalEngine {
    WizardCatalog::load(&EmbeddedSource, DeadEndPolicy::Warn)
        .start(wizard)
        .expect("bundled wizard is offered")
}

/// Follow `picks` (each taken modulo the number of available choices) until
/// the walk ends or the picks run out.
fn walk(engine: &mut TraversalEngine, picks: &[usize]) -> usize {
    let mut steps = 0;
    for pick in picks {
        let choices = engine.available_choices();
        if choices.is_empty() {
            break;
        }
        let choice = choices[pick % choices.len()].choice.clone();
        engine.choose(choice).unwrap();
        steps += 1;
    }
    steps
}

#[test]
fn test_every_wizard_starts_at_a_safety_gate() {
    for wizard in WIZARDS {
        let engine = engine_for(wizard);
        assert_eq!(engine.current_id(), "entry", "{wizard}");
        assert_eq!(engine.available_choices().len(), 2, "{wizard}");
    }
}

#[test]
fn test_only_terminal_nodes_have_no_way_forward() {
    let catalog = WizardCatalog::load(&EmbeddedSource, DeadEndPolicy::Warn);
    for graph in catalog.offered() {
        for node in graph.nodes() {
            assert_eq!(
                node.is_terminal(),
                node.transitions.targets().is_empty(),
                "{}: {}",
                graph.wizard(),
                node.id
            );
        }
    }
}

proptest! {
    #[test]
    fn prop_long_walks_end_at_an_outcome(
        wizard in prop::sample::select(ACYCLIC.to_vec()),
        picks in proptest::collection::vec(any::<usize>(), 64),
    ) {
        let mut engine = engine_for(wizard);
        walk(&mut engine, &picks);
        prop_assert!(engine.is_terminal());
    }

    #[test]
    fn prop_walks_never_get_stuck(
        wizard in prop::sample::select(WIZARDS.to_vec()),
        picks in proptest::collection::vec(any::<usize>(), 0..40),
    ) {
        let mut engine = engine_for(wizard);
        walk(&mut engine, &picks);
        prop_assert!(engine.is_terminal() || !engine.available_choices().is_empty());
    }

    #[test]
    fn prop_walk_then_back_returns_to_root(
        wizard in prop::sample::select(WIZARDS.to_vec()),
        picks in proptest::collection::vec(any::<usize>(), 0..12),
    ) {
        let mut engine = engine_for(wizard);
        let steps = walk(&mut engine, &picks);
        prop_assert_eq!(engine.path().len(), steps);
        for _ in 0..steps {
            prop_assert!(engine.back().is_ok());
        }
        prop_assert_eq!(engine.current_id(), "entry");
        prop_assert!(!engine.can_go_back());
    }
}
