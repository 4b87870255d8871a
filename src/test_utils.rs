//! Test utilities and mock factories.
//!
//! This module provides shared testing infrastructure:
//! - A small scenario wizard covering every node kind
//! - Record and time fixtures
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::engine::TraversalEngine;
use crate::graph::{DeadEndPolicy, DiagnosticGraph, NodeDefinition, NodeKind, WizardDefinition};
use crate::history::{DiagnosisRecord, DiagnosisStep, Outcome, OutcomeKind};
use crate::traits::MockTimeProvider;

/// The scenario wizard.
///
/// ```text
/// root (gate) --hazard--> S1 (stop, dead end)
///      \--all-clear--> Q1 (question)
///                        |--Yes--> A1 (action) --Power is back--> R1 (resolved)
///                        |                     \--Still dead----> C1 (call expert)
///                        \--No---> A2 (action) --Fixed--> R1
///                                              \--Sparks--> S2 (stop) --continue--> C1
/// ```
#[must_use]
pub fn scenario_definition() -> WizardDefinition {
    WizardDefinition::new("test", "Test Wizard", "root")
        .with_node(NodeDefinition::gate("root", "S1", "Q1"))
        .with_node(
            NodeDefinition::new("S1", NodeKind::Stop, "Stop right there")
                .with_message("Leave the area and call for help."),
        )
        .with_node(
            NodeDefinition::new("Q1", NodeKind::Question, "Is anything working?")
                .with_option("Yes", "A1")
                .with_option("No", "A2"),
        )
        .with_node(
            NodeDefinition::new("A1", NodeKind::Action, "Reset the breaker")
                .with_option("Power is back", "R1")
                .with_option("Still dead", "C1"),
        )
        .with_node(
            NodeDefinition::new("A2", NodeKind::Action, "Check the outlet")
                .with_option("Fixed", "R1")
                .with_option("Sparks", "S2"),
        )
        .with_node(
            NodeDefinition::new("S2", NodeKind::Stop, "Do not touch it")
                .with_message("Turn the power off at the panel.")
                .with_continue_to("C1"),
        )
        .with_node(
            NodeDefinition::new("R1", NodeKind::Resolved, "Power restored")
                .with_message("The breaker had tripped."),
        )
        .with_node(NodeDefinition::new(
            "C1",
            NodeKind::CallExpert,
            "Call an electrician",
        ))
}

/// The scenario wizard, validated.
#[must_use]
pub fn scenario_graph() -> DiagnosticGraph {
    DiagnosticGraph::from_definition(scenario_definition(), DeadEndPolicy::Warn)
        .expect("scenario wizard is valid")
}

/// A fresh engine over the scenario wizard.
#[must_use]
pub fn scenario_engine() -> TraversalEngine {
    TraversalEngine::start(Arc::new(scenario_graph()))
}

/// A resolved record with the given id.
#[must_use]
pub fn test_record(id: &str) -> DiagnosisRecord {
    DiagnosisRecord {
        id: id.to_string(),
        wizard_kind: "test".to_string(),
        wizard_label: "Test Wizard".to_string(),
        created_at: "2026-01-15T10:30:00Z".parse().expect("valid timestamp"),
        steps: vec![DiagnosisStep {
            node_id: "R1".to_string(),
            title: "Power restored".to_string(),
            icon: "✅".to_string(),
            kind: NodeKind::Resolved,
            selected_option: None,
        }],
        outcome: Outcome {
            kind: OutcomeKind::Resolved,
            title: "Power restored".to_string(),
            message: "The breaker had tripped.".to_string(),
            script: None,
            tip: None,
        },
    }
}

/// Create a mock time provider that returns a fixed timestamp.
#[must_use]
pub fn mock_time(time: DateTime<Utc>) -> MockTimeProvider {
    let mut mock = MockTimeProvider::new();
    mock.expect_now().return_const(time);
    mock
}

/// Create a mock time provider from an ISO 8601 timestamp string.
///
/// # Panics
///
/// Panics if the timestamp string is invalid.
#[must_use]
pub fn mock_time_str(timestamp: &str) -> MockTimeProvider {
    let time = timestamp
        .parse::<DateTime<Utc>>()
        .expect("Invalid timestamp format");
    mock_time(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TimeProvider;
    use chrono::Datelike;

    #[test]
    fn test_scenario_graph_has_every_kind() {
        let graph = scenario_graph();
        for kind in NodeKind::ALL {
            assert!(graph.nodes().any(|n| n.kind == kind), "{kind}");
        }
        assert!(graph.report().unreachable.is_empty());
    }

    #[test]
    fn test_mock_time_str() {
        let mock = mock_time_str("2024-01-15T12:00:00Z");
        let now = mock.now();
        assert_eq!(now.year(), 2024);
        assert_eq!(now.month(), 1);
        assert_eq!(now.day(), 15);
    }

    #[test]
    fn test_test_record() {
        let record = test_record("dx-1");
        assert_eq!(record.id, "dx-1");
        assert_eq!(record.outcome.kind, OutcomeKind::Resolved);
    }
}
