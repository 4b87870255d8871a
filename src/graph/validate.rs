//! Definition validation.
//!
//! Structural violations are fatal and reported as
//! [`GraphValidationError`]. Suspicious but traversable content is collected
//! into a [`ValidationReport`] instead.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::definition::NodeDefinition;
use super::node::{ChoiceEdge, DiagnosticNode, NodeKind, Transitions};
use crate::error::GraphValidationError;

/// What to do with a `Stop` node that has no continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadEndPolicy {
    /// Accept it as terminal and list it in the report.
    #[default]
    Warn,
    /// Refuse the graph.
    Reject,
}

/// Non-fatal findings from validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Stop nodes with no continuation.
    pub dead_end_stops: Vec<String>,
    /// Nodes no path from the root reaches.
    pub unreachable: Vec<String>,
    /// Question or action nodes with zero choices.
    pub choiceless: Vec<String>,
}

impl ValidationReport {
    /// True when nothing was flagged.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dead_end_stops.is_empty() && self.unreachable.is_empty() && self.choiceless.is_empty()
    }
}

/// Convert one definition into a node, checking that its edges fit its kind.
pub(super) fn build_node(def: &NodeDefinition) -> Result<DiagnosticNode, GraphValidationError> {
    let transitions = match def.kind {
        NodeKind::SafetyGate => {
            reject_options(def)?;
            reject_edge(def, def.continue_to.is_some(), "continue")?;
            let on_hazard_detected = def.on_hazard_detected.clone().ok_or_else(|| {
                GraphValidationError::IncompleteGate {
                    node_id: def.id.clone(),
                    edge: "on_hazard_detected".to_string(),
                }
            })?;
            let on_all_clear =
                def.on_all_clear
                    .clone()
                    .ok_or_else(|| GraphValidationError::IncompleteGate {
                        node_id: def.id.clone(),
                        edge: "on_all_clear".to_string(),
                    })?;
            Transitions::Gate {
                on_hazard_detected,
                on_all_clear,
            }
        }
        NodeKind::Question | NodeKind::Action => {
            reject_gate_edges(def)?;
            reject_edge(def, def.continue_to.is_some(), "continue")?;
            let mut seen = HashSet::new();
            let mut options = Vec::with_capacity(def.options.len());
            for opt in &def.options {
                if !seen.insert(opt.label.as_str()) {
                    return Err(GraphValidationError::DuplicateChoice {
                        node_id: def.id.clone(),
                        label: opt.label.clone(),
                    });
                }
                options.push(ChoiceEdge {
                    label: opt.label.clone(),
                    target: opt.next.clone(),
                    icon: opt.icon.clone(),
                });
            }
            Transitions::Choices { options }
        }
        NodeKind::Stop => {
            reject_options(def)?;
            reject_gate_edges(def)?;
            Transitions::Stop {
                continue_to: def.continue_to.clone(),
            }
        }
        NodeKind::Resolved | NodeKind::CallExpert => {
            reject_options(def)?;
            reject_gate_edges(def)?;
            reject_edge(def, def.continue_to.is_some(), "continue")?;
            Transitions::Terminal
        }
    };

    Ok(DiagnosticNode {
        id: def.id.clone(),
        kind: def.kind,
        content: def.content.clone(),
        transitions,
    })
}

fn reject_edge(def: &NodeDefinition, present: bool, edge: &str) -> Result<(), GraphValidationError> {
    if present {
        return Err(GraphValidationError::UnexpectedEdges {
            node_id: def.id.clone(),
            kind: def.kind.to_string(),
            edge: edge.to_string(),
        });
    }
    Ok(())
}

fn reject_options(def: &NodeDefinition) -> Result<(), GraphValidationError> {
    reject_edge(def, !def.options.is_empty(), "choice")
}

fn reject_gate_edges(def: &NodeDefinition) -> Result<(), GraphValidationError> {
    reject_edge(
        def,
        def.on_hazard_detected.is_some() || def.on_all_clear.is_some(),
        "gate",
    )
}

/// Check that every edge target resolves.
pub(super) fn check_closed(nodes: &HashMap<String, DiagnosticNode>) -> Result<(), GraphValidationError> {
    // Sorted so the reported edge does not depend on hash order.
    let mut ids: Vec<&String> = nodes.keys().collect();
    ids.sort();
    for id in ids {
        for target in nodes[id].transitions.targets() {
            if !nodes.contains_key(target) {
                return Err(GraphValidationError::DanglingEdge {
                    node_id: id.clone(),
                    target: target.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Collect non-fatal findings. Assumes the graph is closed.
pub(super) fn report(
    nodes: &HashMap<String, DiagnosticNode>,
    order: &[String],
    root: &str,
) -> ValidationReport {
    let mut reachable = HashSet::new();
    let mut queue = VecDeque::from([root]);
    while let Some(id) = queue.pop_front() {
        if !reachable.insert(id) {
            continue;
        }
        if let Some(node) = nodes.get(id) {
            queue.extend(node.transitions.targets());
        }
    }

    let mut report = ValidationReport::default();
    for id in order {
        let Some(node) = nodes.get(id) else { continue };
        if !reachable.contains(id.as_str()) {
            report.unreachable.push(id.clone());
        }
        match node.kind {
            NodeKind::Stop if node.is_terminal() => report.dead_end_stops.push(id.clone()),
            NodeKind::Question | NodeKind::Action if node.options().is_empty() => {
                report.choiceless.push(id.clone());
            }
            _ => {}
        }
    }
    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_requires_both_edges() {
        let mut def = NodeDefinition::gate("entry", "stop", "scope");
        def.on_all_clear = None;
        let err = build_node(&def).unwrap_err();
        assert!(matches!(
            err,
            GraphValidationError::IncompleteGate { edge, .. } if edge == "on_all_clear"
        ));

        let mut def = NodeDefinition::gate("entry", "stop", "scope");
        def.on_hazard_detected = None;
        let err = build_node(&def).unwrap_err();
        assert!(matches!(
            err,
            GraphValidationError::IncompleteGate { edge, .. } if edge == "on_hazard_detected"
        ));
    }

    #[test]
    fn test_gate_rejects_options() {
        let def = NodeDefinition::gate("entry", "a", "b").with_option("Extra", "c");
        let err = build_node(&def).unwrap_err();
        assert!(matches!(err, GraphValidationError::UnexpectedEdges { edge, .. } if edge == "choice"));
    }

    #[test]
    fn test_question_rejects_gate_edges() {
        let mut def = NodeDefinition::new("q", NodeKind::Question, "Q").with_option("Yes", "a");
        def.on_all_clear = Some("b".to_string());
        let err = build_node(&def).unwrap_err();
        assert!(matches!(err, GraphValidationError::UnexpectedEdges { edge, .. } if edge == "gate"));
    }

    #[test]
    fn test_question_rejects_duplicate_labels() {
        let def = NodeDefinition::new("q", NodeKind::Question, "Q")
            .with_option("Yes", "a")
            .with_option("Yes", "b");
        let err = build_node(&def).unwrap_err();
        assert_eq!(
            err,
            GraphValidationError::DuplicateChoice {
                node_id: "q".to_string(),
                label: "Yes".to_string(),
            }
        );
    }

    #[test]
    fn test_terminal_rejects_continuation() {
        let def = NodeDefinition::new("done", NodeKind::Resolved, "Done").with_continue_to("x");
        let err = build_node(&def).unwrap_err();
        assert!(matches!(
            err,
            GraphValidationError::UnexpectedEdges { kind, edge, .. } if kind == "resolved" && edge == "continue"
        ));
    }

    #[test]
    fn test_stop_keeps_continuation() {
        let def = NodeDefinition::new("s", NodeKind::Stop, "Stop").with_continue_to("call");
        let node = build_node(&def).unwrap();
        assert_eq!(node.continue_to(), Some("call"));
        assert!(!node.is_terminal());
    }

    #[test]
    fn test_action_preserves_option_order() {
        let def = NodeDefinition::new("a", NodeKind::Action, "Act")
            .with_option("First", "x")
            .with_option("Second", "y")
            .with_option("Third", "z");
        let node = build_node(&def).unwrap();
        let labels: Vec<&str> = node.options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_report_clean() {
        assert!(ValidationReport::default().is_clean());
        let report = ValidationReport {
            unreachable: vec!["x".to_string()],
            ..ValidationReport::default()
        };
        assert!(!report.is_clean());
    }
}
