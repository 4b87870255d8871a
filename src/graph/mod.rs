//! Node graph model.
//!
//! This module provides:
//! - [`DiagnosticNode`] and the closed [`NodeKind`] set
//! - [`WizardDefinition`]: the loose authored form of a wizard
//! - [`DiagnosticGraph`]: an immutable, validated graph
//!
//! # Validation
//!
//! All structural checks run once in [`DiagnosticGraph::from_definition`].
//! A graph that exists is closed (every edge resolves), has a root, and has
//! edges that match each node's kind, so traversal never re-checks structure.
//!
//! # Example
//!
//! ```
//! use troubleshoot_wizard::graph::{
//!     DeadEndPolicy, DiagnosticGraph, NodeDefinition, NodeKind, WizardDefinition,
//! };
//!
//! let def = WizardDefinition::new("plumbing", "Sink Won't Drain", "entry")
//!     .with_node(NodeDefinition::gate("entry", "stop", "plunger"))
//!     .with_node(NodeDefinition::new("stop", NodeKind::Stop, "Shut off the water"))
//!     .with_node(
//!         NodeDefinition::new("plunger", NodeKind::Action, "Try a plunger")
//!             .with_option("It drains", "fixed")
//!             .with_option("Still clogged", "call"),
//!     )
//!     .with_node(NodeDefinition::new("fixed", NodeKind::Resolved, "Clog cleared"))
//!     .with_node(NodeDefinition::new("call", NodeKind::CallExpert, "Call a plumber"));
//!
//! let graph = DiagnosticGraph::from_definition(def, DeadEndPolicy::Warn).unwrap();
//! assert_eq!(graph.root_id(), "entry");
//! assert_eq!(graph.report().dead_end_stops, vec!["stop".to_string()]);
//! ```

mod definition;
mod node;
mod validate;

use std::collections::HashMap;

pub use definition::{NodeDefinition, OptionDefinition, WizardDefinition};
pub use node::{ChoiceEdge, DiagnosticNode, NodeContent, NodeKind, Severity, Transitions};
pub use validate::{DeadEndPolicy, ValidationReport};

use crate::error::GraphValidationError;

/// An immutable, validated wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticGraph {
    wizard: String,
    label: String,
    root: String,
    nodes: HashMap<String, DiagnosticNode>,
    /// Node ids in authored order.
    order: Vec<String>,
    report: ValidationReport,
}

impl DiagnosticGraph {
    /// Validate a definition and build the graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphValidationError`] if the definition is empty, repeats a
    /// node id, names a missing root, gives a node edges its kind does not
    /// allow, repeats a choice label, or has an edge to a missing node. Under
    /// [`DeadEndPolicy::Reject`], a stop with no continuation is also an error.
    pub fn from_definition(
        def: WizardDefinition,
        policy: DeadEndPolicy,
    ) -> Result<Self, GraphValidationError> {
        if def.nodes.is_empty() {
            return Err(GraphValidationError::Empty);
        }

        let mut nodes = HashMap::with_capacity(def.nodes.len());
        let mut order = Vec::with_capacity(def.nodes.len());
        for node_def in &def.nodes {
            let node = validate::build_node(node_def)?;
            if nodes.contains_key(&node.id) {
                return Err(GraphValidationError::DuplicateNode { node_id: node.id });
            }
            order.push(node.id.clone());
            nodes.insert(node.id.clone(), node);
        }

        if !nodes.contains_key(&def.root) {
            return Err(GraphValidationError::MissingRoot { root: def.root });
        }

        validate::check_closed(&nodes)?;

        let report = validate::report(&nodes, &order, &def.root);
        if policy == DeadEndPolicy::Reject {
            if let Some(node_id) = report.dead_end_stops.first() {
                return Err(GraphValidationError::DeadEndStop {
                    node_id: node_id.clone(),
                });
            }
        }
        if !report.is_clean() {
            tracing::warn!(
                wizard = %def.wizard,
                dead_end_stops = ?report.dead_end_stops,
                unreachable = ?report.unreachable,
                choiceless = ?report.choiceless,
                "Wizard content has suspicious nodes"
            );
        }

        tracing::debug!(wizard = %def.wizard, nodes = nodes.len(), "Wizard graph validated");

        Ok(Self {
            wizard: def.wizard,
            label: def.label,
            root: def.root,
            nodes,
            order,
            report,
        })
    }

    /// Domain tag of this wizard.
    #[must_use]
    pub fn wizard(&self) -> &str {
        &self.wizard
    }

    /// Human-readable wizard name.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Id of the start node.
    #[must_use]
    pub fn root_id(&self) -> &str {
        &self.root
    }

    /// The start node.
    #[must_use]
    pub fn root(&self) -> &DiagnosticNode {
        // Root existence is checked at construction.
        &self.nodes[&self.root]
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&DiagnosticNode> {
        self.nodes.get(id)
    }

    /// True if the graph has a node with this id.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes in authored order.
    pub fn nodes(&self) -> impl Iterator<Item = &DiagnosticNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a validated graph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Non-fatal validation findings.
    #[must_use]
    pub const fn report(&self) -> &ValidationReport {
        &self.report
    }
}
