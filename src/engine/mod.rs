//! Traversal engine.
//!
//! A [`TraversalEngine`] walks one [`DiagnosticGraph`] for one user session.
//! It holds the current node and the path taken to reach it, and exposes a
//! single advancing operation, [`TraversalEngine::choose`], plus
//! [`back`](TraversalEngine::back) and [`restart`](TraversalEngine::restart).
//!
//! Rejected operations return [`TraversalError`] and leave the state exactly
//! as it was.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use troubleshoot_wizard::engine::{Choice, TraversalEngine};
//! use troubleshoot_wizard::graph::{
//!     DeadEndPolicy, DiagnosticGraph, NodeDefinition, NodeKind, WizardDefinition,
//! };
//!
//! let def = WizardDefinition::new("demo", "Demo", "entry")
//!     .with_node(NodeDefinition::gate("entry", "stop", "q"))
//!     .with_node(NodeDefinition::new("stop", NodeKind::Stop, "Stop"))
//!     .with_node(NodeDefinition::new("q", NodeKind::Question, "Works?").with_option("Yes", "ok"))
//!     .with_node(NodeDefinition::new("ok", NodeKind::Resolved, "Fixed"));
//! let graph = Arc::new(DiagnosticGraph::from_definition(def, DeadEndPolicy::Warn).unwrap());
//!
//! let mut engine = TraversalEngine::start(graph);
//! engine.choose(Choice::hazard(false)).unwrap();
//! engine.choose(Choice::label("Yes")).unwrap();
//! assert!(engine.is_terminal());
//! engine.back().unwrap();
//! assert_eq!(engine.current_id(), "q");
//! ```

mod choice;
mod state;

use std::sync::Arc;

use uuid::Uuid;

pub use choice::{AvailableChoice, Choice, ALL_CLEAR_LABEL, HAZARD_LABEL};
pub use state::{PathEntry, TraversalState};

use crate::error::TraversalError;
use crate::graph::{DiagnosticGraph, DiagnosticNode, NodeKind, Transitions};

/// State machine over one wizard.
#[derive(Debug, Clone)]
pub struct TraversalEngine {
    session_id: Uuid,
    graph: Arc<DiagnosticGraph>,
    state: TraversalState,
    revision: u64,
}

impl TraversalEngine {
    /// Start a session at the graph's root.
    #[must_use]
    pub fn start(graph: Arc<DiagnosticGraph>) -> Self {
        let state = TraversalState::initial(graph.root_id());
        tracing::debug!(wizard = %graph.wizard(), root = %graph.root_id(), "Traversal started");
        Self {
            session_id: Uuid::new_v4(),
            graph,
            state,
            revision: 0,
        }
    }

    /// Identity of this session, shared by clones of the engine.
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The graph being walked.
    #[must_use]
    pub fn graph(&self) -> &DiagnosticGraph {
        &self.graph
    }

    /// Shared handle to the graph.
    #[must_use]
    pub fn graph_handle(&self) -> Arc<DiagnosticGraph> {
        Arc::clone(&self.graph)
    }

    /// Current position and path.
    #[must_use]
    pub const fn state(&self) -> &TraversalState {
        &self.state
    }

    /// Id of the node currently presented.
    #[must_use]
    pub fn current_id(&self) -> &str {
        &self.state.current_id
    }

    /// Every node visited before the current one.
    #[must_use]
    pub fn path(&self) -> &[PathEntry] {
        &self.state.path
    }

    /// Counter bumped on every state change.
    ///
    /// Two equal revisions of the same session denote the same visit of the
    /// same node. Revisions of different sessions are unrelated.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// The node currently presented.
    #[must_use]
    pub fn current_node(&self) -> &DiagnosticNode {
        // Every id the engine stores came from a closed graph.
        self.graph
            .node(&self.state.current_id)
            .unwrap_or_else(|| self.graph.root())
    }

    /// True iff no further advancement is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.current_node().is_terminal()
    }

    /// True if [`back`](Self::back) would succeed.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.state.path.is_empty()
    }

    /// Every input [`choose`](Self::choose) accepts right now, in display order.
    #[must_use]
    pub fn available_choices(&self) -> Vec<AvailableChoice> {
        choice::available(self.current_node())
    }

    /// Kinds of every visited node followed by the current node's kind.
    #[must_use]
    pub fn progress(&self) -> Vec<NodeKind> {
        self.state
            .path
            .iter()
            .filter_map(|entry| self.graph.node(&entry.node_id).map(|n| n.kind))
            .chain(std::iter::once(self.current_node().kind))
            .collect()
    }

    /// Advance along the edge selected by `choice`.
    ///
    /// Returns the new current node.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::InvalidTransition`] if the current node is
    /// terminal or `choice` matches none of its edges. The state is unchanged.
    pub fn choose(&mut self, choice: Choice) -> Result<&DiagnosticNode, TraversalError> {
        let node = self.current_node();
        let (target, label) = resolve(node, &choice)?;

        tracing::debug!(
            wizard = %self.graph.wizard(),
            from = %node.id,
            to = %target,
            label = ?label,
            "Advanced"
        );

        let from = std::mem::replace(&mut self.state.current_id, target);
        self.state.path.push(PathEntry::new(from, label));
        self.revision += 1;
        Ok(self.current_node())
    }

    /// Undo the last step.
    ///
    /// The label chosen at the restored node is forgotten.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::NoHistory`] if the path is empty.
    pub fn back(&mut self) -> Result<&DiagnosticNode, TraversalError> {
        let entry = self.state.path.pop().ok_or(TraversalError::NoHistory)?;
        tracing::debug!(
            wizard = %self.graph.wizard(),
            from = %self.state.current_id,
            to = %entry.node_id,
            "Went back"
        );
        self.state.current_id = entry.node_id;
        self.revision += 1;
        Ok(self.current_node())
    }

    /// Return to the root with an empty path.
    pub fn restart(&mut self) {
        if self.state.is_initial(self.graph.root_id()) {
            return;
        }
        tracing::debug!(wizard = %self.graph.wizard(), "Restarted");
        self.state = TraversalState::initial(self.graph.root_id());
        self.revision += 1;
    }
}

/// Match a choice against a node's edges.
fn resolve(node: &DiagnosticNode, choice: &Choice) -> Result<(String, Option<String>), TraversalError> {
    let invalid = |reason: String| TraversalError::InvalidTransition {
        node_id: node.id.clone(),
        reason,
    };

    if node.is_terminal() {
        return Err(invalid(format!("{} node is terminal", node.kind)));
    }

    match (&node.transitions, choice) {
        (
            Transitions::Gate {
                on_hazard_detected,
                on_all_clear,
            },
            Choice::Hazard { observed },
        ) => Ok(if *observed {
            (on_hazard_detected.clone(), Some(HAZARD_LABEL.to_string()))
        } else {
            (on_all_clear.clone(), Some(ALL_CLEAR_LABEL.to_string()))
        }),
        (Transitions::Choices { options }, Choice::Label(label)) => options
            .iter()
            .find(|o| &o.label == label)
            .map(|o| (o.target.clone(), Some(o.label.clone())))
            .ok_or_else(|| invalid(format!("no choice labeled {label}"))),
        (Transitions::Choices { options }, Choice::Index(index)) => options
            .get(*index)
            .map(|o| (o.target.clone(), Some(o.label.clone())))
            .ok_or_else(|| {
                invalid(format!(
                    "choice index {index} out of range for {} options",
                    options.len()
                ))
            }),
        (
            Transitions::Stop {
                continue_to: Some(next),
            },
            Choice::Continue,
        ) => Ok((next.clone(), None)),
        (_, choice) => Err(invalid(format!(
            "{} is not accepted by a {} node",
            choice.describe(),
            node.kind
        ))),
    }
}
