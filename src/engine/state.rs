//! Traversal state.

use serde::{Deserialize, Serialize};

/// One visited node and the label chosen to leave it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    /// The visited node.
    pub node_id: String,
    /// Label of the edge taken away from it, if the step was labeled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen_label: Option<String>,
}

impl PathEntry {
    /// Create a new path entry.
    #[must_use]
    pub fn new(node_id: impl Into<String>, chosen_label: Option<String>) -> Self {
        Self {
            node_id: node_id.into(),
            chosen_label,
        }
    }
}

/// Current position plus everything visited before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalState {
    /// The node currently presented.
    pub current_id: String,
    /// Visited nodes in visiting order, excluding the current one.
    pub path: Vec<PathEntry>,
}

impl TraversalState {
    /// Fresh state at `root`.
    #[must_use]
    pub fn initial(root: impl Into<String>) -> Self {
        Self {
            current_id: root.into(),
            path: Vec::new(),
        }
    }

    /// True if this is the fresh state for `root`.
    #[must_use]
    pub fn is_initial(&self, root: &str) -> bool {
        self.path.is_empty() && self.current_id == root
    }
}
