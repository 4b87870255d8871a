//! Inputs accepted by [`TraversalEngine::choose`](super::TraversalEngine::choose).

use serde::{Deserialize, Serialize};

use crate::graph::{DiagnosticNode, Transitions};

/// Label recorded when a hazard is reported at a safety gate.
pub const HAZARD_LABEL: &str = "hazard";

/// Label recorded when a safety gate is passed.
pub const ALL_CLEAR_LABEL: &str = "all-clear";

/// One user decision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Choice {
    /// Answer to a safety gate.
    Hazard {
        /// True if the user noticed any hazard.
        observed: bool,
    },
    /// Pick a question/action choice by its label.
    Label(String),
    /// Pick a question/action choice by display position.
    Index(usize),
    /// Follow a stop's continuation.
    Continue,
}

impl Choice {
    /// Safety gate answer.
    #[must_use]
    pub const fn hazard(observed: bool) -> Self {
        Self::Hazard { observed }
    }

    /// Choice by label.
    #[must_use]
    pub fn label(label: impl Into<String>) -> Self {
        Self::Label(label.into())
    }

    pub(super) fn describe(&self) -> String {
        match self {
            Self::Hazard { observed: true } => "hazard report".to_string(),
            Self::Hazard { observed: false } => "all-clear report".to_string(),
            Self::Label(label) => format!("choice {label:?}"),
            Self::Index(index) => format!("choice #{index}"),
            Self::Continue => "continue".to_string(),
        }
    }
}

/// A legal input for the current node, with what to show and where it leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableChoice {
    /// Input to pass to `choose`.
    pub choice: Choice,
    /// Button text.
    pub label: String,
    /// Optional button glyph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Node the choice leads to.
    pub target: String,
}

pub(super) fn available(node: &DiagnosticNode) -> Vec<AvailableChoice> {
    if node.is_terminal() {
        return Vec::new();
    }
    match &node.transitions {
        Transitions::Gate {
            on_hazard_detected,
            on_all_clear,
        } => vec![
            AvailableChoice {
                choice: Choice::hazard(true),
                label: HAZARD_LABEL.to_string(),
                icon: None,
                target: on_hazard_detected.clone(),
            },
            AvailableChoice {
                choice: Choice::hazard(false),
                label: ALL_CLEAR_LABEL.to_string(),
                icon: None,
                target: on_all_clear.clone(),
            },
        ],
        Transitions::Choices { options } => options
            .iter()
            .map(|o| AvailableChoice {
                choice: Choice::Label(o.label.clone()),
                label: o.label.clone(),
                icon: o.icon.clone(),
                target: o.target.clone(),
            })
            .collect(),
        Transitions::Stop {
            continue_to: Some(next),
        } => vec![AvailableChoice {
            choice: Choice::Continue,
            label: "continue".to_string(),
            icon: None,
            target: next.clone(),
        }],
        Transitions::Stop { continue_to: None } | Transitions::Terminal => Vec::new(),
    }
}
