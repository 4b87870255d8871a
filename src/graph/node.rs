//! Validated node types.
//!
//! A [`DiagnosticNode`] is only ever produced by graph validation, so its
//! [`NodeKind`] and its [`Transitions`] always agree.

use serde::{Deserialize, Serialize};

/// The closed set of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// Two-way hazard check; must be passed before diagnosing anything.
    SafetyGate,
    /// A question with labeled answers.
    Question,
    /// Something the user should do, followed by labeled outcomes.
    Action,
    /// Stop working on it; may continue to a "what to tell the expert" node.
    Stop,
    /// The user fixed the problem.
    Resolved,
    /// Hand off to a professional.
    #[serde(alias = "call-tech")]
    CallExpert,
}

impl NodeKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::SafetyGate,
        Self::Question,
        Self::Action,
        Self::Stop,
        Self::Resolved,
        Self::CallExpert,
    ];

    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SafetyGate => "safety-gate",
            Self::Question => "question",
            Self::Action => "action",
            Self::Stop => "stop",
            Self::Resolved => "resolved",
            Self::CallExpert => "call-expert",
        }
    }

    /// True for the kinds that never have outgoing edges.
    ///
    /// A `Stop` is not in this set; its terminality depends on the node.
    #[must_use]
    pub const fn is_always_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::CallExpert)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgent a stop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Danger to people or property.
    Critical,
    /// Beyond a safe DIY fix.
    Warning,
}

/// Display payload of a node. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeContent {
    /// Short glyph shown on the card and in saved steps.
    #[serde(default)]
    pub icon: String,
    /// Card title.
    pub title: String,
    /// Line under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// The prompt the user answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// Sensory checklist shown on safety gates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<String>,
    /// What to do before answering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    /// Why the step matters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learn: Option<String>,
    /// Main message on stop and terminal cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Bullet lines under the message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    /// Stop urgency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    /// Follow-up advice on resolved cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    /// What to say when calling a professional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

/// A labeled edge of a question or action node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceEdge {
    /// Button text; unique within its node.
    pub label: String,
    /// Id of the node this choice leads to.
    pub target: String,
    /// Optional glyph for the button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ChoiceEdge {
    /// Create a new choice edge.
    #[must_use]
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
            icon: None,
        }
    }
}

/// Outgoing edges, shaped by node kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Transitions {
    /// Safety gate: exactly two edges.
    Gate {
        /// Taken when the user reports a hazard.
        on_hazard_detected: String,
        /// Taken when everything is clear.
        on_all_clear: String,
    },
    /// Question or action: ordered labeled edges.
    Choices {
        /// Edges in display order.
        options: Vec<ChoiceEdge>,
    },
    /// Stop: optional continuation.
    Stop {
        /// Follow-up node, if any.
        continue_to: Option<String>,
    },
    /// Resolved or call-expert: nothing.
    Terminal,
}

impl Transitions {
    /// Every target id, in display order.
    #[must_use]
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Self::Gate {
                on_hazard_detected,
                on_all_clear,
            } => vec![on_hazard_detected.as_str(), on_all_clear.as_str()],
            Self::Choices { options } => options.iter().map(|o| o.target.as_str()).collect(),
            Self::Stop { continue_to } => continue_to.iter().map(String::as_str).collect(),
            Self::Terminal => Vec::new(),
        }
    }
}

/// A single validated step of a wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticNode {
    /// Unique id within the graph.
    pub id: String,
    /// Node kind.
    pub kind: NodeKind,
    /// Display payload.
    pub content: NodeContent,
    /// Outgoing edges.
    pub transitions: Transitions,
}

impl DiagnosticNode {
    /// True iff no further advancement is possible from this node.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        match self.kind {
            NodeKind::Resolved | NodeKind::CallExpert => true,
            NodeKind::Stop => matches!(self.transitions, Transitions::Stop { continue_to: None }),
            NodeKind::SafetyGate | NodeKind::Question | NodeKind::Action => false,
        }
    }

    /// Labeled choices, empty for non-choice nodes.
    #[must_use]
    pub fn options(&self) -> &[ChoiceEdge] {
        match &self.transitions {
            Transitions::Choices { options } => options,
            _ => &[],
        }
    }

    /// Stop continuation, if any.
    #[must_use]
    pub fn continue_to(&self) -> Option<&str> {
        match &self.transitions {
            Transitions::Stop { continue_to } => continue_to.as_deref(),
            _ => None,
        }
    }
}
