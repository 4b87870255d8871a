//! Diagnosis records.
//!
//! A record is a flattened copy of one finished session. It carries the
//! titles and icons it needs for display, so it stays readable after the
//! wizard content that produced it changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::graph::{DiagnosticNode, NodeKind};

/// Generate a fresh record id.
#[must_use]
pub fn generate_record_id() -> String {
    format!("dx-{}", Uuid::new_v4().simple())
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeKind {
    /// The user fixed it.
    Resolved,
    /// Hand off to a professional.
    #[serde(alias = "call-tech")]
    CallExpert,
    /// A safety stop with nothing further to do.
    Stop,
}

impl OutcomeKind {
    /// Outcome for a terminal node kind, `None` for non-terminal kinds.
    #[must_use]
    pub const fn from_node_kind(kind: NodeKind) -> Option<Self> {
        match kind {
            NodeKind::Resolved => Some(Self::Resolved),
            NodeKind::CallExpert => Some(Self::CallExpert),
            NodeKind::Stop => Some(Self::Stop),
            NodeKind::SafetyGate | NodeKind::Question | NodeKind::Action => None,
        }
    }

    /// Short badge text for history listings.
    #[must_use]
    pub const fn badge(&self) -> &'static str {
        match self {
            Self::Resolved => "Self-Resolved",
            Self::CallExpert => "Call a Pro",
            Self::Stop => "Safety Stop",
        }
    }
}

/// One step of a recorded session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisStep {
    /// Node id at the time of recording.
    pub node_id: String,
    /// Node title.
    pub title: String,
    /// Node icon.
    pub icon: String,
    /// Node kind.
    pub kind: NodeKind,
    /// Label chosen to leave this node, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<String>,
}

impl DiagnosisStep {
    /// Copy the display fields of `node`.
    #[must_use]
    pub fn from_node(node: &DiagnosticNode, selected_option: Option<String>) -> Self {
        Self {
            node_id: node.id.clone(),
            title: node.content.title.clone(),
            icon: node.content.icon.clone(),
            kind: node.kind,
            selected_option,
        }
    }
}

/// What the session concluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Outcome kind.
    pub kind: OutcomeKind,
    /// Terminal node title.
    pub title: String,
    /// Terminal node message, or its title when it has none.
    pub message: String,
    /// What to say when calling a professional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// Follow-up advice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

impl Outcome {
    /// Outcome of a terminal node, `None` if the node's kind is never terminal.
    #[must_use]
    pub fn from_node(node: &DiagnosticNode) -> Option<Self> {
        let kind = OutcomeKind::from_node_kind(node.kind)?;
        Some(Self {
            kind,
            title: node.content.title.clone(),
            message: node
                .content
                .message
                .clone()
                .unwrap_or_else(|| node.content.title.clone()),
            script: node.content.script.clone(),
            tip: node.content.tip.clone(),
        })
    }
}

/// Immutable snapshot of one finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisRecord {
    /// Unique record id.
    pub id: String,
    /// Domain tag of the wizard.
    pub wizard_kind: String,
    /// Wizard name at the time of recording.
    pub wizard_label: String,
    /// When the session was recorded.
    pub created_at: DateTime<Utc>,
    /// Path plus the terminal node.
    pub steps: Vec<DiagnosisStep>,
    /// How it ended.
    pub outcome: Outcome,
}
