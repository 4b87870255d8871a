//! Wizard definitions as supplied by content authors.
//!
//! Definitions are loose: every edge field is optional and nothing is
//! checked on deserialization. [`DiagnosticGraph::from_definition`] turns a
//! definition into a validated graph.
//!
//! [`DiagnosticGraph::from_definition`]: super::DiagnosticGraph::from_definition

use serde::{Deserialize, Serialize};

use super::node::{NodeContent, NodeKind};
use crate::error::GraphValidationError;

/// One wizard as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardDefinition {
    /// Domain tag, e.g. `electrical` or `lawn-garden`.
    pub wizard: String,
    /// Human-readable wizard name.
    pub label: String,
    /// Id of the node the wizard starts at.
    #[serde(default = "default_root")]
    pub root: String,
    /// Every node of the wizard.
    pub nodes: Vec<NodeDefinition>,
}

fn default_root() -> String {
    "entry".to_string()
}

impl WizardDefinition {
    /// Create an empty definition rooted at `root`.
    #[must_use]
    pub fn new(wizard: impl Into<String>, label: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            wizard: wizard.into(),
            label: label.into(),
            root: root.into(),
            nodes: Vec::new(),
        }
    }

    /// Add a node.
    #[must_use]
    pub fn with_node(mut self, node: NodeDefinition) -> Self {
        self.nodes.push(node);
        self
    }

    /// Parse a definition from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GraphValidationError::InvalidDefinition`] if the JSON does not
    /// match the definition schema.
    pub fn from_json(wizard: &str, json: &str) -> Result<Self, GraphValidationError> {
        serde_json::from_str(json).map_err(|e| GraphValidationError::InvalidDefinition {
            wizard: wizard.to_string(),
            message: e.to_string(),
        })
    }
}

/// An authored choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDefinition {
    /// Button text.
    pub label: String,
    /// Target node id.
    pub next: String,
    /// Optional glyph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// One node as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDefinition {
    /// Node id.
    pub id: String,
    /// Node kind.
    #[serde(rename = "type", alias = "kind")]
    pub kind: NodeKind,
    /// Display payload.
    #[serde(flatten)]
    pub content: NodeContent,
    /// Choices for question and action nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDefinition>,
    /// Gate edge taken when a hazard is observed.
    #[serde(default, alias = "yesResult", skip_serializing_if = "Option::is_none")]
    pub on_hazard_detected: Option<String>,
    /// Gate edge taken when all is clear.
    #[serde(default, alias = "noResult", skip_serializing_if = "Option::is_none")]
    pub on_all_clear: Option<String>,
    /// Stop continuation.
    #[serde(default, alias = "next", skip_serializing_if = "Option::is_none")]
    pub continue_to: Option<String>,
}

impl NodeDefinition {
    /// Create a node definition with a title and no edges.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: NodeKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            content: NodeContent {
                title: title.into(),
                ..NodeContent::default()
            },
            options: Vec::new(),
            on_hazard_detected: None,
            on_all_clear: None,
            continue_to: None,
        }
    }

    /// A safety gate with both edges.
    #[must_use]
    pub fn gate(id: impl Into<String>, on_hazard: impl Into<String>, on_clear: impl Into<String>) -> Self {
        let mut node = Self::new(id, NodeKind::SafetyGate, "Safety Check");
        node.on_hazard_detected = Some(on_hazard.into());
        node.on_all_clear = Some(on_clear.into());
        node
    }

    /// Add a choice.
    #[must_use]
    pub fn with_option(mut self, label: impl Into<String>, next: impl Into<String>) -> Self {
        self.options.push(OptionDefinition {
            label: label.into(),
            next: next.into(),
            icon: None,
        });
        self
    }

    /// Set the stop continuation.
    #[must_use]
    pub fn with_continue_to(mut self, next: impl Into<String>) -> Self {
        self.continue_to = Some(next.into());
        self
    }

    /// Set the main message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.content.message = Some(message.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::graph::Severity;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_authored_json() {
        let json = r#"{
            "wizard": "electrical",
            "label": "Electrical",
            "nodes": [
                {
                    "id": "entry",
                    "type": "safety-gate",
                    "icon": "🔥",
                    "title": "Safety Check",
                    "checks": ["Smell", "See"],
                    "yesResult": "stop-emergency",
                    "noResult": "scope"
                },
                {
                    "id": "stop-emergency",
                    "type": "stop",
                    "icon": "🛑",
                    "title": "Stop. Do Not Proceed.",
                    "severity": "critical",
                    "next": "call-tech"
                },
                {
                    "id": "scope",
                    "type": "question",
                    "icon": "🔍",
                    "title": "What stopped working?",
                    "options": [{ "label": "One outlet", "next": "call-tech", "icon": "🔌" }]
                },
                { "id": "call-tech", "type": "call-tech", "icon": "📞", "title": "Call" }
            ]
        }"#;

        let def = WizardDefinition::from_json("electrical", json).unwrap();
        assert_eq!(def.root, "entry");
        assert_eq!(def.nodes.len(), 4);

        let gate = &def.nodes[0];
        assert_eq!(gate.kind, NodeKind::SafetyGate);
        assert_eq!(gate.on_hazard_detected.as_deref(), Some("stop-emergency"));
        assert_eq!(gate.on_all_clear.as_deref(), Some("scope"));
        assert_eq!(gate.content.checks, vec!["Smell", "See"]);

        let stop = &def.nodes[1];
        assert_eq!(stop.continue_to.as_deref(), Some("call-tech"));
        assert_eq!(stop.content.severity, Some(Severity::Critical));

        assert_eq!(def.nodes[2].options[0].icon.as_deref(), Some("🔌"));
        assert_eq!(def.nodes[3].kind, NodeKind::CallExpert);
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = WizardDefinition::from_json("broken", "{ not json");
        assert!(matches!(
            result,
            Err(GraphValidationError::InvalidDefinition { wizard, .. }) if wizard == "broken"
        ));
    }

    #[test]
    fn test_parse_unknown_kind() {
        let json = r#"{"wizard":"x","label":"X","nodes":[{"id":"a","type":"teleport","icon":"","title":""}]}"#;
        assert!(WizardDefinition::from_json("x", json).is_err());
    }

    #[test]
    fn test_builders() {
        let def = WizardDefinition::new("w", "W", "entry")
            .with_node(NodeDefinition::gate("entry", "stop", "q"))
            .with_node(NodeDefinition::new("q", NodeKind::Question, "Q").with_option("Yes", "stop"))
            .with_node(NodeDefinition::new("stop", NodeKind::Stop, "Stop").with_message("Halt"));

        assert_eq!(def.nodes.len(), 3);
        assert_eq!(def.nodes[1].options[0].next, "stop");
        assert_eq!(def.nodes[2].content.message.as_deref(), Some("Halt"));
    }
}
