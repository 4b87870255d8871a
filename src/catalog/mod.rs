//! Wizard catalog.
//!
//! A [`WizardCatalog`] validates every wizard a [`GraphSource`] supplies once,
//! up front. Wizards that fail validation are logged and declined; the rest
//! are offered as shared, immutable graphs ready to start engines on.
//!
//! # Example
//!
//! ```
//! use troubleshoot_wizard::catalog::{EmbeddedSource, WizardCatalog};
//! use troubleshoot_wizard::graph::DeadEndPolicy;
//!
//! let catalog = WizardCatalog::load(&EmbeddedSource, DeadEndPolicy::Warn);
//! let engine = catalog.start("electrical").unwrap();
//! assert_eq!(engine.current_id(), "entry");
//! ```

mod source;

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

pub use source::{DirectorySource, EmbeddedSource, GraphSource};

use crate::engine::TraversalEngine;
use crate::error::GraphValidationError;
use crate::graph::{DeadEndPolicy, DiagnosticGraph, ValidationReport};

/// A wizard that was not offered, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclinedWizard {
    /// Domain tag.
    pub wizard: String,
    /// What was wrong with it.
    pub error: GraphValidationError,
}

/// Listing entry for an offered wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardSummary {
    /// Domain tag.
    pub wizard: String,
    /// Display name.
    pub label: String,
    /// Number of nodes.
    pub nodes: usize,
    /// Non-fatal validation findings.
    pub report: ValidationReport,
}

/// Validated wizards, by domain tag.
#[derive(Debug, Clone, Default)]
pub struct WizardCatalog {
    graphs: HashMap<String, Arc<DiagnosticGraph>>,
    /// Offered tags in display order.
    order: Vec<String>,
    declined: Vec<DeclinedWizard>,
}

impl WizardCatalog {
    /// Validate every wizard in `source`.
    #[must_use]
    pub fn load(source: &dyn GraphSource, policy: DeadEndPolicy) -> Self {
        Self::load_all(&[source], policy)
    }

    /// Validate every wizard in `sources`.
    ///
    /// A wizard supplied by a later source replaces one with the same tag
    /// from an earlier source, unless the later one fails validation.
    #[must_use]
    pub fn load_all(sources: &[&dyn GraphSource], policy: DeadEndPolicy) -> Self {
        let mut catalog = Self::default();
        for source in sources {
            for wizard in source.wizards() {
                match source
                    .definition(&wizard)
                    .and_then(|def| DiagnosticGraph::from_definition(def, policy))
                {
                    Ok(graph) => catalog.offer(wizard, graph),
                    Err(error) => catalog.decline(wizard, error),
                }
            }
        }
        tracing::info!(
            offered = catalog.order.len(),
            declined = catalog.declined.len(),
            "Wizard catalog loaded"
        );
        catalog
    }

    fn offer(&mut self, wizard: String, graph: DiagnosticGraph) {
        if self.graphs.contains_key(&wizard) {
            tracing::debug!(wizard = %wizard, "Wizard replaced by later source");
        } else {
            self.order.push(wizard.clone());
        }
        self.graphs.insert(wizard, Arc::new(graph));
    }

    fn decline(&mut self, wizard: String, error: GraphValidationError) {
        tracing::warn!(wizard = %wizard, error = %error, "Wizard declined");
        self.declined.push(DeclinedWizard { wizard, error });
    }

    /// The validated graph for `wizard`.
    #[must_use]
    pub fn get(&self, wizard: &str) -> Option<Arc<DiagnosticGraph>> {
        self.graphs.get(wizard).cloned()
    }

    /// Offered graphs in display order.
    pub fn offered(&self) -> impl Iterator<Item = &DiagnosticGraph> {
        self.order
            .iter()
            .filter_map(|w| self.graphs.get(w))
            .map(|g| g.as_ref())
    }

    /// Listing entries for every offered wizard.
    #[must_use]
    pub fn summaries(&self) -> Vec<WizardSummary> {
        self.offered()
            .map(|g| WizardSummary {
                wizard: g.wizard().to_string(),
                label: g.label().to_string(),
                nodes: g.len(),
                report: g.report().clone(),
            })
            .collect()
    }

    /// Wizards that failed validation.
    #[must_use]
    pub fn declined(&self) -> &[DeclinedWizard] {
        &self.declined
    }

    /// Start a session on `wizard`.
    #[must_use]
    pub fn start(&self, wizard: &str) -> Option<TraversalEngine> {
        self.get(wizard).map(TraversalEngine::start)
    }

    /// Number of offered wizards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if nothing is offered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
