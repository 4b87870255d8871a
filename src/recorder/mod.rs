//! Session recorder.
//!
//! Watches a [`TraversalEngine`] and turns each terminal visit into exactly
//! one [`DiagnosisRecord`] in a [`DiagnosisStore`]. Hosts call
//! [`SessionRecorder::capture_if_terminal`] after every engine update, as
//! often as they like; repeated calls for the same visit store nothing new.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::engine::TraversalEngine;
use crate::error::StorageError;
use crate::history::{generate_record_id, DiagnosisRecord, DiagnosisStep, DiagnosisStore, Outcome};
use crate::traits::{RealTimeProvider, RecordStorage, TimeProvider};

/// Captures finished sessions.
#[derive(Debug, Default)]
pub struct SessionRecorder<T: TimeProvider = RealTimeProvider> {
    time: T,
    /// Session and revision whose terminal visit has been stored.
    captured: Option<(Uuid, u64)>,
}

impl SessionRecorder {
    /// Recorder stamped with the system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_time_provider(RealTimeProvider)
    }
}

impl<T: TimeProvider> SessionRecorder<T> {
    /// Recorder stamped with `time`.
    #[must_use]
    pub const fn with_time_provider(time: T) -> Self {
        Self {
            time,
            captured: None,
        }
    }

    /// True if the engine's current terminal visit has already been stored.
    #[must_use]
    pub fn is_captured(&self, engine: &TraversalEngine) -> bool {
        self.captured == Some((engine.session_id(), engine.revision()))
    }

    /// Build the record for a terminal engine, `None` otherwise.
    ///
    /// Every call generates a fresh id and timestamp.
    #[must_use]
    pub fn snapshot(&self, engine: &TraversalEngine) -> Option<DiagnosisRecord> {
        if !engine.is_terminal() {
            return None;
        }
        let graph = engine.graph();
        let terminal = engine.current_node();
        let outcome = Outcome::from_node(terminal)?;

        let steps = engine
            .path()
            .iter()
            .filter_map(|entry| {
                graph
                    .node(&entry.node_id)
                    .map(|node| DiagnosisStep::from_node(node, entry.chosen_label.clone()))
            })
            .chain(std::iter::once(DiagnosisStep::from_node(terminal, None)))
            .collect();

        Some(DiagnosisRecord {
            id: generate_record_id(),
            wizard_kind: graph.wizard().to_string(),
            wizard_label: graph.label().to_string(),
            created_at: self.time.now(),
            steps,
            outcome,
        })
    }

    /// Store the engine's outcome if it is terminal and not yet stored.
    ///
    /// Returns the newly stored record, or `None` if the engine is not
    /// terminal or this visit was already captured. Moving the engine with
    /// `back` or `restart` starts a new visit, so a later terminal node is
    /// captured again as a separate record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store rejects the record. The visit
    /// stays uncaptured, so a later call retries.
    pub async fn capture_if_terminal<S: RecordStorage>(
        &mut self,
        engine: &TraversalEngine,
        store: &mut DiagnosisStore<S>,
    ) -> Result<Option<DiagnosisRecord>, StorageError> {
        if self.is_captured(engine) {
            debug!(revision = engine.revision(), "Session already captured");
            return Ok(None);
        }
        let Some(record) = self.snapshot(engine) else {
            return Ok(None);
        };

        if let Err(e) = store.insert(record.clone()).await {
            warn!(
                error = %e,
                wizard = %record.wizard_kind,
                "Failed to store diagnosis, will retry"
            );
            return Err(e);
        }

        self.captured = Some((engine.session_id(), engine.revision()));
        info!(
            record_id = %record.id,
            wizard = %record.wizard_kind,
            outcome = ?record.outcome.kind,
            steps = record.steps.len(),
            "Diagnosis captured"
        );
        Ok(Some(record))
    }
}
