//! Diagnosis history.
//!
//! This module provides:
//! - [`DiagnosisRecord`] and its parts: the serializable snapshot of one
//!   finished session
//! - [`DiagnosisStore`]: a bounded, newest-first collection of records that
//!   writes through to a [`RecordStorage`](crate::traits::RecordStorage)

mod record;
mod store;

pub use record::{generate_record_id, DiagnosisRecord, DiagnosisStep, Outcome, OutcomeKind};
pub use store::{DiagnosisStore, MAX_RECORDS};
