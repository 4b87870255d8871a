//! Troubleshoot Wizard
//!
//! Safety-first diagnostic wizards for household and vehicle problems,
//! modelled as validated decision graphs.
//!
//! # Features
//!
//! - One generic graph schema for every wizard, validated once at load
//! - A traversal engine with a single `choose` operation, undo and restart
//! - Exactly-once capture of finished sessions into a bounded history
//! - `SQLite` persistence for the history
//!
//! # Quick Start
//!
//! ```bash
//! DATABASE_PATH=./data/diagnoses.db ./troubleshoot-wizard
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  validate   ┌────────────────┐  start   ┌──────────────────┐
//! │ GraphSource  │────────────▶│ WizardCatalog  │─────────▶│ TraversalEngine  │
//! │ (JSON files) │             │ (graphs)       │          │ (one session)    │
//! └──────────────┘             └────────────────┘          └────────┬─────────┘
//!                                                                   │ terminal
//!                                                                   ▼
//!                          ┌────────────────┐   insert   ┌──────────────────┐
//!                SQLite ◀──│ DiagnosisStore │◀───────────│ SessionRecorder  │
//!                          └────────────────┘            └──────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod history;
pub mod recorder;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod test_utils;
