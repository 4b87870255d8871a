//! Storage backends.
//!
//! This module provides:
//! - [`SqliteStorage`]: `SQLite` key-value table holding the history as JSON
//! - [`MemoryStorage`]: in-process storage for hosts without a disk and tests
//!
//! Both implement [`RecordStorage`](crate::traits::RecordStorage).
//!
//! The `SQLite` implementation is split across submodules:
//! - `core`: Pool management, migrations, and helper functions
//! - `history`: Payload read/write operations
//! - `trait_impl`: `RecordStorage` implementation
//!
//! # Example
//!
//! ```ignore
//! use troubleshoot_wizard::history::{DiagnosisStore, MAX_RECORDS};
//! use troubleshoot_wizard::storage::SqliteStorage;
//!
//! let storage = SqliteStorage::new("./data/diagnoses.db", "byc-diagnosis-history").await?;
//! let store = DiagnosisStore::open(storage, MAX_RECORDS).await;
//! ```

mod core;
mod history;
mod memory;
mod trait_impl;

pub use self::core::{SqliteStorage, DEFAULT_HISTORY_KEY};
pub use memory::MemoryStorage;
