//! Trait definitions for mockable dependencies.
//!
//! This module defines traits for:
//! - [`RecordStorage`]: Persistence of the diagnosis history
//! - [`TimeProvider`]: Time abstraction for testing
//!
//! # Mocking
//!
//! All traits are annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates mock implementations automatically for testing.
//!
//! # Example
//!
//! ```
//! use troubleshoot_wizard::traits::{TimeProvider, RealTimeProvider};
//!
//! let time_provider = RealTimeProvider;
//! let now = time_provider.now();
//! println!("Current time: {now}");
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StorageError;
use crate::history::DiagnosisRecord;

/// Durable home of the diagnosis history.
///
/// The whole list is read and written at once, newest first. Implementations
/// do not trim or reorder; [`DiagnosisStore`](crate::history::DiagnosisStore)
/// owns those rules.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Load the stored list.
    ///
    /// Returns `None` if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupt`] if the stored payload cannot be
    /// decoded, or another [`StorageError`] if the backend fails.
    async fn load(&self) -> Result<Option<Vec<DiagnosisRecord>>, StorageError>;

    /// Replace the stored list.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the list cannot be written.
    async fn save(&self, records: &[DiagnosisRecord]) -> Result<(), StorageError>;
}

/// Time provider trait for deterministic testing.
#[cfg_attr(test, mockall::automock)]
pub trait TimeProvider: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Real time provider using system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
