//! Bounded diagnosis history.

use tracing::{debug, info, warn};

use super::DiagnosisRecord;
use crate::error::StorageError;
use crate::traits::RecordStorage;

/// Default capacity of a [`DiagnosisStore`].
pub const MAX_RECORDS: usize = 50;

/// Newest-first list of past sessions, mirrored to a [`RecordStorage`].
///
/// Every mutation writes the full list through before returning. If the
/// write fails, the in-memory list is restored to what it was before the
/// call and the error is returned.
#[derive(Debug)]
pub struct DiagnosisStore<S: RecordStorage> {
    storage: S,
    records: Vec<DiagnosisRecord>,
    capacity: usize,
}

impl<S: RecordStorage> DiagnosisStore<S> {
    /// Rehydrate from `storage`.
    ///
    /// Missing, unreadable, or corrupt persisted data is treated as an empty
    /// history. A persisted list longer than `capacity` is cut to its newest
    /// `capacity` records. A `capacity` of zero is raised to one.
    pub async fn open(storage: S, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut records = match storage.load().await {
            Ok(Some(records)) => records,
            Ok(None) => {
                debug!("No stored diagnosis history");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load diagnosis history, starting empty");
                Vec::new()
            }
        };
        if records.len() > capacity {
            warn!(
                stored = records.len(),
                capacity, "Stored diagnosis history exceeds capacity, truncating"
            );
            records.truncate(capacity);
        }
        info!(records = records.len(), capacity, "Diagnosis history loaded");
        Self {
            storage,
            records,
            capacity,
        }
    }

    /// Add a record at the front, evicting the oldest beyond capacity.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the list cannot be saved. The history is
    /// left unchanged.
    pub async fn insert(&mut self, record: DiagnosisRecord) -> Result<(), StorageError> {
        let id = record.id.clone();
        let previous = self.records.clone();
        self.records.insert(0, record);
        self.records.truncate(self.capacity);
        self.persist(previous).await?;
        debug!(record_id = %id, records = self.records.len(), "Diagnosis recorded");
        Ok(())
    }

    /// Delete the record with `id`. Absent ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the list cannot be saved. The history is
    /// left unchanged.
    pub async fn remove(&mut self, id: &str) -> Result<(), StorageError> {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            return Ok(());
        };
        let previous = self.records.clone();
        self.records.remove(index);
        self.persist(previous).await?;
        debug!(record_id = %id, "Diagnosis removed");
        Ok(())
    }

    /// Delete every record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the empty list cannot be saved. The
    /// history is left unchanged.
    pub async fn clear(&mut self) -> Result<(), StorageError> {
        let previous = std::mem::take(&mut self.records);
        self.persist(previous).await?;
        debug!("Diagnosis history cleared");
        Ok(())
    }

    /// All records, newest first.
    #[must_use]
    pub fn list(&self) -> &[DiagnosisRecord] {
        &self.records
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DiagnosisRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no records are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of records kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    async fn persist(&mut self, previous: Vec<DiagnosisRecord>) -> Result<(), StorageError> {
        if let Err(e) = self.storage.save(&self.records).await {
            warn!(error = %e, "Failed to save diagnosis history, rolling back");
            self.records = previous;
            return Err(e);
        }
        Ok(())
    }
}
