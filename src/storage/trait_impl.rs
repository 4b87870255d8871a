//! `RecordStorage` implementation for `SqliteStorage`.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::history::DiagnosisRecord;
use crate::traits::RecordStorage;

use super::core::SqliteStorage;

#[async_trait]
impl RecordStorage for SqliteStorage {
    async fn load(&self) -> Result<Option<Vec<DiagnosisRecord>>, StorageError> {
        self.load_records().await
    }

    async fn save(&self, records: &[DiagnosisRecord]) -> Result<(), StorageError> {
        self.save_records(records).await
    }
}
