//! Diagnosis history payload operations.

#![allow(clippy::missing_errors_doc)]

use chrono::Utc;
use sqlx::Row;

use super::core::SqliteStorage;
use crate::error::StorageError;
use crate::history::DiagnosisRecord;

impl SqliteStorage {
    /// Read the raw JSON payload stored under this instance's key.
    pub async fn load_payload(&self) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT payload FROM diagnosis_history WHERE key = ?")
            .bind(&self.key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::query_error("SELECT diagnosis_history", format!("{e}")))?;

        Ok(row.map(|row| row.get("payload")))
    }

    /// Write a raw JSON payload under this instance's key.
    pub async fn save_payload(&self, payload: &str) -> Result<(), StorageError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r"
            INSERT INTO diagnosis_history (key, payload, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            ",
        )
        .bind(&self.key)
        .bind(payload)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::query_error("UPSERT diagnosis_history", format!("{e}")))?;

        Ok(())
    }

    /// Decode the stored list.
    pub async fn load_records(&self) -> Result<Option<Vec<DiagnosisRecord>>, StorageError> {
        let Some(payload) = self.load_payload().await? else {
            return Ok(None);
        };
        serde_json::from_str(&payload)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                message: format!("history under '{}': {e}", self.key),
            })
    }

    /// Encode and store the list.
    pub async fn save_records(&self, records: &[DiagnosisRecord]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(records).map_err(|e| StorageError::Serialization {
            message: format!("{e}"),
        })?;
        self.save_payload(&payload).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::super::core::tests::{row_count, test_storage};
    use super::*;
    use crate::test_utils::test_record;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_load_missing_is_none() {
        let storage = test_storage().await;
        assert!(storage.load_payload().await.unwrap().is_none());
        assert!(storage.load_records().await.unwrap().is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_save_and_load_records() {
        let storage = test_storage().await;
        let records = vec![test_record("dx-b"), test_record("dx-a")];
        storage.save_records(&records).await.unwrap();

        let loaded = storage.load_records().await.unwrap().unwrap();
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    #[serial]
    async fn test_save_overwrites() {
        let storage = test_storage().await;
        storage.save_records(&[test_record("dx-a")]).await.unwrap();
        storage.save_records(&[]).await.unwrap();

        assert_eq!(storage.load_records().await.unwrap(), Some(Vec::new()));
        assert_eq!(row_count(&storage).await, 1);
    }

    #[tokio::test]
    #[serial]
    async fn test_wrong_shape_is_corrupt() {
        let storage = test_storage().await;
        storage.save_payload(r#"{"not":"a list"}"#).await.unwrap();

        let err = storage.load_records().await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[tokio::test]
    #[serial]
    async fn test_invalid_json_rejected_by_schema() {
        let storage = test_storage().await;
        let err = storage.save_payload("not json").await.unwrap_err();
        assert!(matches!(err, StorageError::QueryFailed { .. }));
    }

    #[tokio::test]
    #[serial]
    async fn test_keys_are_independent() {
        let storage = test_storage().await;
        let other = storage.with_key("other-history");
        storage.save_records(&[test_record("dx-a")]).await.unwrap();

        assert!(other.load_records().await.unwrap().is_none());
        other.save_records(&[]).await.unwrap();
        assert_eq!(row_count(&storage).await, 2);
        assert_eq!(storage.load_records().await.unwrap().unwrap().len(), 1);
    }
}
