//! In-process record storage.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::history::DiagnosisRecord;
use crate::traits::RecordStorage;

#[derive(Debug, Default)]
struct Inner {
    records: Mutex<Option<Vec<DiagnosisRecord>>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

/// [`RecordStorage`] kept in memory.
///
/// Clones share the same contents. Loads and saves can be made to fail,
/// which is how the history store's rollback path is exercised.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Inner>,
}

impl MemoryStorage {
    /// Empty storage; `load` returns `None` until the first save.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `records`.
    #[must_use]
    pub fn with_records(records: Vec<DiagnosisRecord>) -> Self {
        Self {
            inner: Arc::new(Inner {
                records: Mutex::new(Some(records)),
                ..Inner::default()
            }),
        }
    }

    /// Make subsequent loads fail (or succeed again).
    pub fn fail_loads(&self, fail: bool) {
        self.inner.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.inner.saves.load(Ordering::SeqCst)
    }

    /// Current contents.
    pub async fn snapshot(&self) -> Option<Vec<DiagnosisRecord>> {
        self.inner.records.lock().await.clone()
    }
}

#[async_trait]
impl RecordStorage for MemoryStorage {
    async fn load(&self) -> Result<Option<Vec<DiagnosisRecord>>, StorageError> {
        if self.inner.fail_loads.load(Ordering::SeqCst) {
            return Err(StorageError::Internal {
                message: "memory storage load failure".to_string(),
            });
        }
        Ok(self.inner.records.lock().await.clone())
    }

    async fn save(&self, records: &[DiagnosisRecord]) -> Result<(), StorageError> {
        if self.inner.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Internal {
                message: "memory storage save failure".to_string(),
            });
        }
        *self.inner.records.lock().await = Some(records.to_vec());
        self.inner.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
