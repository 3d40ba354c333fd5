//! Object store stand-in that keeps nothing and reports steady progress.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::storage::object_store::{ObjectStore, ProgressCallback, Result, UploadedObject};

const DEFAULT_TICK: Duration = Duration::from_millis(200);
const BASE_URL: &str = "https://mock-storage.example.com";

/// Pretends to upload by sleeping one tick per 20% of progress.
pub struct MockObjectStore {
    tick: Duration,
}

impl MockObjectStore {
    pub fn new() -> Self {
        MockObjectStore { tick: DEFAULT_TICK }
    }

    /// Overrides the per-step delay. Use `Duration::ZERO` in tests.
    pub fn with_tick(tick: Duration) -> Self {
        MockObjectStore { tick }
    }
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn upload(
        &self,
        name: &str,
        size: u64,
        on_progress: ProgressCallback,
    ) -> Result<UploadedObject> {
        log::debug!("Uploading {} ({} bytes) to the mock store", name, size);

        for step in 1..=5u8 {
            tokio::time::sleep(self.tick).await;
            on_progress(step * 20);
        }

        let key = format!("mock/{}", name);
        Ok(UploadedObject {
            url: format!("{}/{}", BASE_URL, key),
            key,
        })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(StorageError::DeleteFailed {
                key: key.to_string(),
                reason: "empty object key".to_string(),
            });
        }

        tokio::time::sleep(self.tick).await;
        log::debug!("Deleted mock object {}", key);
        Ok(())
    }
}
