//! Contract for the object store that holds raw uploads.

use async_trait::async_trait;

use crate::error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Called with the upload percentage (0-100) as bytes move.
pub type ProgressCallback = Box<dyn Fn(u8) + Send + Sync>;

/// Location of a stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedObject {
    /// Key under which the object was stored, kept on the file record for
    /// later extraction and deletion.
    pub key: String,
    pub url: String,
}

/// Store for uploaded files, ahead of extraction.
///
/// Implemented by [`MockObjectStore`](crate::storage::MockObjectStore); a
/// deployment would add an implementation backed by its blob store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads a file, reporting progress along the way.
    async fn upload(&self, name: &str, size: u64, on_progress: ProgressCallback)
        -> Result<UploadedObject>;

    /// Removes a stored object.
    async fn delete(&self, key: &str) -> Result<()>;
}
