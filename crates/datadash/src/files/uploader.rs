//! Upload pipeline: store the bytes, then hand the file to extraction.

use std::sync::Arc;

use crate::api::client::BackendClient;
use crate::error::Result;
use crate::files::record::{FileRecord, FileStatus};
use crate::files::registry::FileRegistry;
use crate::jobs::record::{JobRecord, JobStatus};
use crate::jobs::tracker::JobTracker;
use crate::storage::object_store::ObjectStore;

/// Moves files into the object store and starts extraction for each one.
///
/// Every step is mirrored into the [`FileRegistry`] so the file list shows
/// live progress, and failures land on the record instead of vanishing.
pub struct FileUploader {
    files: Arc<FileRegistry>,
    jobs: Arc<JobTracker>,
    storage: Arc<dyn ObjectStore>,
    api: Arc<dyn BackendClient>,
}

impl FileUploader {
    pub fn new(
        files: Arc<FileRegistry>,
        jobs: Arc<JobTracker>,
        storage: Arc<dyn ObjectStore>,
        api: Arc<dyn BackendClient>,
    ) -> Self {
        FileUploader { files, jobs, storage, api }
    }

    /// Registers a file, uploads it, and triggers extraction.
    ///
    /// On success the returned record carries the storage key and the id of
    /// the extraction job, which is already in the tracker and ready to be
    /// polled. On failure the record stays in the registry with status
    /// [`FileStatus::Error`] and the cause on its `error` field.
    pub async fn upload(&self, name: &str, size: u64) -> Result<FileRecord> {
        let mut record = self.files.add(name, size);
        log::info!("Uploading {} ({} bytes) as file {}", name, size, record.id);

        let progress_files = Arc::clone(&self.files);
        let progress_id = record.id.clone();
        let upload = self.storage.upload(
            name,
            size,
            Box::new(move |percent| {
                progress_files.update_progress(&progress_id, percent);
            }),
        );

        let object = match upload.await {
            Ok(object) => object,
            Err(e) => {
                self.files.set_error(&record.id, e.to_string());
                return Err(e.into());
            }
        };
        self.files.mark_uploaded(&record.id, object.key.as_str());

        let response = match self.api.trigger_extraction(&record.id, &object.key).await {
            Ok(response) => response,
            Err(e) => {
                self.files.set_error(&record.id, e.to_string());
                return Err(e.into());
            }
        };

        let mut job = JobRecord::with_status(&record.id, JobStatus::Processing, 0, "Starting extraction...");
        job.id = response.job_id.clone();
        self.jobs.upsert(job);
        self.files.attach_job(&record.id, response.job_id.as_str());

        record.upload_progress = 100;
        record.storage_key = object.key;
        record.status = FileStatus::Processing;
        record.job_id = Some(response.job_id);
        Ok(record)
    }

    /// Removes a file and its stored object. The record is dropped even when
    /// the storage delete fails, so the list never shows a ghost entry.
    pub async fn remove(&self, file_id: &str) -> Option<FileRecord> {
        let record = self.files.get(file_id)?;

        if !record.storage_key.is_empty() {
            if let Err(e) = self.storage.delete(&record.storage_key).await {
                log::warn!("Failed to delete stored object for file {}: {}", file_id, e);
            }
        }

        self.files.remove(file_id)
    }
}
