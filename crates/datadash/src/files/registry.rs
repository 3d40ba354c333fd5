//! In-memory registry of file records.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::files::record::{FileRecord, FileStatus};

/// Registry of upload records, keyed by file id.
///
/// Mutations from upload code and from the poller go through the methods
/// below; each one takes the write lock for its whole read-modify-write so
/// concurrent callers cannot interleave partial updates.
#[derive(Debug, Default)]
pub struct FileRegistry {
    files: RwLock<HashMap<String, FileRecord>>,
    selected: RwLock<Option<String>>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new upload and returns its record.
    pub fn add(&self, name: impl Into<String>, size: u64) -> FileRecord {
        let record = FileRecord::new(name, size);
        let mut files = match self.files.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        files.insert(record.id.clone(), record.clone());
        record
    }

    /// Inserts a pre-built record, used for seeding demo data.
    pub fn insert(&self, record: FileRecord) {
        let mut files = match self.files.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        files.insert(record.id.clone(), record);
    }

    /// Sets the status of a file. Unknown ids are a logged no-op; the poller
    /// may outlive a record the user already removed.
    pub fn update_status(&self, file_id: &str, status: FileStatus) -> bool {
        self.update(file_id, |file| file.status = status)
    }

    pub fn update_progress(&self, file_id: &str, progress: u8) -> bool {
        self.update(file_id, |file| {
            file.upload_progress = progress.min(100);
        })
    }

    /// Marks the upload finished with the key assigned by storage.
    pub fn mark_uploaded(&self, file_id: &str, storage_key: impl Into<String>) -> bool {
        let storage_key = storage_key.into();
        self.update(file_id, |file| {
            file.upload_progress = 100;
            file.storage_key = storage_key;
            file.status = FileStatus::Uploaded;
        })
    }

    /// Links the extraction job and moves the file to `processing`.
    pub fn attach_job(&self, file_id: &str, job_id: impl Into<String>) -> bool {
        let job_id = job_id.into();
        self.update(file_id, |file| {
            file.job_id = Some(job_id);
            file.status = FileStatus::Processing;
        })
    }

    pub fn set_error(&self, file_id: &str, message: impl Into<String>) -> bool {
        let message = message.into();
        self.update(file_id, |file| {
            file.status = FileStatus::Error;
            file.error = Some(message);
        })
    }

    pub fn remove(&self, file_id: &str) -> Option<FileRecord> {
        let mut files = match self.files.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        files.remove(file_id)
    }

    pub fn get(&self, file_id: &str) -> Option<FileRecord> {
        let files = match self.files.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        files.get(file_id).cloned()
    }

    /// All records, newest upload first.
    pub fn get_all(&self) -> Vec<FileRecord> {
        let files = match self.files.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut all: Vec<FileRecord> = files.values().cloned().collect();
        all.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        all
    }

    pub fn len(&self) -> usize {
        let files = match self.files.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Marks a file as selected in the UI.
    pub fn set_selected(&self, file_id: impl Into<String>) {
        let mut selected = match self.selected.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *selected = Some(file_id.into());
    }

    pub fn selected(&self) -> Option<String> {
        let selected = match self.selected.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        selected.clone()
    }

    fn update(&self, file_id: &str, mutate: impl FnOnce(&mut FileRecord)) -> bool {
        let mut files = match self.files.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match files.get_mut(file_id) {
            Some(file) => {
                mutate(file);
                true
            }
            None => {
                log::debug!("Ignoring update for unknown file {}", file_id);
                false
            }
        }
    }
}
