//! Shared test doubles for the datadash integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use datadash::api::{
    ExtractedData, ExtractionResponse, LoginResponse, PresentationRequest, PresentationResponse,
    QaRequest, QaResponse,
};
use datadash::storage::{ObjectStore, ProgressCallback, UploadedObject};
use datadash::{
    ApiError, BackendClient, DataRow, FileRecord, FileStatus, JobRecord, JobStatus, StorageError,
};

type ApiResult<T> = Result<T, ApiError>;

/// Builds a job record with fixed ids instead of generated ones.
pub fn job(job_id: &str, file_id: &str, status: JobStatus, progress: u8, message: &str) -> JobRecord {
    let mut record = JobRecord::with_status(file_id, status, progress, message);
    record.id = job_id.to_string();
    record
}

/// Builds a file record that already went through upload and extraction
/// hand-off.
pub fn processing_file(file_id: &str, name: &str, job_id: &str) -> FileRecord {
    let mut record = FileRecord::new(name, 1024);
    record.id = file_id.to_string();
    record.status = FileStatus::Processing;
    record.upload_progress = 100;
    record.storage_key = format!("mock/{}", name);
    record.job_id = Some(job_id.to_string());
    record
}

/// Backend whose `get_job_status` answers come from a prepared script.
///
/// Every check pops the next scripted result; an exhausted script answers
/// `JobNotFound`. The other endpoints are not scripted and simply fail.
pub struct ScriptedBackend {
    statuses: Mutex<VecDeque<ApiResult<JobRecord>>>,
    status_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        ScriptedBackend {
            statuses: Mutex::new(VecDeque::new()),
            status_calls: AtomicUsize::new(0),
        }
    }

    pub fn push_status(&self, result: ApiResult<JobRecord>) {
        self.statuses.lock().unwrap().push_back(result);
    }

    /// How many times `get_job_status` was called.
    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    /// Scripted answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.statuses.lock().unwrap().len()
    }
}

#[async_trait]
impl BackendClient for ScriptedBackend {
    async fn trigger_extraction(
        &self,
        _file_id: &str,
        _storage_key: &str,
    ) -> ApiResult<ExtractionResponse> {
        Err(ApiError::BackendUnavailable)
    }

    async fn get_job_status(&self, job_id: &str) -> ApiResult<JobRecord> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        match self.statuses.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Err(ApiError::JobNotFound {
                job_id: job_id.to_string(),
            }),
        }
    }

    async fn get_data(&self, file_id: &str) -> ApiResult<ExtractedData> {
        Err(ApiError::DataNotFound {
            file_id: file_id.to_string(),
        })
    }

    async fn update_data(&self, _file_id: &str, _modified_rows: &[DataRow]) -> ApiResult<()> {
        Ok(())
    }

    async fn ask_question(&self, _request: &QaRequest) -> ApiResult<QaResponse> {
        Err(ApiError::BackendUnavailable)
    }

    async fn generate_presentation(
        &self,
        _request: &PresentationRequest,
    ) -> ApiResult<PresentationResponse> {
        Err(ApiError::BackendUnavailable)
    }

    async fn login(&self, _email: &str, _password: &str) -> ApiResult<LoginResponse> {
        Err(ApiError::InvalidCredentials)
    }
}

/// Object store whose uploads and deletes always fail.
pub struct FailingObjectStore;

#[async_trait]
impl ObjectStore for FailingObjectStore {
    async fn upload(
        &self,
        name: &str,
        _size: u64,
        _on_progress: ProgressCallback,
    ) -> Result<UploadedObject, StorageError> {
        Err(StorageError::UploadFailed {
            name: name.to_string(),
            reason: "simulated disk failure".to_string(),
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        Err(StorageError::DeleteFailed {
            key: key.to_string(),
            reason: "simulated disk failure".to_string(),
        })
    }
}
