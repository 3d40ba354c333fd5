//! In-process backend used for demos and tests.
//!
//! Behaves like the real service at a small scale: extraction jobs advance
//! by a fixed step on every status check, completed jobs publish a themed
//! table, and each call sleeps for a latency that roughly matches the
//! deployed service. Construct with [`MockBackend::without_latency`] in
//! tests to skip the sleeps.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::api::client::{BackendClient, Result};
use crate::api::mock_data;
use crate::api::types::{
    ExtractedData, ExtractionResponse, LoginResponse, PresentationRequest, PresentationResponse,
    QaRequest, QaResponse, User,
};
use crate::auth::token::{encode_token, TokenClaims};
use crate::data::table::DataRow;
use crate::error::ApiError;
use crate::jobs::record::{JobRecord, JobStatus};

const TRIGGER_DELAY_MS: u64 = 500;
const STATUS_DELAY_MS: u64 = 300;
const DATA_DELAY_MS: u64 = 500;
const UPDATE_DELAY_MS: u64 = 800;
const QA_DELAY_MS: u64 = 1200;
const PRESENTATION_DELAY_MS: u64 = 1500;
const LOGIN_DELAY_MS: u64 = 800;

/// Progress gained on each status check.
const PROGRESS_STEP: u8 = 20;

#[derive(Default)]
struct MockState {
    jobs: HashMap<String, JobRecord>,
    tables: HashMap<String, ExtractedData>,
    /// Display name per file, taken from the storage key. Drives the table
    /// theme once the job completes.
    names: HashMap<String, String>,
}

/// Simulated backend holding jobs and extracted tables in memory.
pub struct MockBackend {
    state: Mutex<MockState>,
    latency: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        MockBackend {
            state: Mutex::new(MockState::default()),
            latency: true,
        }
    }

    /// Same behavior with every artificial delay removed.
    pub fn without_latency() -> Self {
        MockBackend {
            state: Mutex::new(MockState::default()),
            latency: false,
        }
    }

    /// Installs a job as if an earlier session had triggered it.
    pub fn seed_job(&self, record: JobRecord) {
        let mut state = self.state();
        state
            .names
            .entry(record.file_id.clone())
            .or_insert_with(|| record.file_id.clone());
        state.jobs.insert(record.id.clone(), record);
    }

    /// Installs an extracted table for a file that already completed.
    pub fn seed_table(&self, file_id: impl Into<String>, data: ExtractedData) {
        self.state().tables.insert(file_id.into(), data);
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    async fn delay(&self, ms: u64) {
        if self.latency {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackendClient for MockBackend {
    async fn trigger_extraction(&self, file_id: &str, storage_key: &str) -> Result<ExtractionResponse> {
        self.delay(TRIGGER_DELAY_MS).await;

        let record = JobRecord::with_status(file_id, JobStatus::Processing, 0, "Starting extraction...");
        let job_id = record.id.clone();
        let name = storage_key.rsplit('/').next().unwrap_or(storage_key).to_string();

        let mut state = self.state();
        state.names.insert(file_id.to_string(), name);
        state.jobs.insert(job_id.clone(), record);

        log::info!("Started mock extraction job {} for file {}", job_id, file_id);
        Ok(ExtractionResponse { job_id })
    }

    async fn get_job_status(&self, job_id: &str) -> Result<JobRecord> {
        self.delay(STATUS_DELAY_MS).await;

        let mut guard = self.state();
        let state = &mut *guard;
        let record = state.jobs.get_mut(job_id).ok_or_else(|| ApiError::JobNotFound {
            job_id: job_id.to_string(),
        })?;

        if !record.is_terminal() {
            record.progress = record.progress.saturating_add(PROGRESS_STEP).min(100);
            record.updated_at = Utc::now();

            if record.progress >= 100 {
                record.status = JobStatus::Completed;
                record.message = Some("Extraction completed successfully".to_string());

                let name = state
                    .names
                    .get(&record.file_id)
                    .cloned()
                    .unwrap_or_else(|| record.file_id.clone());
                state
                    .tables
                    .insert(record.file_id.clone(), mock_data::table_for_file(&name));
            } else {
                record.status = JobStatus::Processing;
                record.message = Some(format!("Processing... {}%", record.progress));
            }
        }

        Ok(record.clone())
    }

    async fn get_data(&self, file_id: &str) -> Result<ExtractedData> {
        self.delay(DATA_DELAY_MS).await;

        self.state()
            .tables
            .get(file_id)
            .cloned()
            .ok_or_else(|| ApiError::DataNotFound {
                file_id: file_id.to_string(),
            })
    }

    async fn update_data(&self, file_id: &str, modified_rows: &[DataRow]) -> Result<()> {
        self.delay(UPDATE_DELAY_MS).await;

        let mut state = self.state();
        let table = state.tables.get_mut(file_id).ok_or_else(|| ApiError::DataNotFound {
            file_id: file_id.to_string(),
        })?;

        for updated in modified_rows {
            match table.rows.iter_mut().find(|row| row.id == updated.id) {
                Some(row) => *row = updated.clone(),
                None => log::debug!("Ignoring update for unknown row {} in file {}", updated.id, file_id),
            }
        }
        Ok(())
    }

    async fn ask_question(&self, request: &QaRequest) -> Result<QaResponse> {
        self.delay(QA_DELAY_MS).await;
        Ok(mock_data::qa_response(&request.question))
    }

    async fn generate_presentation(&self, request: &PresentationRequest) -> Result<PresentationResponse> {
        self.delay(PRESENTATION_DELAY_MS).await;
        Ok(PresentationResponse {
            download_url: format!(
                "https://mock-storage.example.com/presentations/{}.{}",
                request.job_id, request.format
            ),
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        self.delay(LOGIN_DELAY_MS).await;

        if email.is_empty() || password.is_empty() {
            return Err(ApiError::InvalidCredentials);
        }

        let claims = TokenClaims {
            sub: Some("1".to_string()),
            user_id: None,
            email: Some(email.to_string()),
            name: Some("Demo User".to_string()),
            iat: Some(Utc::now().timestamp()),
            exp: 9_999_999_999,
        };
        let token = encode_token(&claims)
            .map_err(|e| ApiError::Network(format!("failed to mint demo token: {}", e)))?;

        Ok(LoginResponse {
            token,
            user: User {
                id: "1".to_string(),
                email: email.to_string(),
                name: Some("Demo User".to_string()),
            },
        })
    }
}
