//! Aggregate state owning the registries, stores, and collaborators.
//!
//! Nothing here is a global: the embedding application constructs one
//! [`DashboardState`] and passes it around. Polling tasks spawn onto the
//! current Tokio runtime, so the async entry points and
//! [`DashboardState::resume_polling`] must run inside one.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::Utc;

use crate::api::client::BackendClient;
use crate::api::mock::MockBackend;
use crate::api::mock_data;
use crate::api::unconfigured::UnconfiguredBackend;
use crate::auth::session::AuthSession;
use crate::auth::store::TokenStore;
use crate::config::ClientConfig;
use crate::data::store::TableStore;
use crate::error::Result;
use crate::files::record::{FileRecord, FileStatus};
use crate::files::registry::FileRegistry;
use crate::files::uploader::FileUploader;
use crate::jobs::poller::{JobPoller, DEFAULT_POLL_INTERVAL};
use crate::jobs::record::{JobRecord, JobStatus};
use crate::jobs::tracker::JobTracker;
use crate::storage::mock::MockObjectStore;
use crate::storage::object_store::ObjectStore;

/// Everything the dashboard client keeps between calls.
pub struct DashboardState {
    pub files: Arc<FileRegistry>,
    pub jobs: Arc<JobTracker>,
    pub tables: Arc<TableStore>,
    pub session: Arc<AuthSession>,
    pub uploader: FileUploader,
    pub poller: JobPoller,
    selected_job: RwLock<Option<String>>,
}

impl DashboardState {
    /// Builds the state from a config. With a `backend_url` set the backend
    /// is the unconfigured stand-in, since no remote transport ships in this
    /// crate; without one it is the in-process mock.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let api: Arc<dyn BackendClient> = match &config.backend_url {
            Some(url) => {
                log::warn!("No transport for remote backend {}; every call will fail", url);
                Arc::new(UnconfiguredBackend::new())
            }
            None if config.simulate_latency => Arc::new(MockBackend::new()),
            None => Arc::new(MockBackend::without_latency()),
        };

        let storage = Arc::new(MockObjectStore::with_tick(config.upload_tick()));
        let token_store = match &config.token_path {
            Some(path) => TokenStore::at(path.clone()),
            None => TokenStore::new()?,
        };

        Ok(Self::with_collaborators(
            api,
            storage,
            token_store,
            config.poll_interval(),
        ))
    }

    /// Builds the state from explicit collaborators.
    pub fn with_collaborators(
        api: Arc<dyn BackendClient>,
        storage: Arc<dyn ObjectStore>,
        token_store: TokenStore,
        poll_interval: Duration,
    ) -> Self {
        let files = Arc::new(FileRegistry::new());
        let jobs = Arc::new(JobTracker::new());
        let tables = Arc::new(TableStore::new(Arc::clone(&api)));
        let session = Arc::new(AuthSession::new(Arc::clone(&api), token_store));
        let uploader = FileUploader::new(
            Arc::clone(&files),
            Arc::clone(&jobs),
            storage,
            Arc::clone(&api),
        );
        let poller = JobPoller::with_interval(
            Arc::clone(&jobs),
            Arc::clone(&files),
            api,
            poll_interval,
        );

        DashboardState {
            files,
            jobs,
            tables,
            session,
            uploader,
            poller,
            selected_job: RwLock::new(None),
        }
    }

    /// Mock-backed state preloaded with the demo data set: four extracted
    /// files with themed tables and one extraction still running.
    pub fn demo() -> Result<Self> {
        let backend = Arc::new(MockBackend::new());
        let state = Self::with_collaborators(
            Arc::clone(&backend) as Arc<dyn BackendClient>,
            Arc::new(MockObjectStore::new()),
            TokenStore::new()?,
            DEFAULT_POLL_INTERVAL,
        );
        state.seed_demo(&backend);
        Ok(state)
    }

    fn seed_demo(&self, backend: &MockBackend) {
        let now = Utc::now();

        let completed: [(&str, &str, u64, i64); 4] = [
            ("file-1", "sales-data-q1.csv", 245_600, 1),
            ("file-2", "customer-records.xlsx", 512_000, 2),
            ("file-3", "inventory-2024.csv", 189_440, 3),
            ("file-5", "financial-report.csv", 678_912, 4),
        ];
        for (id, name, size, hours_ago) in completed {
            let mut record = FileRecord::new(name, size);
            record.id = id.to_string();
            record.status = FileStatus::Completed;
            record.upload_progress = 100;
            record.storage_key = format!("mock/{}", name);
            record.uploaded_at = now - chrono::Duration::hours(hours_ago);
            self.files.insert(record);
            backend.seed_table(id, mock_data::table_for_file(name));
        }

        let mut record = FileRecord::new("product-analysis.xlsx", 421_888);
        record.id = "file-4".to_string();
        record.status = FileStatus::Processing;
        record.upload_progress = 100;
        record.storage_key = "mock/product-analysis.xlsx".to_string();
        record.job_id = Some("job-4".to_string());
        record.uploaded_at = now - chrono::Duration::minutes(5);
        self.files.insert(record);

        let mut job = JobRecord::with_status(
            "file-4",
            JobStatus::Processing,
            65,
            "Extracting data from file...",
        );
        job.id = "job-4".to_string();
        job.created_at = now - chrono::Duration::seconds(300);
        job.updated_at = now - chrono::Duration::seconds(60);
        backend.seed_job(job.clone());
        self.jobs.upsert(job);

        log::info!("Seeded demo data: {} files, {} jobs", self.files.len(), self.jobs.len());
    }

    /// Uploads a file and starts polling its extraction job.
    pub async fn upload_file(&self, name: &str, size: u64) -> Result<FileRecord> {
        let record = self.uploader.upload(name, size).await?;
        if let Some(job_id) = &record.job_id {
            self.poller.start_polling(job_id);
        }
        Ok(record)
    }

    /// Removes a file, its cached table, and any poll for its job.
    pub async fn remove_file(&self, file_id: &str) -> Option<FileRecord> {
        if let Some(record) = self.files.get(file_id) {
            if let Some(job_id) = &record.job_id {
                self.poller.stop_polling(job_id);
            }
        }
        self.tables.clear(file_id);
        self.uploader.remove(file_id).await
    }

    /// Starts polling every tracked job that has not finished yet. Returns
    /// how many polls were started.
    pub fn resume_polling(&self) -> usize {
        let mut started = 0;
        for job in self.jobs.get_all() {
            if !job.is_terminal() && self.poller.start_polling(&job.id) {
                started += 1;
            }
        }
        started
    }

    /// Cancels all polling. Call before dropping the state.
    pub fn shutdown(&self) -> usize {
        let stopped = self.poller.stop_all();
        if stopped > 0 {
            log::info!("Shut down with {} poll(s) still active", stopped);
        }
        stopped
    }

    pub fn select_job(&self, job_id: impl Into<String>) {
        *self.write_selected() = Some(job_id.into());
    }

    /// The currently selected job, resolved against the tracker.
    pub fn selected_job(&self) -> Option<JobRecord> {
        let id = self.read_selected().clone()?;
        self.jobs.get(&id)
    }

    pub fn clear_selected_job(&self) {
        *self.write_selected() = None;
    }

    fn read_selected(&self) -> RwLockReadGuard<'_, Option<String>> {
        match self.selected_job.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_selected(&self) -> RwLockWriteGuard<'_, Option<String>> {
        match self.selected_job.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
