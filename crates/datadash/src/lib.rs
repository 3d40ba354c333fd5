pub mod api;
pub mod auth;
pub mod config;
pub mod data;
pub mod error;
pub mod files;
pub mod jobs;
pub mod logging;
pub mod state;
pub mod storage;

pub use api::{BackendClient, MockBackend, UnconfiguredBackend};
pub use auth::{AuthSession, TokenStore};
pub use config::ClientConfig;
pub use data::{DataRow, TableData, TableStore};
pub use error::{ApiError, AuthError, ConfigError, DatadashError, Result, StorageError};
pub use files::{FileRecord, FileRegistry, FileStatus, FileUploader};
pub use jobs::{JobPoller, JobRecord, JobStatus, JobTracker};
pub use logging::init_logging;
pub use state::DashboardState;
pub use storage::{MockObjectStore, ObjectStore};
