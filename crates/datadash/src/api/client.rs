//! Backend collaborator contract.

use async_trait::async_trait;

use crate::api::types::{
    ExtractedData, ExtractionResponse, LoginResponse, PresentationRequest, PresentationResponse,
    QaRequest, QaResponse,
};
use crate::data::table::DataRow;
use crate::error::ApiError;
use crate::jobs::record::JobRecord;

pub type Result<T> = std::result::Result<T, ApiError>;

/// The extraction/QA/auth service boundary the client depends on.
///
/// Implementations:
/// - `MockBackend`: in-process fabrication with artificial latency
/// - `UnconfiguredBackend`: fails every call with `BackendUnavailable`
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Kicks off extraction for an uploaded file.
    async fn trigger_extraction(
        &self,
        file_id: &str,
        storage_key: &str,
    ) -> Result<ExtractionResponse>;

    /// Current state of a job. Unknown ids fail with `JobNotFound`.
    async fn get_job_status(&self, job_id: &str) -> Result<JobRecord>;

    /// Extracted table for a file. Fails with `DataNotFound` until
    /// extraction has produced rows.
    async fn get_data(&self, file_id: &str) -> Result<ExtractedData>;

    /// Writes edited rows back; the backend replaces matching rows by id.
    async fn update_data(&self, file_id: &str, modified_rows: &[DataRow]) -> Result<()>;

    /// Natural-language question over extracted data.
    async fn ask_question(&self, request: &QaRequest) -> Result<QaResponse>;

    /// Renders a presentation export for a finished job.
    async fn generate_presentation(
        &self,
        request: &PresentationRequest,
    ) -> Result<PresentationResponse>;

    /// Exchanges credentials for a token and user profile.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse>;
}
