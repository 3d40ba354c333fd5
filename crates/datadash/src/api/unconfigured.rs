//! Backend stand-in used when a backend URL is configured but no transport
//! implementation exists. Every call fails with `BackendUnavailable`.

use async_trait::async_trait;

use crate::api::client::{BackendClient, Result};
use crate::api::types::{
    ExtractedData, ExtractionResponse, LoginResponse, PresentationRequest, PresentationResponse,
    QaRequest, QaResponse,
};
use crate::data::table::DataRow;
use crate::error::ApiError;
use crate::jobs::record::JobRecord;

#[derive(Debug, Default)]
pub struct UnconfiguredBackend;

impl UnconfiguredBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BackendClient for UnconfiguredBackend {
    async fn trigger_extraction(
        &self,
        _file_id: &str,
        _storage_key: &str,
    ) -> Result<ExtractionResponse> {
        Err(ApiError::BackendUnavailable)
    }

    async fn get_job_status(&self, _job_id: &str) -> Result<JobRecord> {
        Err(ApiError::BackendUnavailable)
    }

    async fn get_data(&self, _file_id: &str) -> Result<ExtractedData> {
        Err(ApiError::BackendUnavailable)
    }

    async fn update_data(&self, _file_id: &str, _modified_rows: &[DataRow]) -> Result<()> {
        Err(ApiError::BackendUnavailable)
    }

    async fn ask_question(&self, _request: &QaRequest) -> Result<QaResponse> {
        Err(ApiError::BackendUnavailable)
    }

    async fn generate_presentation(
        &self,
        _request: &PresentationRequest,
    ) -> Result<PresentationResponse> {
        Err(ApiError::BackendUnavailable)
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse> {
        Err(ApiError::BackendUnavailable)
    }
}
