//! Upload-to-extraction flows through the aggregate dashboard state.

mod common;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use common::{job, processing_file, FailingObjectStore};
use datadash::api::{MockBackend, PresentationFormat, PresentationRequest, QaRequest};
use datadash::auth::TokenStore;
use datadash::storage::MockObjectStore;
use datadash::{BackendClient, DashboardState, DatadashError, FileStatus, JobStatus};
use tempfile::tempdir;

fn mock_state(backend: Arc<MockBackend>, dir: &Path, interval_ms: u64) -> DashboardState {
    DashboardState::with_collaborators(
        backend as Arc<dyn BackendClient>,
        Arc::new(MockObjectStore::with_tick(Duration::ZERO)),
        TokenStore::at(dir.join("auth_token")),
        Duration::from_millis(interval_ms),
    )
}

#[tokio::test]
async fn test_upload_extract_edit_save_pipeline() {
    let dir = tempdir().unwrap();
    let backend = Arc::new(MockBackend::without_latency());
    let state = mock_state(Arc::clone(&backend), dir.path(), 10);

    let user = state.session.login("analyst@example.com", "secret").await.unwrap();
    assert_eq!(user.id, "1");

    let record = state.upload_file("sales-2024.csv", 8_192).await.unwrap();
    assert_eq!(record.status, FileStatus::Processing);
    assert_eq!(record.storage_key, "mock/sales-2024.csv");
    let job_id = record.job_id.clone().unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(state.jobs.get(&job_id).unwrap().status, JobStatus::Completed);
    assert_eq!(state.files.get(&record.id).unwrap().status, FileStatus::Completed);
    assert!(!state.poller.is_polling(&job_id));

    // The storage key named a sales file, so the extracted table is themed.
    assert!(state.tables.load(&record.id).await.unwrap());
    let table = state.tables.get(&record.id).unwrap();
    assert_eq!(
        table.columns,
        vec!["id", "product", "quantity", "price", "revenue", "date", "region"]
    );

    let first_row = table.rows[0].id.clone();
    let mut updates = BTreeMap::new();
    updates.insert("quantity".to_string(), serde_json::Value::from(999));
    assert!(state.tables.update_row(&record.id, &first_row, &updates));
    assert_eq!(state.tables.save(&record.id).await.unwrap(), 1);

    let remote = backend.get_data(&record.id).await.unwrap();
    assert_eq!(remote.rows[0].get("quantity").unwrap(), 999);

    state.shutdown();
}

#[tokio::test]
async fn test_upload_failure_is_recorded_not_swallowed() {
    let dir = tempdir().unwrap();
    let state = DashboardState::with_collaborators(
        Arc::new(MockBackend::without_latency()) as Arc<dyn BackendClient>,
        Arc::new(FailingObjectStore),
        TokenStore::at(dir.path().join("auth_token")),
        Duration::from_millis(10),
    );

    let err = state.upload_file("report.csv", 2_048).await.unwrap_err();
    assert!(matches!(err, DatadashError::Storage(_)));

    let records = state.files.get_all();
    assert_eq!(records.len(), 1, "the failed upload must stay visible");
    assert_eq!(records[0].status, FileStatus::Error);
    assert!(records[0].error.as_deref().unwrap().contains("simulated disk failure"));
    assert!(state.jobs.is_empty());
    assert_eq!(state.poller.active_count(), 0);
}

#[tokio::test]
async fn test_resume_polling_after_restart() {
    let dir = tempdir().unwrap();
    let backend = Arc::new(MockBackend::without_latency());

    // A previous session left an extraction at 65%.
    let seeded = job(
        "job-4",
        "file-4",
        JobStatus::Processing,
        65,
        "Extracting data from file...",
    );
    backend.seed_job(seeded.clone());

    let state = mock_state(Arc::clone(&backend), dir.path(), 10);
    state.files.insert(processing_file("file-4", "product-analysis.xlsx", "job-4"));
    state.jobs.upsert(seeded);

    assert_eq!(state.resume_polling(), 1);
    tokio::time::sleep(Duration::from_millis(200)).await;

    let finished = state.jobs.get("job-4").unwrap();
    assert_eq!(finished.status, JobStatus::Completed);
    assert_eq!(finished.progress, 100);
    assert_eq!(state.files.get("file-4").unwrap().status, FileStatus::Completed);

    assert!(state.tables.load("file-4").await.unwrap());
    assert!(!state.tables.get("file-4").unwrap().rows.is_empty());
}

#[tokio::test]
async fn test_remove_file_mid_extraction() {
    let dir = tempdir().unwrap();
    let backend = Arc::new(MockBackend::without_latency());
    // Interval long enough that the job cannot finish during the test.
    let state = mock_state(Arc::clone(&backend), dir.path(), 10_000);

    let record = state.upload_file("survey.csv", 512).await.unwrap();
    let job_id = record.job_id.clone().unwrap();
    assert!(state.poller.is_polling(&job_id));

    let removed = state.remove_file(&record.id).await.unwrap();
    assert_eq!(removed.id, record.id);
    assert!(!state.poller.is_polling(&job_id));
    assert!(state.files.get(&record.id).is_none());
}

#[tokio::test]
async fn test_question_answering_and_presentation_export() {
    let backend = MockBackend::without_latency();

    let response = backend
        .ask_question(&QaRequest::new("Which region sold the most?"))
        .await
        .unwrap();
    assert!(response.answer.contains("Which region sold the most?"));
    assert_eq!(response.sources.len(), 2);
    assert!(response.sources[0].relevance > response.sources[1].relevance);

    let request = PresentationRequest {
        job_id: "job-1".to_string(),
        format: PresentationFormat::Pptx,
        template: None,
    };
    let presentation = backend.generate_presentation(&request).await.unwrap();
    assert!(presentation.download_url.ends_with("job-1.pptx"));
}
