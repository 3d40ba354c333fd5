//! Backend collaborator: the contract plus its bundled implementations.

pub mod client;
pub mod mock;
pub(crate) mod mock_data;
pub mod types;
pub mod unconfigured;

pub use client::BackendClient;
pub use mock::MockBackend;
pub use types::{
    ExtractedData, ExtractionResponse, LoginResponse, PresentationFormat, PresentationRequest,
    PresentationResponse, QaRequest, QaResponse, QaSource, User,
};
pub use unconfigured::UnconfiguredBackend;
