//! Uploaded file records and the upload pipeline.

pub mod record;
pub mod registry;
pub mod uploader;

pub use record::{FileRecord, FileStatus};
pub use registry::FileRegistry;
pub use uploader::FileUploader;
