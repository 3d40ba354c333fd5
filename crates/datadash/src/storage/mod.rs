//! File-storage collaborator holding raw uploads.

pub mod mock;
pub mod object_store;

pub use mock::MockObjectStore;
pub use object_store::{ObjectStore, ProgressCallback, UploadedObject};
