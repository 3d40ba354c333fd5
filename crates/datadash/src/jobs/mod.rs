//! Extraction job records, the tracker, and the poller.

pub mod poller;
pub mod record;
pub mod tracker;

pub use poller::{JobPoller, DEFAULT_POLL_INTERVAL};
pub use record::{JobRecord, JobStatus};
pub use tracker::JobTracker;
