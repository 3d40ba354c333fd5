//! Recurring status checks for in-flight extraction jobs.
//!
//! One task runs per polled job. Each tick fetches the job from the backend,
//! stores the result in the [`JobTracker`], and on a terminal status updates
//! the owning file record and retires itself. Check failures are logged and
//! the schedule keeps running, so a flaky backend only delays the result.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::client::BackendClient;
use crate::files::record::FileStatus;
use crate::files::registry::FileRegistry;
use crate::jobs::record::JobStatus;
use crate::jobs::tracker::JobTracker;

/// Matches the cadence of the deployed dashboard.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

struct PollHandle {
    shutdown: Arc<AtomicBool>,
    stop_tx: mpsc::Sender<()>,
    #[allow(dead_code)]
    task: JoinHandle<()>,
}

impl PollHandle {
    fn stop(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        let _ = self.stop_tx.try_send(());
    }
}

/// Drives polling for any number of jobs against the given registries.
pub struct JobPoller {
    jobs: Arc<JobTracker>,
    files: Arc<FileRegistry>,
    api: Arc<dyn BackendClient>,
    interval: Duration,
    active: Arc<Mutex<HashMap<String, PollHandle>>>,
}

impl JobPoller {
    pub fn new(jobs: Arc<JobTracker>, files: Arc<FileRegistry>, api: Arc<dyn BackendClient>) -> Self {
        Self::with_interval(jobs, files, api, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_interval(
        jobs: Arc<JobTracker>,
        files: Arc<FileRegistry>,
        api: Arc<dyn BackendClient>,
        interval: Duration,
    ) -> Self {
        JobPoller {
            jobs,
            files,
            api,
            interval,
            active: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Begins polling a job. Returns `false` when a poll for it is already
    /// running, leaving the existing schedule untouched.
    ///
    /// The first check happens immediately, not one interval later.
    pub fn start_polling(&self, job_id: &str) -> bool {
        let mut active = self.lock_active();
        if active.contains_key(job_id) {
            log::debug!("Already polling job {}", job_id);
            return false;
        }

        let shutdown = Arc::new(AtomicBool::new(false));
        let (stop_tx, stop_rx) = mpsc::channel(1);

        let poll = PollTask {
            job_id: job_id.to_string(),
            jobs: Arc::clone(&self.jobs),
            files: Arc::clone(&self.files),
            api: Arc::clone(&self.api),
            active: Arc::clone(&self.active),
            shutdown: Arc::clone(&shutdown),
            interval: self.interval,
        };
        // The map entry goes in while the lock is still held, so a task that
        // finishes instantly blocks on deregistering until the entry exists.
        let task = tokio::spawn(poll.run(stop_rx));
        active.insert(job_id.to_string(), PollHandle { shutdown, stop_tx, task });

        log::info!("Started polling job {}", job_id);
        true
    }

    /// Stops polling a job. Safe to call for jobs that were never polled or
    /// were already stopped; returns whether a poll was actually cancelled.
    ///
    /// A status check already in flight is not interrupted, but its result
    /// is discarded once it lands.
    pub fn stop_polling(&self, job_id: &str) -> bool {
        match self.lock_active().remove(job_id) {
            Some(handle) => {
                handle.stop();
                log::info!("Stopped polling job {}", job_id);
                true
            }
            None => {
                log::debug!("No active poll for job {}", job_id);
                false
            }
        }
    }

    /// Cancels every active poll, returning how many were running.
    pub fn stop_all(&self) -> usize {
        let drained: Vec<(String, PollHandle)> = self.lock_active().drain().collect();
        for (job_id, handle) in &drained {
            handle.stop();
            log::debug!("Stopped polling job {}", job_id);
        }
        drained.len()
    }

    pub fn is_polling(&self, job_id: &str) -> bool {
        self.lock_active().contains_key(job_id)
    }

    pub fn active_count(&self) -> usize {
        self.lock_active().len()
    }

    fn lock_active(&self) -> MutexGuard<'_, HashMap<String, PollHandle>> {
        match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

struct PollTask {
    job_id: String,
    jobs: Arc<JobTracker>,
    files: Arc<FileRegistry>,
    api: Arc<dyn BackendClient>,
    active: Arc<Mutex<HashMap<String, PollHandle>>>,
    shutdown: Arc<AtomicBool>,
    interval: Duration,
}

impl PollTask {
    async fn run(self, mut stop_rx: mpsc::Receiver<()>) {
        // The first tick of an interval completes immediately.
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                break;
            }
            tokio::select! {
                _ = ticker.tick() => {
                    if self.check().await {
                        break;
                    }
                }
                _ = stop_rx.recv() => break,
            }
        }
    }

    /// Runs one status check. Returns `true` once polling should end.
    async fn check(&self) -> bool {
        let record = match self.api.get_job_status(&self.job_id).await {
            Ok(record) => record,
            Err(e) => {
                log::error!("Failed to poll job {}: {}", self.job_id, e);
                return false;
            }
        };

        // A stop can land while the call is in flight, and a restarted poll
        // for the same job may already be running. The stale result must not
        // overwrite the successor's writes.
        if self.shutdown.load(Ordering::SeqCst) {
            log::debug!("Discarding status for stopped poll of job {}", self.job_id);
            return true;
        }

        let stored = self.jobs.upsert(record);
        let file_status = match stored.status {
            JobStatus::Completed => FileStatus::Completed,
            JobStatus::Failed => FileStatus::Error,
            JobStatus::Pending | JobStatus::Processing => return false,
        };

        self.files.update_status(&stored.file_id, file_status);
        log::info!("Job {} finished as {}", self.job_id, stored.status);
        self.deregister();
        true
    }

    fn deregister(&self) {
        let mut active = match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // The entry under this id can belong to a poll restarted after a
        // stop; only this task's own handle may come out.
        let owns_entry = active
            .get(&self.job_id)
            .is_some_and(|handle| Arc::ptr_eq(&handle.shutdown, &self.shutdown));
        if owns_entry {
            active.remove(&self.job_id);
        }
    }
}
