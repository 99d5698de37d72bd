//! Background job subsystem: models, storage, CSV export, and tracking.

pub mod export;
pub mod job;
pub mod store;
pub mod tracker;

pub use job::{Job, JobParams, JobStatus};
pub use store::{JobStore, MemoryJobStore};
pub use tracker::{JobTracker, TrackerError, DEFAULT_JOB_TIMEOUT, MAX_RESULTS_LIMIT};
