//! Job submission and supervised execution.
//!
//! Each submitted job gets exactly one spawned execution task. The task
//! drives the extractor, relays its progress checkpoints into the store,
//! and enforces cancellation and a wall-clock timeout around it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use leadgen::{LeadExtractor, LeadQuery};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::job::{Job, JobParams, JobStatus};
use super::store::JobStore;

/// Default wall-clock bound on a single extraction.
pub const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(900);

/// Largest accepted `max_results`.
pub const MAX_RESULTS_LIMIT: usize = 500;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// Rejected before a job was created. Names the offending field.
    #[error("{0}")]
    Validation(String),

    #[error("job {0} not found")]
    NotFound(Uuid),

    /// Results were requested before the job reached a terminal success.
    #[error("job {0} is not completed yet")]
    NotReady(Uuid),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

struct JobHandle {
    token: CancellationToken,
    #[allow(dead_code)]
    join: JoinHandle<()>,
}

/// Owns the job store and spawns one supervised task per accepted job.
pub struct JobTracker {
    store: Arc<dyn JobStore>,
    extractor: Arc<dyn LeadExtractor>,
    job_timeout: Duration,
    handles: Arc<Mutex<HashMap<Uuid, JobHandle>>>,
}

impl JobTracker {
    pub fn new(store: Arc<dyn JobStore>, extractor: Arc<dyn LeadExtractor>) -> Self {
        Self {
            store,
            extractor,
            job_timeout: DEFAULT_JOB_TIMEOUT,
            handles: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_job_timeout(mut self, timeout: Duration) -> Self {
        self.job_timeout = timeout;
        self
    }

    /// Validate parameters, record a pending job, and spawn its execution
    /// task. Returns the new job id. Validation failures create no job.
    pub async fn submit(&self, params: JobParams) -> Result<Uuid, TrackerError> {
        validate(&params)?;

        let job = Job::new(params);
        let id = job.id;
        let params = job.params.clone();
        self.store.put(job).await?;

        let token = CancellationToken::new();
        let store = Arc::clone(&self.store);
        let extractor = Arc::clone(&self.extractor);
        let task_handles = Arc::clone(&self.handles);
        let job_timeout = self.job_timeout;
        let task_token = token.clone();

        // Hold the map lock across the spawn: the task's cleanup takes the
        // same lock, so even an instantly-finishing job cannot remove its
        // entry before it has been inserted.
        let mut handles = self.handles.lock().unwrap();
        let join = tokio::spawn(async move {
            run(store, extractor, job_timeout, id, params, task_token).await;
            task_handles.lock().unwrap().remove(&id);
        });
        handles.insert(id, JobHandle { token, join });
        drop(handles);

        info!(job_id = %id, "Job submitted");
        Ok(id)
    }

    /// Snapshot of a job's current state.
    pub async fn get_status(&self, id: Uuid) -> Result<Job, TrackerError> {
        self.store
            .get(id)
            .await?
            .ok_or(TrackerError::NotFound(id))
    }

    /// Results of a completed job. `NotReady` for pending, running, and
    /// failed jobs; failure details live on the status snapshot instead.
    pub async fn get_results(&self, id: Uuid) -> Result<Job, TrackerError> {
        let job = self.get_status(id).await?;
        if job.status != JobStatus::Completed {
            return Err(TrackerError::NotReady(id));
        }
        Ok(job)
    }

    /// Completed results as a CSV document plus its download filename.
    pub async fn export_csv(&self, id: Uuid) -> Result<(String, Vec<u8>), TrackerError> {
        let job = self.get_results(id).await?;
        let bytes = super::export::leads_to_csv(&job.leads)?;
        let filename = super::export::csv_filename(&job.params.location, chrono::Utc::now());
        Ok((filename, bytes))
    }

    /// Request cancellation of a running job. The execution task records
    /// the failure; an already-terminal job is left untouched.
    pub async fn cancel(&self, id: Uuid) -> Result<(), TrackerError> {
        self.get_status(id).await?;
        if let Some(handle) = self.handles.lock().unwrap().get(&id) {
            handle.token.cancel();
        }
        Ok(())
    }
}

/// Drive one extraction to a terminal state.
async fn run(
    store: Arc<dyn JobStore>,
    extractor: Arc<dyn LeadExtractor>,
    job_timeout: Duration,
    id: Uuid,
    params: JobParams,
    token: CancellationToken,
) {
    if let Err(e) = transition(store.as_ref(), id, Job::mark_running).await {
        error!(job_id = %id, error = %e, "Failed to mark job running");
        return;
    }
    if transition(store.as_ref(), id, |j| j.set_progress(10))
        .await
        .is_err()
    {
        return;
    }

    let query = LeadQuery {
        location: params.location,
        industries: params.industries,
        max_results: params.max_results,
    };
    let (tx, mut rx) = mpsc::unbounded_channel();
    let deadline = Instant::now() + job_timeout;

    let extraction = extractor.extract(&query, tx);
    tokio::pin!(extraction);

    let outcome = loop {
        tokio::select! {
            _ = token.cancelled() => {
                warn!(job_id = %id, "Job cancelled");
                break Err("job cancelled".to_string());
            }
            _ = tokio::time::sleep_until(deadline) => {
                warn!(job_id = %id, timeout_secs = job_timeout.as_secs(), "Job timed out");
                break Err("extraction timed out".to_string());
            }
            Some(progress) = rx.recv() => {
                let _ = transition(store.as_ref(), id, |j| j.set_progress(progress)).await;
            }
            result = &mut extraction => {
                break result.map_err(|e| e.to_string());
            }
        }
    };

    let update = match outcome {
        Ok(extraction) => {
            info!(job_id = %id, leads = extraction.leads.len(), "Job completed");
            transition(store.as_ref(), id, move |j| {
                j.complete(extraction.leads, extraction.stats)
            })
            .await
        }
        Err(message) => {
            warn!(job_id = %id, error = %message, "Job failed");
            transition(store.as_ref(), id, move |j| j.fail(message)).await
        }
    };
    if let Err(e) = update {
        error!(job_id = %id, error = %e, "Failed to persist job outcome");
    }
}

/// Load-modify-store a job snapshot. The execution task is the only
/// writer for its job, so this cycle does not race.
async fn transition<F>(store: &dyn JobStore, id: Uuid, apply: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut Job),
{
    let Some(mut job) = store.get(id).await? else {
        anyhow::bail!("job {id} disappeared from the store");
    };
    apply(&mut job);
    store.put(job).await
}

fn validate(params: &JobParams) -> Result<(), TrackerError> {
    if params.location.trim().is_empty() {
        return Err(TrackerError::Validation("location is required".to_string()));
    }
    if params.industries.is_empty() {
        return Err(TrackerError::Validation(
            "at least one industry must be selected".to_string(),
        ));
    }
    if params.max_results == 0 || params.max_results > MAX_RESULTS_LIMIT {
        return Err(TrackerError::Validation(format!(
            "max_results must be between 1 and {MAX_RESULTS_LIMIT}"
        )));
    }
    Ok(())
}
