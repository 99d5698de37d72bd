//! Job persistence behind a trait so the tracker never knows what backs it.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use super::job::Job;

/// Storage for job state snapshots.
///
/// `put` overwrites the whole record; the tracker's execution task is the
/// only writer for a given job, so read-modify-write cycles do not race.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn put(&self, job: Job) -> anyhow::Result<()>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Job>>;
    async fn list(&self) -> anyhow::Result<Vec<Job>>;
}

/// In-memory store. State does not survive a restart.
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: RwLock<HashMap<Uuid, Job>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn put(&self, job: Job) -> anyhow::Result<()> {
        self.jobs.write().unwrap().insert(job.id, job);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Job>> {
        Ok(self.jobs.read().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<Job>> {
        let mut jobs: Vec<Job> = self.jobs.read().unwrap().values().cloned().collect();
        jobs.sort_by_key(|j| j.created_at);
        Ok(jobs)
    }
}
