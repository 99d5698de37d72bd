//! Job model for background lead extraction.

use chrono::{DateTime, Utc};
use leadgen::{ExtractionStats, Lead};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of an extraction job.
///
/// Transitions are monotone: `Pending → Running → {Completed | Failed}`.
/// Terminal states never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    /// Whether no further transitions can occur.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Validated submission parameters. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobParams {
    pub location: String,
    pub industries: Vec<String>,
    pub max_results: usize,
}

/// One tracked extraction request and its lifecycle state.
///
/// A job's mutable fields are written only by the single execution task
/// spawned for it; everyone else reads snapshots through the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub params: JobParams,
    pub status: JobStatus,
    /// 0-100, advisory; non-decreasing until a terminal state.
    pub progress: u8,
    /// Empty until `Completed`; immutable once populated.
    pub leads: Vec<Lead>,
    pub stats: Option<ExtractionStats>,
    /// Present only when `Failed`.
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(params: JobParams) -> Self {
        Self {
            id: Uuid::new_v4(),
            params,
            status: JobStatus::Pending,
            progress: 0,
            leads: Vec::new(),
            stats: None,
            error_message: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Enter the running state. No-op once terminal.
    pub fn mark_running(&mut self) {
        if !self.status.is_terminal() {
            self.status = JobStatus::Running;
        }
    }

    /// Apply an advisory progress checkpoint, clamped so progress never
    /// moves backward and terminal values are never disturbed.
    pub fn set_progress(&mut self, value: u8) {
        if self.status.is_terminal() {
            return;
        }
        self.progress = self.progress.max(value.min(100));
    }

    /// Terminal success: store results, pin progress at 100.
    pub fn complete(&mut self, leads: Vec<Lead>, stats: ExtractionStats) {
        if self.status.is_terminal() {
            return;
        }
        self.leads = leads;
        self.stats = Some(stats);
        self.status = JobStatus::Completed;
        self.progress = 100;
        self.completed_at = Some(Utc::now());
    }

    /// Terminal failure: capture the message, freeze progress where it is.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.status.is_terminal() {
            return;
        }
        self.status = JobStatus::Failed;
        self.error_message = Some(message.into());
        self.completed_at = Some(Utc::now());
    }
}
