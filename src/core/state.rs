//! Execution state models

use chrono::{DateTime, Utc};

/// Overall pipeline status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    /// Pipeline has not started
    Pending,
    /// A step is in flight
    Running,
    /// Every included step was attempted
    Completed,
    /// A step failed and continue-on-error was off
    Aborted { exit_code: i32 },
    /// The user cancelled the run
    Interrupted,
}

impl PipelineStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineStatus::Completed | PipelineStatus::Aborted { .. } | PipelineStatus::Interrupted
        )
    }
}

/// State of a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepState {
    /// Not reached yet
    Pending,
    /// Command is running
    Running,
    /// Command exited successfully (or was skipped by a dry run)
    Completed,
    /// Command failed
    Failed { exit_code: i32 },
    /// Cancelled while running
    Interrupted,
}

impl StepState {
    /// Check if step is in a terminal state
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepState::Pending | StepState::Running)
    }
}

/// Progress bookkeeping for one run.
///
/// Only the orchestrator mutates this.
#[derive(Debug, Clone)]
pub struct PipelineState {
    pub status: PipelineStatus,

    /// Number of included steps, advisory ones too
    pub total_steps: usize,

    /// Steps that succeeded and count toward completion
    pub completed_steps: usize,

    /// Steps that failed but were skipped past
    pub failed_steps: usize,

    /// Index of the step in flight, if any
    pub current_step: Option<usize>,

    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl PipelineState {
    pub fn new(total_steps: usize) -> Self {
        Self {
            status: PipelineStatus::Pending,
            total_steps,
            completed_steps: 0,
            failed_steps: 0,
            current_step: None,
            started_at: None,
            finished_at: None,
        }
    }

    /// Enter step `index`
    pub fn begin_step(&mut self, index: usize) {
        if self.started_at.is_none() {
            self.started_at = Some(Utc::now());
        }
        self.status = PipelineStatus::Running;
        self.current_step = Some(index);
    }

    /// Count a successful step
    pub fn record_success(&mut self, counts_toward_completion: bool) {
        if counts_toward_completion && self.completed_steps < self.total_steps {
            self.completed_steps += 1;
        }
        self.current_step = None;
    }

    /// Count a failed step the run continues past
    pub fn record_skipped_failure(&mut self) {
        self.failed_steps += 1;
        self.current_step = None;
    }

    pub fn complete(&mut self) {
        self.finish(PipelineStatus::Completed);
        self.current_step = None;
    }

    pub fn abort(&mut self, exit_code: i32) {
        self.finish(PipelineStatus::Aborted { exit_code });
    }

    pub fn interrupt(&mut self) {
        self.finish(PipelineStatus::Interrupted);
    }

    fn finish(&mut self, status: PipelineStatus) {
        self.status = status;
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock time between the first step and the end of the run
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end.signed_duration_since(start)),
            _ => None,
        }
    }
}
