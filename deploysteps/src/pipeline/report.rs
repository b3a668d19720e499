//! Run reports produced by a completed pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Timing record of one completed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step name.
    pub name: String,
    /// When the step started.
    pub started_at: DateTime<Utc>,
    /// When the step ended.
    pub ended_at: DateTime<Utc>,
}

impl StepRecord {
    /// Creates a record for a step that started at `started_at` and just
    /// finished.
    #[must_use]
    pub fn completed(name: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            started_at,
            ended_at: Utc::now(),
        }
    }

    /// Returns the duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        (self.ended_at - self.started_at).num_milliseconds()
    }
}

/// Summary of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Unique id of the run.
    pub run_id: Uuid,
    /// Pipeline name.
    pub pipeline: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run ended.
    pub ended_at: DateTime<Utc>,
    /// Number of validators that ran.
    pub validators_run: usize,
    /// Steps that completed, in execution order.
    pub steps: Vec<StepRecord>,
    /// Error results of warning-level validators.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl PipelineReport {
    /// Creates an empty report for a run of `pipeline` starting now.
    #[must_use]
    pub fn start(pipeline: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            run_id: Uuid::new_v4(),
            pipeline: pipeline.into(),
            started_at: now,
            ended_at: now,
            validators_run: 0,
            steps: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Marks the run as finished.
    #[must_use]
    pub fn finish(mut self) -> Self {
        self.ended_at = Utc::now();
        self
    }

    /// Returns the number of completed steps.
    #[must_use]
    pub fn steps_run(&self) -> usize {
        self.steps.len()
    }

    /// Returns the duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        (self.ended_at - self.started_at).num_milliseconds()
    }

    /// Returns true if any warning-level validator reported a problem.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
