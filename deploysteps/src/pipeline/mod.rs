//! Sequential phase runner.
//!
//! A [`Pipeline`] runs its validators in declared order, then its steps in
//! declared order. One thing runs at a time and the first step failure
//! halts the run.

mod report;

#[cfg(test)]
mod integration_tests;

pub use report::{PipelineReport, StepRecord};

use crate::errors::{DeployError, StepError};
use crate::steps::Step;
use crate::validators::{Validator, ValidatorLevel};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// An ordered set of validators and steps forming one deployment phase.
#[derive(Clone)]
pub struct Pipeline {
    name: String,
    validators: Vec<(ValidatorLevel, Arc<dyn Validator>)>,
    steps: Vec<Arc<dyn Step>>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            validators: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Appends a validator at the given level.
    #[must_use]
    pub fn validator(mut self, level: ValidatorLevel, validator: Arc<dyn Validator>) -> Self {
        self.validators.push((level, validator));
        self
    }

    /// Appends a step.
    #[must_use]
    pub fn step(mut self, step: Arc<dyn Step>) -> Self {
        self.steps.push(step);
        self
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the step names in execution order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Runs every validator and returns the messages of warning-level
    /// error results.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::Validation`] listing every critical error
    /// result, or the first tooling fault raised by a validator.
    pub fn run_validators(&self) -> Result<Vec<String>, DeployError> {
        let mut failures = Vec::new();
        let mut warnings = Vec::new();

        for (level, validator) in &self.validators {
            let result = validator.validate()?;
            let Some(message) = result.message() else {
                debug!(pipeline = %self.name, validator = validator.name(), "Validator passed");
                continue;
            };
            let suggestion = result.suggestion().unwrap_or_default();

            match level {
                ValidatorLevel::Critical => {
                    error!(pipeline = %self.name, validator = validator.name(), suggestion, "{message}");
                    failures.push(message.to_string());
                }
                ValidatorLevel::Warning => {
                    warn!(pipeline = %self.name, validator = validator.name(), suggestion, "{message}");
                    warnings.push(message.to_string());
                }
            }
        }

        if failures.is_empty() {
            Ok(warnings)
        } else {
            Err(DeployError::Validation(failures))
        }
    }

    /// Runs every step in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`StepError`] unmodified; later steps do not run.
    pub fn run_steps(&self) -> Result<Vec<StepRecord>, StepError> {
        let mut records = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let started_at = Utc::now();
            info!(pipeline = %self.name, step = step.name(), "Step started");

            if let Err(failure) = step.execute() {
                error!(
                    pipeline = %self.name,
                    step = step.name(),
                    code = failure.code,
                    "{}",
                    failure.message
                );
                return Err(failure);
            }

            let record = StepRecord::completed(step.name(), started_at);
            info!(
                pipeline = %self.name,
                step = step.name(),
                duration_ms = record.duration_ms(),
                "Step completed"
            );
            records.push(record);
        }

        Ok(records)
    }

    /// Runs validators, then steps.
    ///
    /// # Errors
    ///
    /// Returns the validation failure or the first step failure.
    pub fn run(&self) -> Result<PipelineReport, DeployError> {
        let mut report = PipelineReport::start(&self.name);
        info!(pipeline = %self.name, run_id = %report.run_id, "Pipeline started");

        report.warnings = self.run_validators()?;
        report.validators_run = self.validators.len();
        report.steps = self.run_steps()?;

        let report = report.finish();
        info!(
            pipeline = %self.name,
            run_id = %report.run_id,
            steps = report.steps_run(),
            warnings = report.warnings.len(),
            "Pipeline completed"
        );
        Ok(report)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("validators", &self.validators.len())
            .field("steps", &self.step_names())
            .finish()
    }
}
