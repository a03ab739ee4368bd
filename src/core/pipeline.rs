//! Pipeline domain model

use crate::core::{
    config::Configuration,
    policy::build_steps,
    state::StepState,
    step::{Step, StepKind},
};

/// The ordered steps of one run
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub steps: Vec<Step>,
}

impl Pipeline {
    /// Create a pipeline from configuration
    pub fn from_config(config: &Configuration) -> Self {
        Self {
            steps: build_steps(config),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Get a step by kind
    pub fn step(&self, kind: StepKind) -> Option<&Step> {
        self.steps.iter().find(|s| s.kind == kind)
    }

    /// Display names in execution order
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(Step::name).collect()
    }

    /// Steps that ran to completion, in order
    pub fn completed_steps(&self) -> Vec<StepKind> {
        self.steps
            .iter()
            .filter(|s| s.state == StepState::Completed)
            .map(|s| s.kind)
            .collect()
    }

    /// Steps that failed, in order
    pub fn failed_steps(&self) -> Vec<StepKind> {
        self.steps
            .iter()
            .filter(|s| matches!(s.state, StepState::Failed { .. }))
            .map(|s| s.kind)
            .collect()
    }
}
