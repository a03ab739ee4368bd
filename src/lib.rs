//! meow - stage, commit and push in one command

pub mod cli;
pub mod core;
pub mod execution;

// Re-export commonly used types
pub use crate::core::{Configuration, ConfigurationError, Pipeline, PipelineState, PipelineStatus, Step, StepKind};
pub use crate::execution::{
    ExecutionError, Interrupt, PipelineOrchestrator, PipelineOutcome, ProcessRunner, Reporter,
    SystemSpawner,
};
