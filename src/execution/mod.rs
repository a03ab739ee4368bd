//! Pipeline execution engine

pub mod classifier;
pub mod error;
pub mod interrupt;
pub mod orchestrator;
pub mod report;
pub mod runner;

pub use classifier::{classify, ReportAction};
pub use error::{ExecutionError, INTERRUPTED_EXIT_CODE, SPAWN_FAILED_EXIT_CODE};
pub use interrupt::{Interrupt, InterruptTrigger};
pub use orchestrator::{PipelineOrchestrator, PipelineOutcome};
pub use report::{DisplayGuard, NoSuggestions, Reporter, SilentReporter, Suggester};
pub use runner::{
    ExecOptions, ExecutionResult, ExitState, OutputMode, ProcessRunner, SpawnRequest, Spawner,
    SystemSpawner,
};
