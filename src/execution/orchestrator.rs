//! Pipeline orchestrator - runs the steps in order and owns the run state

use crate::{
    core::{Configuration, Pipeline, PipelineState, PipelineStatus, Step, StepState},
    execution::{
        classifier::{classify, ReportAction},
        error::{ExecutionError, INTERRUPTED_EXIT_CODE},
        report::{Reporter, Suggester},
        runner::{ExecOptions, ExecutionResult, ProcessRunner, Spawner},
    },
};
use std::sync::Arc;
use tracing::{debug, info};

/// How a run ended
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub state: PipelineState,

    /// Exit code for the whole process
    pub exit_code: i32,
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        self.state.status == PipelineStatus::Completed
    }
}

/// Runs a pipeline's steps one after another.
///
/// A failing step aborts the run unless continue-on-error is set, in which
/// case it is reported and skipped. An interruption always ends the run.
pub struct PipelineOrchestrator<S> {
    runner: ProcessRunner<S>,
    reporter: Arc<dyn Reporter>,
    suggester: Arc<dyn Suggester>,
}

impl<S: Spawner> PipelineOrchestrator<S> {
    pub fn new(
        runner: ProcessRunner<S>,
        reporter: Arc<dyn Reporter>,
        suggester: Arc<dyn Suggester>,
    ) -> Self {
        Self {
            runner,
            reporter,
            suggester,
        }
    }

    pub fn runner(&self) -> &ProcessRunner<S> {
        &self.runner
    }

    /// Execute every step of `pipeline` under `config`
    pub async fn run(&self, pipeline: &mut Pipeline, config: &Configuration) -> PipelineOutcome {
        let total = pipeline.len();
        let mut state = PipelineState::new(total);

        info!("Starting pipeline with {} steps", total);
        self.reporter.pipeline_started(&pipeline.step_names());

        for (index, step) in pipeline.steps.iter_mut().enumerate() {
            if self.runner.is_interrupted() {
                return self.interrupted(state, None);
            }

            state.begin_step(index);
            step.state = StepState::Running;
            self.reporter.step_started(index, total, step.name());
            debug!("Step {}/{}: {}", index + 1, total, step.name());

            let options = ExecOptions::for_step(step, config.dry_run);
            match self.runner.execute(&step.command, options).await {
                Ok(result) => {
                    self.report_result(step, &result, config);
                    step.state = StepState::Completed;
                    state.record_success(step.counts_toward_completion);
                    self.reporter.steps_advanced(state.completed_steps, total);
                }
                Err(ExecutionError::Interrupted) => {
                    return self.interrupted(state, Some(step));
                }
                Err(err) => {
                    let exit_code = err.exit_code();
                    self.report_failure(step, &err);
                    step.state = StepState::Failed { exit_code };

                    if !config.continue_on_error {
                        info!("Step '{}' failed, aborting pipeline", step.name());
                        state.abort(exit_code);
                        self.reporter.pipeline_finished(&state);
                        return PipelineOutcome { state, exit_code };
                    }

                    info!("Step '{}' failed, continuing", step.name());
                    self.reporter.report_info("continuing...");
                    state.record_skipped_failure();
                }
            }
        }

        state.complete();
        info!(
            "Pipeline finished: {}/{} steps completed, {} failed",
            state.completed_steps, state.total_steps, state.failed_steps
        );
        self.reporter.pipeline_finished(&state);

        PipelineOutcome { state, exit_code: 0 }
    }

    fn interrupted(&self, mut state: PipelineState, step: Option<&mut Step>) -> PipelineOutcome {
        if let Some(step) = step {
            info!("Step '{}' interrupted", step.name());
            step.state = StepState::Interrupted;
            self.reporter.report_error("operation cancelled by user");
            self.reporter
                .report_command(&format!("$ {}", step.command_line()));
        } else {
            self.reporter.report_error("operation cancelled by user");
        }
        state.interrupt();
        self.reporter.pipeline_finished(&state);
        PipelineOutcome {
            state,
            exit_code: INTERRUPTED_EXIT_CODE,
        }
    }

    fn report_result(&self, step: &Step, result: &ExecutionResult, config: &Configuration) {
        if result.is_noop() {
            return;
        }

        if step.capture_output {
            let output = result.stdout_text();
            match classify(&output, config.known_message(), config.verbose) {
                ReportAction::Suppress => {}
                ReportAction::EmitVerbose(text) => self.reporter.report_output(&text),
                ReportAction::EmitStatus(text) => self.reporter.report_info(&text),
                ReportAction::EmitLines(lines) => {
                    for line in &lines {
                        self.reporter.report_output(line);
                    }
                }
            }
        }

        self.reporter.report_success("completed successfully");
    }

    fn report_failure(&self, step: &Step, err: &ExecutionError) {
        match err {
            ExecutionError::Spawn { source, .. } => {
                self.reporter
                    .report_error(&format!("failed to start command: {}", source));
            }
            _ => {
                self.reporter
                    .report_error(&format!("command failed with exit code {}:", err.exit_code()));
            }
        }
        self.reporter
            .report_command(&format!("$ {}", step.command_line()));

        let stdout = err.stdout_text();
        if !stdout.trim().is_empty() {
            self.reporter.report_output(stdout.trim_end());
        }

        if let ExecutionError::Failed { .. } = err {
            let stderr = err.stderr_text();
            if !stderr.trim().is_empty() {
                self.reporter.report_error(stderr.trim_end());
                if let Some(hint) = self.suggester.suggest(&stderr) {
                    if !hint.is_empty() {
                        self.reporter.report_error(&hint);
                    }
                }
            }
        }
    }
}
