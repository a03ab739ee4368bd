//! Process runner - runs one external command and maps its outcome

use crate::{
    core::step::{command_line, Step},
    execution::{
        error::ExecutionError,
        interrupt::Interrupt,
        report::{DisplayGuard, Reporter},
    },
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, info};

/// How a single command should be run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOptions {
    /// Buffer stdout/stderr instead of streaming them to the terminal
    pub capture_output: bool,

    /// Hand the terminal to the child (no capture, no overlay)
    pub interactive: bool,

    /// Print the command instead of running it
    pub dry_run: bool,

    /// Show the spinner and progress events while the command runs
    pub show_progress: bool,
}

impl ExecOptions {
    /// Captured with progress feedback
    pub fn captured() -> Self {
        Self {
            capture_output: true,
            show_progress: true,
            ..Default::default()
        }
    }

    /// Straight to the terminal
    pub fn interactive() -> Self {
        Self {
            interactive: true,
            ..Default::default()
        }
    }

    /// Options for running `step`, as decided when it was built
    pub fn for_step(step: &Step, dry_run: bool) -> Self {
        let interactive = step.is_interactive();
        Self {
            capture_output: step.capture_output && !interactive,
            interactive,
            dry_run,
            show_progress: step.show_progress && !interactive,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Whether a process actually ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitState {
    /// The process exited with status 0
    Success,
    /// Nothing was spawned (empty command or dry run)
    NoOp,
}

/// Result of a command that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit: ExitState,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ExecutionResult {
    pub fn success(stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        Self {
            exit: ExitState::Success,
            stdout,
            stderr,
        }
    }

    pub fn noop() -> Self {
        Self {
            exit: ExitState::NoOp,
            stdout: Vec::new(),
            stderr: Vec::new(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.exit == ExitState::NoOp
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// Where a spawned process writes its output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Piped and returned in the result
    Capture,
    /// Inherited from this process
    Inherit,
}

/// Everything needed to start one process
#[derive(Debug, Clone, Copy)]
pub struct SpawnRequest<'a> {
    pub program: &'a str,
    pub args: &'a [String],
    pub cwd: &'a Path,
    pub output: OutputMode,
}

impl SpawnRequest<'_> {
    pub fn command_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.to_string());
        parts.extend(self.args.iter().cloned());
        command_line(&parts)
    }
}

/// Starts a process and waits for it to exit.
///
/// Dropping the returned future must stop the process.
#[async_trait]
pub trait Spawner: Send + Sync {
    async fn spawn(&self, request: SpawnRequest<'_>) -> Result<ExecutionResult, ExecutionError>;
}

/// Spawns real processes with `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

#[async_trait]
impl Spawner for SystemSpawner {
    async fn spawn(&self, request: SpawnRequest<'_>) -> Result<ExecutionResult, ExecutionError> {
        let command_line = request.command_line();
        debug!("Spawning `{}` in {}", command_line, request.cwd.display());

        let mut command = Command::new(request.program);
        command
            .args(request.args)
            .current_dir(request.cwd)
            .kill_on_drop(true);

        let spawned = match request.output {
            OutputMode::Capture => command.output().await,
            OutputMode::Inherit => command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .await
                .map(|status| std::process::Output {
                    status,
                    stdout: Vec::new(),
                    stderr: Vec::new(),
                }),
        };

        let output = spawned.map_err(|source| ExecutionError::Spawn {
            command: command_line.clone(),
            source,
        })?;

        if killed_by_interrupt(&output.status) {
            return Err(ExecutionError::Interrupted);
        }

        if output.status.success() {
            debug!("`{}` exited successfully", command_line);
            return Ok(ExecutionResult::success(output.stdout, output.stderr));
        }

        let exit_code = exit_code_of(&output.status);
        debug!("`{}` exited with code {}", command_line, exit_code);
        Err(ExecutionError::Failed {
            command: command_line,
            exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(unix)]
const SIGINT: i32 = 2;

#[cfg(unix)]
fn killed_by_interrupt(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
fn killed_by_interrupt(_status: &ExitStatus) -> bool {
    false
}

fn exit_code_of(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// Runs commands for the pipeline.
///
/// Handles dry runs, the interactive/captured split, the spinner, and
/// cancellation; the actual process start goes through the [`Spawner`].
pub struct ProcessRunner<S> {
    spawner: S,
    reporter: Arc<dyn Reporter>,
    interrupt: Interrupt,
    cwd: PathBuf,
}

impl<S: Spawner> ProcessRunner<S> {
    pub fn new(spawner: S, reporter: Arc<dyn Reporter>, interrupt: Interrupt, cwd: PathBuf) -> Self {
        Self {
            spawner,
            reporter,
            interrupt,
            cwd,
        }
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Whether the user has asked to stop
    pub fn is_interrupted(&self) -> bool {
        self.interrupt.is_raised()
    }

    /// Run one command.
    ///
    /// An empty command or a dry run returns a no-op result without
    /// spawning. A non-zero exit is returned as [`ExecutionError::Failed`];
    /// deciding what that means for the pipeline is up to the caller.
    pub async fn execute(
        &self,
        command: &[String],
        options: ExecOptions,
    ) -> Result<ExecutionResult, ExecutionError> {
        let Some((program, args)) = command.split_first() else {
            return Ok(ExecutionResult::noop());
        };
        let command_line = command_line(command);

        if options.dry_run {
            self.reporter.report_command(&command_line);
            return Ok(ExecutionResult::noop());
        }

        if self.interrupt.is_raised() {
            return Err(ExecutionError::Interrupted);
        }

        self.reporter.report_info("running command:");
        self.reporter.report_command(&format!("$ {}", command_line));

        if options.interactive {
            info!("Running `{}` interactively", command_line);
            let request = SpawnRequest {
                program,
                args,
                cwd: &self.cwd,
                output: OutputMode::Inherit,
            };
            let _terminal = self.reporter.release_terminal();
            return self.spawn_interruptible(request).await;
        }

        let output = if options.capture_output {
            OutputMode::Capture
        } else {
            OutputMode::Inherit
        };
        // Streamed output would be garbled by the spinner
        let progress = options.show_progress && options.capture_output;

        let mut display = if progress {
            self.reporter.report_progress(0.1);
            self.reporter.start_spinner(&spinner_message(command, &command_line))
        } else if output == OutputMode::Inherit {
            self.reporter.release_terminal()
        } else {
            DisplayGuard::inactive()
        };

        let request = SpawnRequest {
            program,
            args,
            cwd: &self.cwd,
            output,
        };
        let result = self.spawn_interruptible(request).await;
        display.stop();

        if progress && result.is_ok() {
            self.reporter.report_progress(0.5);
            self.reporter.report_progress(1.0);
        }

        result
    }

    async fn spawn_interruptible(
        &self,
        request: SpawnRequest<'_>,
    ) -> Result<ExecutionResult, ExecutionError> {
        tokio::select! {
            biased;
            _ = self.interrupt.raised() => {
                info!("Interrupted while running `{}`", request.command_line());
                Err(ExecutionError::Interrupted)
            }
            result = self.spawner.spawn(request) => result,
        }
    }
}

fn spinner_message(command: &[String], command_line: &str) -> String {
    if command.get(1).map(String::as_str) == Some("commit") {
        "committing...".to_string()
    } else {
        format!("executing {}...", command_line)
    }
}
