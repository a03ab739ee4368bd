//! Execution error types

use thiserror::Error;

/// Exit code reported when the user cancels the run
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Exit code reported when a command could not be started
pub const SPAWN_FAILED_EXIT_CODE: i32 = 127;

/// Why running a command did not succeed
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("`{command}` failed with exit code {exit_code}")]
    Failed {
        command: String,
        exit_code: i32,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
    },

    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("interrupted by user")]
    Interrupted,
}

impl ExecutionError {
    /// Exit code the pipeline ends with if this error aborts it
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecutionError::Failed { exit_code, .. } => *exit_code,
            ExecutionError::Spawn { .. } => SPAWN_FAILED_EXIT_CODE,
            ExecutionError::Interrupted => INTERRUPTED_EXIT_CODE,
        }
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, ExecutionError::Interrupted)
    }

    /// Captured stdout as text, empty when nothing was captured
    pub fn stdout_text(&self) -> String {
        match self {
            ExecutionError::Failed { stdout, .. } => String::from_utf8_lossy(stdout).into_owned(),
            _ => String::new(),
        }
    }

    /// Captured stderr as text; the OS error for spawn failures
    pub fn stderr_text(&self) -> String {
        match self {
            ExecutionError::Failed { stderr, .. } => String::from_utf8_lossy(stderr).into_owned(),
            ExecutionError::Spawn { source, .. } => source.to_string(),
            ExecutionError::Interrupted => String::new(),
        }
    }
}
