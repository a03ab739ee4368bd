//! Reporting seam between the engine and the terminal
//!
//! The engine describes what happened through [`Reporter`]; rendering
//! (colors, bars, spinners) is left entirely to the implementation.

use crate::core::PipelineState;

/// Receives structured progress from the engine
pub trait Reporter: Send + Sync {
    /// A command about to run (or, in a dry run, the command itself)
    fn report_command(&self, text: &str);

    fn report_info(&self, text: &str);

    fn report_error(&self, text: &str);

    fn report_success(&self, text: &str);

    /// Progress of the command in flight, 0.0 to 1.0
    fn report_progress(&self, fraction: f64);

    /// Raw tool output worth showing, one line or block at a time
    fn report_output(&self, text: &str) {
        self.report_info(text);
    }

    /// The run is about to start with these steps
    fn pipeline_started(&self, _step_names: &[&str]) {}

    /// Step `index` (0-based) of `total` is starting
    fn step_started(&self, _index: usize, _total: usize, _name: &str) {}

    /// The completed count changed
    fn steps_advanced(&self, _completed: usize, _total: usize) {}

    /// The run reached a terminal state
    fn pipeline_finished(&self, _state: &PipelineState) {}

    /// Start an activity indicator; it stops when the guard is stopped or dropped
    fn start_spinner(&self, _message: &str) -> DisplayGuard {
        DisplayGuard::inactive()
    }

    /// Stop drawing while a child process writes to the terminal directly;
    /// drawing resumes when the guard is stopped or dropped
    fn release_terminal(&self) -> DisplayGuard {
        DisplayGuard::inactive()
    }
}

/// Handle to a temporary display change (a spinner, a hidden progress bar).
///
/// Stopping is idempotent and also happens on drop, so the change is undone
/// on every exit path before results are printed.
#[must_use = "the display change is undone as soon as the guard is dropped"]
pub struct DisplayGuard {
    stop: Option<Box<dyn FnOnce() + Send>>,
}

impl DisplayGuard {
    /// Guard that runs `stop` exactly once
    pub fn new<F>(stop: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            stop: Some(Box::new(stop)),
        }
    }

    /// Guard with nothing to stop
    pub fn inactive() -> Self {
        Self { stop: None }
    }

    pub fn is_active(&self) -> bool {
        self.stop.is_some()
    }

    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

impl Drop for DisplayGuard {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for DisplayGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayGuard")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Turns a failing command's stderr into a remediation hint
pub trait Suggester: Send + Sync {
    fn suggest(&self, stderr: &str) -> Option<String>;
}

/// Suggester that never has anything to say
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSuggestions;

impl Suggester for NoSuggestions {
    fn suggest(&self, _stderr: &str) -> Option<String> {
        None
    }
}

/// Reporter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report_command(&self, _text: &str) {}
    fn report_info(&self, _text: &str) {}
    fn report_error(&self, _text: &str) {}
    fn report_success(&self, _text: &str) {}
    fn report_progress(&self, _fraction: f64) {}
}
