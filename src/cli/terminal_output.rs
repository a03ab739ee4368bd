//! Terminal rendering of pipeline progress
//!
//! [`TerminalReporter`] draws the overall bar and the per-command spinner
//! with `indicatif` and prints step output above them. When stdout is not a
//! terminal the bars are hidden and everything is printed as plain lines.

use crate::cli::output::{
    create_progress_bar, create_spinner, format_step_list, format_summary, style, CHECK, CROSS,
    INFO, TICKS_PER_STEP,
};
use crate::core::{PipelineState, PipelineStatus};
use crate::execution::{DisplayGuard, Reporter};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Reporter that renders to the terminal
#[derive(Debug)]
pub struct TerminalReporter {
    multi: MultiProgress,
    bar: Mutex<Option<ProgressBar>>,
    /// Bar position at the start of the step in flight
    base: AtomicU64,
    quiet: bool,
}

impl TerminalReporter {
    /// Draw to stdout (hidden automatically when it is not a terminal)
    pub fn new(quiet: bool) -> Self {
        Self::with_target(ProgressDrawTarget::stdout(), quiet)
    }

    /// Never draw bars; print plain lines only
    pub fn plain(quiet: bool) -> Self {
        Self::with_target(ProgressDrawTarget::hidden(), quiet)
    }

    fn with_target(target: ProgressDrawTarget, quiet: bool) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(target),
            bar: Mutex::new(None),
            base: AtomicU64::new(0),
            quiet,
        }
    }

    fn println(&self, line: &str) {
        if self.multi.is_hidden() {
            println!("{}", line);
        } else {
            let _ = self.multi.println(line);
        }
    }

    fn main_bar(&self) -> Option<ProgressBar> {
        self.bar.lock().ok().and_then(|bar| bar.clone())
    }
}

impl Reporter for TerminalReporter {
    fn report_command(&self, text: &str) {
        self.println(&format!("    {}", style(text).cyan()));
    }

    fn report_info(&self, text: &str) {
        if self.quiet {
            return;
        }
        self.println(&format!("    {}{}", INFO, style(text).cyan()));
    }

    fn report_error(&self, text: &str) {
        for line in text.lines() {
            self.println(&format!("    {}{}", CROSS, style(line).red()));
        }
    }

    fn report_success(&self, text: &str) {
        self.println(&format!("    {}{}", CHECK, style(text).green()));
    }

    fn report_progress(&self, fraction: f64) {
        if let Some(bar) = self.main_bar() {
            let step = (fraction.clamp(0.0, 1.0) * TICKS_PER_STEP as f64) as u64;
            let position = self.base.load(Ordering::SeqCst) + step;
            bar.set_position(position.min(bar.length().unwrap_or(position)));
        }
    }

    fn report_output(&self, text: &str) {
        if self.quiet {
            return;
        }
        for line in text.lines() {
            self.println(&format!("      {}", style(line).dim()));
        }
    }

    fn pipeline_started(&self, step_names: &[&str]) {
        self.println("");
        self.println(&style("meows to meow:").cyan().bold().to_string());
        self.println(&format_step_list(step_names));
        self.println("");

        let bar = self.multi.add(create_progress_bar(step_names.len()));
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
        self.base.store(0, Ordering::SeqCst);
    }

    fn step_started(&self, index: usize, total: usize, name: &str) {
        self.println(&format!("\n{}", style(name).bold()));
        if let Some(bar) = self.main_bar() {
            bar.set_message(format!("[{}/{}] {}", index + 1, total, name));
        }
    }

    fn steps_advanced(&self, completed: usize, _total: usize) {
        let position = completed as u64 * TICKS_PER_STEP;
        self.base.store(position, Ordering::SeqCst);
        if let Some(bar) = self.main_bar() {
            bar.set_position(position);
        }
    }

    fn pipeline_finished(&self, state: &PipelineState) {
        if let Some(bar) = self.main_bar() {
            if state.status == PipelineStatus::Completed {
                if let Some(length) = bar.length() {
                    bar.set_position(length);
                }
                bar.set_message("done");
                bar.finish();
            } else {
                bar.abandon();
            }
        }
        self.println("");
        self.println(&format_summary(state));
    }

    fn start_spinner(&self, message: &str) -> DisplayGuard {
        if self.multi.is_hidden() {
            return DisplayGuard::inactive();
        }
        let spinner = self.multi.add(create_spinner(message));
        DisplayGuard::new(move || spinner.finish_and_clear())
    }

    fn release_terminal(&self) -> DisplayGuard {
        if self.multi.is_hidden() {
            return DisplayGuard::inactive();
        }
        self.multi.set_draw_target(ProgressDrawTarget::hidden());
        let multi = self.multi.clone();
        DisplayGuard::new(move || multi.set_draw_target(ProgressDrawTarget::stdout()))
    }
}
