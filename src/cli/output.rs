//! CLI output formatting

use crate::core::{PipelineState, PipelineStatus};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static CAT: Emoji<'_, '_> = Emoji("😺", ":3");

/// Resolution of the overall bar; one step is this many ticks
pub const TICKS_PER_STEP: u64 = 100;

/// Overall progress bar for a run of `total_steps` steps
pub fn create_progress_bar(total_steps: usize) -> ProgressBar {
    let progress = ProgressBar::new(total_steps as u64 * TICKS_PER_STEP);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:.magenta.bold} [{bar:30.magenta/blue}] {percent:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    progress.set_prefix("meowing...");
    progress
}

/// Spinner shown while a single command runs
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("    {spinner:.cyan} {msg:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Format a pipeline status for display
pub fn format_status(status: PipelineStatus) -> String {
    match status {
        PipelineStatus::Pending => style("PENDING").dim().to_string(),
        PipelineStatus::Running => style("RUNNING").yellow().to_string(),
        PipelineStatus::Completed => style("COMPLETED").green().to_string(),
        PipelineStatus::Aborted { exit_code } => {
            style(format!("FAILED (exit code {})", exit_code)).red().to_string()
        }
        PipelineStatus::Interrupted => style("CANCELLED").yellow().to_string(),
    }
}

/// Format an elapsed time as `1.2s` or `3m 04s`
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("{:.1}s", elapsed.as_secs_f64())
    } else {
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

/// Final one-line summary of a run
pub fn format_summary(state: &PipelineState) -> String {
    let icon = match state.status {
        PipelineStatus::Completed => CAT,
        PipelineStatus::Aborted { .. } => Emoji("❌", "x"),
        _ => Emoji("⚠️", "!"),
    };

    let elapsed = state
        .elapsed()
        .and_then(|d| d.to_std().ok())
        .unwrap_or_default();

    let mut summary = format!(
        "{} {} in {} ({}/{} steps)",
        icon,
        format_status(state.status),
        style(format_duration(elapsed)).cyan(),
        state.completed_steps,
        state.total_steps
    );
    if state.failed_steps > 0 {
        summary.push_str(&format!(
            ", {}",
            style(format!("{} failed", state.failed_steps)).red()
        ));
    }
    summary
}

/// Format the numbered list of steps shown before a run
pub fn format_step_list(step_names: &[&str]) -> String {
    step_names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("  {} {}", style(format!("{}.", i + 1)).dim(), name))
        .collect::<Vec<_>>()
        .join("\n")
}
