//! Output classifier - decides which tool output is worth showing

/// Output longer than this is only shown in verbose mode
const SHORT_OUTPUT_LIMIT: usize = 200;

/// What to do with a command's captured output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportAction {
    /// Nothing to show
    Suppress,
    /// Full passthrough (verbose mode)
    EmitVerbose(String),
    /// One short status message
    EmitStatus(String),
    /// Several lines, shown one by one
    EmitLines(Vec<String>),
}

/// Classify captured output.
///
/// Verbose mode passes everything through. Otherwise only recognised signals
/// (already up to date, nothing to commit, created/deleted files) and short
/// messages that don't just echo `known_message` back are surfaced.
pub fn classify(output: &str, known_message: Option<&str>, verbose: bool) -> ReportAction {
    let output = output.trim();
    if output.is_empty() {
        return ReportAction::Suppress;
    }

    if verbose {
        return ReportAction::EmitVerbose(output.to_string());
    }

    if output.contains("Everything up-to-date") {
        return ReportAction::EmitStatus("everything up-to-date".to_string());
    }

    if output.contains("nothing to commit") {
        return ReportAction::EmitStatus("nothing to commit".to_string());
    }

    if output.contains("create mode") || output.contains("delete mode") {
        return ReportAction::EmitLines(output.lines().map(str::to_string).collect());
    }

    if output.chars().count() < SHORT_OUTPUT_LIMIT && !echoes_message(output, known_message) {
        return ReportAction::EmitStatus(output.to_string());
    }

    ReportAction::Suppress
}

// `git commit` prints "[main 1a2b3c4] <message>"
fn echoes_message(output: &str, known_message: Option<&str>) -> bool {
    match known_message.map(str::trim) {
        Some(message) if !message.is_empty() => output == message || output.contains(message),
        _ => false,
    }
}
