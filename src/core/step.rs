//! Step domain model

use crate::core::state::StepState;
use std::fmt;

/// The fixed stages a pipeline can contain, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StepKind {
    Status,
    Submodules,
    Stash,
    Pull,
    Stage,
    Diff,
    Commit,
    Push,
}

impl StepKind {
    /// Human-readable name shown in the overview and step headers
    pub fn display_name(self) -> &'static str {
        match self {
            StepKind::Status => "status check",
            StepKind::Submodules => "update submodules",
            StepKind::Stash => "stash changes",
            StepKind::Pull => "pull from remote",
            StepKind::Stage => "stage changes",
            StepKind::Diff => "show diff",
            StepKind::Commit => "commit changes",
            StepKind::Push => "push to remote",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How a command must be run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// Needs the real terminal (e.g. an editor for the commit message)
    Interactive,
    /// Runs under the progress overlay
    Captured,
}

/// Flags that give `git commit` its message without an editor
const MESSAGE_FLAGS: &[&str] = &["-m", "--message", "-F", "--file", "-C", "--reuse-message", "--no-edit"];

/// Decide whether a command needs the terminal to itself.
///
/// Only `git commit` without a message source opens an editor.
pub fn classify_invocation(command: &[String]) -> Invocation {
    let is_commit = command.len() >= 2 && command[0] == "git" && command[1] == "commit";
    if !is_commit {
        return Invocation::Captured;
    }

    let has_message = command[2..].iter().any(|arg| {
        MESSAGE_FLAGS.iter().any(|flag| {
            arg == flag
                || (flag.starts_with("--") && arg.starts_with(&format!("{}=", flag)))
                || (flag.len() == 2 && !flag.starts_with("--") && arg.starts_with(flag) && arg.len() > 2)
        })
    });

    if has_message {
        Invocation::Captured
    } else {
        Invocation::Interactive
    }
}

/// A single stage of the pipeline, backed by one `git` invocation
#[derive(Debug, Clone)]
pub struct Step {
    pub kind: StepKind,

    /// Fully resolved argument vector, program first
    pub command: Vec<String>,

    /// Decided once when the step is built
    pub invocation: Invocation,

    /// Whether success increments the completed count
    pub counts_toward_completion: bool,

    /// Buffer output for classification instead of streaming it
    pub capture_output: bool,

    /// Show the spinner and per-command progress while running
    pub show_progress: bool,

    pub state: StepState,
}

impl Step {
    /// Build a counted, captured step with progress feedback
    pub fn new(kind: StepKind, command: Vec<String>) -> Self {
        let invocation = classify_invocation(&command);
        Self {
            kind,
            command,
            invocation,
            counts_toward_completion: true,
            capture_output: true,
            show_progress: true,
            state: StepState::Pending,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }

    pub fn is_interactive(&self) -> bool {
        self.invocation == Invocation::Interactive
    }

    /// Exclude the step from the completed count
    pub fn advisory(mut self) -> Self {
        self.counts_toward_completion = false;
        self
    }

    /// Stream output straight to the terminal
    pub fn streamed(mut self) -> Self {
        self.capture_output = false;
        self
    }

    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Shell-style rendering of the command for display
    pub fn command_line(&self) -> String {
        command_line(&self.command)
    }
}

/// Join arguments the way a shell user would type them
pub fn command_line(command: &[String]) -> String {
    command
        .iter()
        .map(|arg| quote_arg(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "\"\"".to_string();
    }
    if arg.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
        format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}
