//! Run configuration

use thiserror::Error;

/// Invalid option combinations, detected before any step runs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("--verbose and --quiet cannot be used together")]
    VerboseAndQuiet,

    #[error("commit message cannot be empty")]
    EmptyCommitMessage,

    #[error("commit message given both as an argument and with --message")]
    DuplicateCommitMessage,

    #[error("empty path in the list of files to stage")]
    EmptyStagePath,

    #[error("--{0} cannot be combined with --no-push")]
    PushTargetWithoutPush(&'static str),
}

/// Parameters of the commit step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitParams {
    /// Commit message; `None` opens the editor
    pub message: Option<String>,

    /// Amend the previous commit instead of creating a new one
    pub amend: bool,

    /// Skip pre-commit and commit-msg hooks
    pub no_verify: bool,
}

/// Where the push step sends commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushTarget {
    pub remote: String,
    pub branch: String,
}

impl PushTarget {
    pub fn new(remote: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
            branch: branch.into(),
        }
    }
}

/// Immutable settings for one pipeline run.
///
/// Built once at start-up by the command-line layer and passed by reference
/// to everything that needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    /// Report a failing step and move on instead of aborting
    pub continue_on_error: bool,

    /// Print commands instead of running them
    pub dry_run: bool,

    /// Pass all tool output through
    pub verbose: bool,

    /// Keep tool output to a minimum
    pub quiet: bool,

    pub include_status: bool,
    pub include_submodule_update: bool,
    pub include_stash: bool,
    pub include_pull: bool,

    /// Pull with `--no-rebase` (implies a pull step)
    pub no_rebase: bool,

    pub include_diff: bool,
    pub skip_push: bool,

    pub commit: CommitParams,

    /// Files to stage; empty stages everything
    pub stage_paths: Vec<String>,

    /// Resolved push destination; `None` omits the push step
    pub push_target: Option<PushTarget>,
}

impl Configuration {
    /// Check option combinations that cannot be run
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.verbose && self.quiet {
            return Err(ConfigurationError::VerboseAndQuiet);
        }

        if let Some(message) = &self.commit.message {
            if message.trim().is_empty() {
                return Err(ConfigurationError::EmptyCommitMessage);
            }
        }

        if self.stage_paths.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigurationError::EmptyStagePath);
        }

        Ok(())
    }

    /// The commit message the user already typed, if any
    pub fn known_message(&self) -> Option<&str> {
        self.commit.message.as_deref()
    }

    /// Whether a pull step belongs in the pipeline
    pub fn wants_pull(&self) -> bool {
        self.include_pull || self.no_rebase
    }
}
