//! Command-line interface

pub mod output;
pub mod push_target;
pub mod suggest;
pub mod terminal_output;

use crate::core::{settings::Settings, CommitParams, Configuration, ConfigurationError};
use clap::Parser;
use push_target::PushPreference;
use std::path::PathBuf;

/// Git subcommands that are handed to git unchanged
pub const PASSTHROUGH_COMMANDS: &[&str] = &[
    "push", "pull", "commit", "add", "log", "clone", "branch", "checkout", "status", "fetch",
    "merge", "rebase", "stash",
];

/// Stage, commit and push in one go
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "meow")]
#[command(version)]
#[command(about = "Stage, commit and push your changes in one command", long_about = None)]
pub struct Cli {
    /// Commit message (same as --message)
    #[arg(value_name = "MESSAGE")]
    pub positional_message: Option<String>,

    /// Commit message; without one, git opens your editor
    #[arg(short, long)]
    pub message: Option<String>,

    /// Stage only these files instead of everything
    #[arg(short, long = "add", value_name = "FILES", num_args = 1..)]
    pub add: Vec<String>,

    /// Show `git status` first
    #[arg(short, long)]
    pub status: bool,

    /// Update submodules before anything else
    #[arg(short = 'u', long)]
    pub update_submodules: bool,

    /// Stash local changes before pulling
    #[arg(long)]
    pub stash: bool,

    /// Pull from the remote before committing
    #[arg(short, long)]
    pub pull: bool,

    /// Pull with --no-rebase (implies --pull)
    #[arg(long)]
    pub no_rebase: bool,

    /// Show the staged diff before committing
    #[arg(short, long)]
    pub diff: bool,

    /// Do not push after committing
    #[arg(short, long)]
    pub no_push: bool,

    /// Remote to push to
    #[arg(long)]
    pub remote: Option<String>,

    /// Branch to push
    #[arg(long)]
    pub branch: Option<String>,

    /// Amend the previous commit
    #[arg(long)]
    pub amend: bool,

    /// Skip commit hooks
    #[arg(long)]
    pub no_verify: bool,

    /// Keep going when a step fails
    #[arg(short = 'c', long = "continue")]
    pub continue_on_error: bool,

    /// Print the commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Show all git output
    #[arg(short, long)]
    pub verbose: bool,

    /// Show as little as possible
    #[arg(short, long)]
    pub quiet: bool,

    /// Settings file (defaults to .meow.yaml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// What the user asked for
#[derive(Debug, Clone)]
pub enum Request {
    /// Run `git` with these arguments as-is
    Passthrough(Vec<String>),

    /// Run the pipeline
    Pipeline(Box<Cli>),
}

/// Split passthrough invocations from pipeline runs.
///
/// `args` includes the program name, as `std::env::args` does.
pub fn parse_request(args: Vec<String>) -> Result<Request, clap::Error> {
    if let Some(first) = args.get(1) {
        if PASSTHROUGH_COMMANDS.contains(&first.as_str()) {
            return Ok(Request::Passthrough(args[1..].to_vec()));
        }
    }
    Cli::try_parse_from(args).map(|cli| Request::Pipeline(Box::new(cli)))
}

impl Cli {
    /// The settings file named on the command line
    pub fn config_path(&self) -> Option<&std::path::Path> {
        self.config.as_deref()
    }

    /// Combine flags with `settings` into a validated configuration.
    ///
    /// The push target is left unset; it is resolved separately from
    /// [`Cli::push_preference`].
    pub fn to_configuration(&self, settings: &Settings) -> Result<Configuration, ConfigurationError> {
        let message = match (&self.positional_message, &self.message) {
            (Some(_), Some(_)) => return Err(ConfigurationError::DuplicateCommitMessage),
            (Some(message), None) | (None, Some(message)) => Some(message.clone()),
            (None, None) => None,
        };

        let skip_push = self.no_push || settings.no_push;
        if skip_push {
            if self.remote.is_some() {
                return Err(ConfigurationError::PushTargetWithoutPush("remote"));
            }
            if self.branch.is_some() {
                return Err(ConfigurationError::PushTargetWithoutPush("branch"));
            }
        }

        let config = Configuration {
            continue_on_error: self.continue_on_error || settings.continue_on_error,
            dry_run: self.dry_run,
            verbose: self.verbose || settings.verbose,
            quiet: self.quiet || settings.quiet,
            include_status: self.status || settings.status,
            include_submodule_update: self.update_submodules || settings.update_submodules,
            include_stash: self.stash || settings.stash,
            include_pull: self.pull || settings.pull,
            no_rebase: self.no_rebase || settings.no_rebase,
            include_diff: self.diff || settings.diff,
            skip_push,
            commit: CommitParams {
                message,
                amend: self.amend,
                no_verify: self.no_verify,
            },
            stage_paths: self.add.clone(),
            push_target: None,
        };

        config.validate()?;
        Ok(config)
    }

    /// Requested push destination; `None` when pushing is switched off
    pub fn push_preference(&self, settings: &Settings) -> Option<PushPreference> {
        if self.no_push || settings.no_push {
            return None;
        }
        Some(PushPreference {
            remote: self.remote.clone().or_else(|| settings.remote.clone()),
            branch: self.branch.clone().or_else(|| settings.branch.clone()),
        })
    }
}
