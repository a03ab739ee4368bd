//! Step policy - which steps run and with what command

use crate::core::{
    config::{CommitParams, Configuration},
    step::{Step, StepKind},
};

fn git(args: &[&str]) -> Vec<String> {
    std::iter::once("git")
        .chain(args.iter().copied())
        .map(String::from)
        .collect()
}

/// Build the ordered list of steps for a run.
///
/// The order is always status, submodules, stash, pull, stage, diff, commit,
/// push; the configuration only decides which of them are present. Stage and
/// commit are always included.
pub fn build_steps(config: &Configuration) -> Vec<Step> {
    let mut steps = Vec::new();

    if config.include_status {
        steps.push(Step::new(StepKind::Status, git(&["status"])).without_progress());
    }

    if config.include_submodule_update {
        steps.push(Step::new(
            StepKind::Submodules,
            git(&["submodule", "update", "--init", "--recursive"]),
        ));
    }

    if config.include_stash {
        steps.push(Step::new(StepKind::Stash, git(&["stash"])));
    }

    if config.wants_pull() {
        steps.push(Step::new(StepKind::Pull, pull_command(config)));
    }

    steps.push(Step::new(StepKind::Stage, stage_command(config)));

    if config.include_diff {
        steps.push(
            Step::new(StepKind::Diff, git(&["diff", "--staged"]))
                .advisory()
                .streamed()
                .without_progress(),
        );
    }

    steps.push(Step::new(StepKind::Commit, commit_command(&config.commit)));

    if let Some(command) = push_command(config) {
        steps.push(Step::new(StepKind::Push, command));
    }

    steps
}

fn pull_command(config: &Configuration) -> Vec<String> {
    let mut command = git(&["pull"]);
    if config.no_rebase {
        command.push("--no-rebase".to_string());
    }
    command
}

fn stage_command(config: &Configuration) -> Vec<String> {
    let mut command = git(&["add"]);
    if config.stage_paths.is_empty() {
        command.push(".".to_string());
    } else {
        command.extend(config.stage_paths.iter().cloned());
    }
    if config.verbose && !config.quiet {
        command.push("--verbose".to_string());
    }
    command
}

/// `git commit` with the configured message, or bare to open the editor
pub fn commit_command(params: &CommitParams) -> Vec<String> {
    let mut command = git(&["commit"]);
    if params.amend {
        command.push("--amend".to_string());
    }
    if params.no_verify {
        command.push("--no-verify".to_string());
    }
    if let Some(message) = &params.message {
        command.push("-m".to_string());
        command.push(message.clone());
    }
    command
}

fn push_command(config: &Configuration) -> Option<Vec<String>> {
    if config.skip_push {
        return None;
    }
    let target = config.push_target.as_ref()?;
    if target.remote.is_empty() || target.branch.is_empty() {
        return None;
    }
    let mut command = git(&["push"]);
    command.push(target.remote.clone());
    command.push(target.branch.clone());
    Some(command)
}
