//! Test: Dry Run - commands are listed, nothing is spawned

use crate::helpers::*;
use meow::core::{CommitParams, Configuration, PushTarget};

fn everything() -> Configuration {
    Configuration {
        dry_run: true,
        include_status: true,
        include_submodule_update: true,
        include_stash: true,
        include_pull: true,
        include_diff: true,
        push_target: Some(PushTarget::new("origin", "main")),
        commit: CommitParams {
            message: Some("fix typo".to_string()),
            amend: true,
            no_verify: true,
        },
        ..Default::default()
    }
}

/// A full dry run never spawns a process
#[tokio::test]
async fn test_dry_run_spawns_nothing() {
    let spawner = ScriptedSpawner::new().fail("push", 1, "would fail if it ran");

    let result = run_pipeline(&everything(), spawner).await;

    assert_pipeline_completed(&result);
    assert!(result.calls.is_empty());
    assert_eq!(result.outcome.state.total_steps, 8);
    assert_eq!(result.outcome.state.completed_steps, 7);
}

/// Each command is printed exactly as it would run
#[tokio::test]
async fn test_dry_run_lists_commands() {
    let result = run_pipeline(&everything(), ScriptedSpawner::new()).await;

    assert_eq!(
        result.commands(),
        vec![
            "git status",
            "git submodule update --init --recursive",
            "git stash",
            "git pull",
            "git add .",
            "git diff --staged",
            "git commit --amend --no-verify -m \"fix typo\"",
            "git push origin main",
        ]
    );
    assert!(!result.infos().contains(&"running command:"));
}

/// No spinner or terminal hand-over without a process
#[tokio::test]
async fn test_dry_run_has_no_overlays() {
    let result = run_pipeline(&everything(), ScriptedSpawner::new()).await;

    assert!(!result
        .events
        .iter()
        .any(|e| matches!(e, Event::SpinnerStarted(_) | Event::TerminalReleased)));
}

/// An editor commit is not opened in a dry run
#[tokio::test]
async fn test_dry_run_interactive_commit() {
    let config = Configuration {
        dry_run: true,
        skip_push: true,
        ..Default::default()
    };

    let result = run_pipeline(&config, ScriptedSpawner::new()).await;

    assert_pipeline_completed(&result);
    assert!(result.calls.is_empty());
    assert_eq!(result.commands(), vec!["git add .", "git commit"]);
    assert_eq!(result.outcome.state.completed_steps, 2);
}
