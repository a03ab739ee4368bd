//! Test: Success Chain - every step succeeds

use crate::helpers::*;
use meow::core::{Configuration, PushTarget, StepKind, StepState};

/// Status, stage and commit with pushing switched off
#[tokio::test]
async fn test_status_stage_commit() {
    let config = Configuration {
        include_status: true,
        ..committing("fix")
    };

    let result = run_pipeline(&config, ScriptedSpawner::new()).await;

    assert_pipeline_completed(&result);
    assert_spawned(&result, &["status", "add", "commit"]);
    assert_eq!(result.outcome.state.completed_steps, 3);
    assert_eq!(result.outcome.state.total_steps, 3);
    assert_eq!(result.outcome.state.failed_steps, 0);
    assert_eq!(
        result.events.first(),
        Some(&Event::PipelineStarted(vec![
            "status check".to_string(),
            "stage changes".to_string(),
            "commit changes".to_string(),
        ]))
    );
    assert_eq!(
        result.pipeline.completed_steps(),
        vec![StepKind::Status, StepKind::Stage, StepKind::Commit]
    );
}

/// Every optional step switched on runs in the fixed order
#[tokio::test]
async fn test_full_pipeline_order() {
    let config = Configuration {
        include_status: true,
        include_submodule_update: true,
        include_stash: true,
        no_rebase: true,
        include_diff: true,
        skip_push: false,
        push_target: Some(PushTarget::new("origin", "main")),
        ..committing("release")
    };

    let result = run_pipeline(&config, ScriptedSpawner::new()).await;

    assert_pipeline_completed(&result);
    assert_spawned(
        &result,
        &["status", "submodule", "stash", "pull", "add", "diff", "commit", "push"],
    );
    assert_eq!(
        result.call("pull").unwrap().command,
        vec!["git", "pull", "--no-rebase"]
    );
    assert_eq!(
        result.call("push").unwrap().command,
        vec!["git", "push", "origin", "main"]
    );
    // diff never counts as completed
    assert_eq!(result.outcome.state.total_steps, 8);
    assert_eq!(result.outcome.state.completed_steps, 7);
    assert!(result
        .pipeline
        .steps
        .iter()
        .all(|s| s.state == StepState::Completed));
}

/// Each step is announced with its command before it runs
#[tokio::test]
async fn test_steps_announce_commands() {
    let config = Configuration {
        stage_paths: vec!["src/main.rs".to_string(), "notes 2.txt".to_string()],
        ..committing("fix typo")
    };

    let result = run_pipeline(&config, ScriptedSpawner::new()).await;

    assert_pipeline_completed(&result);
    assert_eq!(
        result.commands(),
        vec![
            "$ git add src/main.rs \"notes 2.txt\"",
            "$ git commit -m \"fix typo\"",
        ]
    );
    assert_eq!(
        result.count(&Event::Info("running command:".to_string())),
        2
    );
    assert_eq!(
        result.count(&Event::Success("completed successfully".to_string())),
        2
    );
    assert_eq!(
        result.events.last(),
        Some(&Event::PipelineFinished(meow::core::PipelineStatus::Completed))
    );
}

/// Recognised output is summarised and the commit message is not echoed
#[tokio::test]
async fn test_output_is_classified() {
    let config = Configuration {
        skip_push: false,
        push_target: Some(PushTarget::new("origin", "main")),
        ..committing("fix typo")
    };
    let spawner = ScriptedSpawner::new()
        .output("commit", "[main 1a2b3c4] fix typo\n 1 file changed, 1 insertion(+)\n")
        .output("push", "Everything up-to-date\n");

    let result = run_pipeline(&config, spawner).await;

    assert_pipeline_completed(&result);
    let infos = result.infos();
    assert!(infos.contains(&"everything up-to-date"));
    assert!(!infos.iter().any(|i| i.contains("fix typo")));
}

/// File creation summaries are shown line by line
#[tokio::test]
async fn test_create_mode_lines_are_shown() {
    let spawner = ScriptedSpawner::new().output(
        "commit",
        "[main 9f8e7d6] add cats\n 2 files changed\n create mode 100644 cat.txt\n",
    );

    let result = run_pipeline(&committing("add cats"), spawner).await;

    assert_pipeline_completed(&result);
    assert!(result
        .events
        .contains(&Event::Output(" create mode 100644 cat.txt".to_string())));
    assert!(result
        .events
        .contains(&Event::Output("[main 9f8e7d6] add cats".to_string())));
}

/// Verbose mode passes output through untouched
#[tokio::test]
async fn test_verbose_passes_output_through() {
    let config = Configuration {
        verbose: true,
        ..committing("fix")
    };
    let spawner = ScriptedSpawner::new().output("add", "add 'src/lib.rs'\n");

    let result = run_pipeline(&config, spawner).await;

    assert_eq!(
        result.call("add").unwrap().command,
        vec!["git", "add", ".", "--verbose"]
    );
    assert!(result
        .events
        .contains(&Event::Output("add 'src/lib.rs'".to_string())));
}

/// The spinner is stopped before the step's result is reported
#[tokio::test]
async fn test_spinner_stops_before_result() {
    let result = run_pipeline(&committing("fix"), ScriptedSpawner::new()).await;

    let started = result
        .events
        .iter()
        .filter(|e| matches!(e, Event::SpinnerStarted(_)))
        .count();
    assert_eq!(started, 2);
    assert_eq!(result.count(&Event::SpinnerStopped), 2);

    let stopped_at = result
        .events
        .iter()
        .position(|e| *e == Event::SpinnerStopped)
        .unwrap();
    let success_at = result
        .events
        .iter()
        .position(|e| matches!(e, Event::Success(_)))
        .unwrap();
    assert!(stopped_at < success_at);

    assert!(result
        .events
        .contains(&Event::SpinnerStarted("committing...".to_string())));
    assert!(result
        .events
        .contains(&Event::SpinnerStarted("executing git add ....".to_string())));
}

/// Progress moves through each captured command
#[tokio::test]
async fn test_progress_events() {
    let result = run_pipeline(&committing("fix"), ScriptedSpawner::new()).await;

    let progress: Vec<f64> = result
        .events
        .iter()
        .filter_map(|e| match e {
            Event::Progress(p) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![0.1, 0.5, 1.0, 0.1, 0.5, 1.0]);
    assert!(result.events.contains(&Event::StepsAdvanced {
        completed: 2,
        total: 2
    }));
}
