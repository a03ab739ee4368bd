//! Test: Interruption - Ctrl-C stops the run

use crate::helpers::*;
use meow::core::{Configuration, PipelineStatus, StepKind, StepState};
use meow::execution::Interrupt;
use std::time::Duration;

/// Interrupting a hung command ends the run with 130
#[tokio::test]
async fn test_interrupt_running_step() {
    let config = Configuration {
        include_stash: true,
        include_pull: true,
        ..committing("fix")
    };
    let spawner = ScriptedSpawner::new().hang("pull");
    let (trigger, interrupt) = Interrupt::manual();

    let run = run_pipeline_with(&config, spawner, interrupt, None);
    let interrupt_later = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.trigger();
    };
    let (result, ()) = tokio::time::timeout(Duration::from_secs(5), async {
        tokio::join!(run, interrupt_later)
    })
    .await
    .expect("pipeline should stop after the interrupt");

    assert_eq!(result.outcome.exit_code, 130);
    assert_eq!(result.outcome.state.status, PipelineStatus::Interrupted);
    assert_spawned(&result, &["stash", "pull"]);
    assert_eq!(result.step_state(StepKind::Pull), Some(&StepState::Interrupted));
    assert_eq!(result.step_state(StepKind::Stage), Some(&StepState::Pending));
    assert_eq!(result.outcome.state.completed_steps, 1);
    assert!(result.errors().contains(&"operation cancelled by user"));
    // once when started, once in the cancellation report
    assert_eq!(
        result.commands().iter().filter(|c| **c == "$ git pull").count(),
        2
    );
    assert_eq!(result.commands().last(), Some(&"$ git pull"));
    assert_eq!(
        result.events.last(),
        Some(&Event::PipelineFinished(PipelineStatus::Interrupted))
    );
}

/// The spinner is cleaned up when a step is interrupted
#[tokio::test]
async fn test_interrupt_stops_spinner() {
    let spawner = ScriptedSpawner::new().hang("add");
    let (trigger, interrupt) = Interrupt::manual();

    let config = committing("fix");
    let run = run_pipeline_with(&config, spawner, interrupt, None);
    let interrupt_later = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.trigger();
    };
    let (result, ()) = tokio::join!(run, interrupt_later);

    assert_eq!(result.outcome.exit_code, 130);
    assert_eq!(result.count(&Event::SpinnerStopped), 1);
}

/// An interactive command gets the terminal back when interrupted
#[tokio::test]
async fn test_interrupt_interactive_commit() {
    let config = Configuration {
        skip_push: true,
        ..Default::default()
    };
    let spawner = ScriptedSpawner::new().hang("commit");
    let (trigger, interrupt) = Interrupt::manual();

    let run = run_pipeline_with(&config, spawner, interrupt, None);
    let interrupt_later = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.trigger();
    };
    let (result, ()) = tokio::join!(run, interrupt_later);

    assert_eq!(result.outcome.exit_code, 130);
    assert_eq!(result.count(&Event::TerminalReleased), 1);
    assert_eq!(result.count(&Event::TerminalRestored), 1);
}

/// An interrupt before the first step spawns nothing
#[tokio::test]
async fn test_interrupt_before_start() {
    let (trigger, interrupt) = Interrupt::manual();
    trigger.trigger();

    let result = run_pipeline_with(&committing("fix"), ScriptedSpawner::new(), interrupt, None).await;

    assert_eq!(result.outcome.exit_code, 130);
    assert!(result.calls.is_empty());
    assert!(result
        .pipeline
        .steps
        .iter()
        .all(|s| s.state == StepState::Pending));
}
