//! Scenario-based tests for meow

mod dry_run;
mod interruption;
mod success_chain;
