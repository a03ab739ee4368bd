//! Core domain models
//!
//! Configuration, steps, the step policy that builds a pipeline, and the
//! state the orchestrator tracks while running it.

pub mod config;
pub mod pipeline;
pub mod policy;
pub mod settings;
pub mod state;
pub mod step;

pub use config::*;
pub use pipeline::*;
pub use policy::build_steps;
pub use state::*;
pub use step::*;
