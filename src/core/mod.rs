//! Core logic: options, configuration synthesis, run orchestration

pub mod config;
pub mod options;
pub mod orchestrator;

pub use config::*;
pub use options::*;
pub use orchestrator::*;
