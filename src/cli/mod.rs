//! Command line interface for ytgrab

pub mod args;
pub mod progress;
pub mod summary;

pub use args::Args;
pub use progress::ProgressReporter;
pub use summary::print_summary;
