//! Utility functions for ytgrab

pub mod path;

pub use path::*;
