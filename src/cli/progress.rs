//! Live progress rendering
//!
//! The engine invokes the reporter from inside its blocking call, possibly
//! many times per second. Rendering is pure string formatting; the write
//! path swallows errors, because a reporting fault must never abort a
//! running transfer.

use crate::engine::{ProgressEvent, ProgressStatus};
use std::io::{self, Write};

/// Stateless progress line renderer
///
/// Downloading events overwrite a single status line in place; a finished
/// event prints the transition into post-processing.
pub struct ProgressReporter;

impl ProgressReporter {
    pub fn new() -> Self {
        Self
    }

    /// Render an event to its display text, if it has one
    ///
    /// Downloading lines start with a carriage return and carry no trailing
    /// newline so the next event overwrites them.
    pub fn render(event: &ProgressEvent) -> Option<String> {
        match event.status {
            ProgressStatus::Downloading => Some(format!(
                "\rDownloading: {:>6}  Speed: {:>8}  ETA: {:>6}",
                event.percent.trim(),
                event.speed.trim(),
                event.eta.trim()
            )),
            ProgressStatus::Finished => {
                Some("\nDownload finished, post-processing...\n".to_string())
            }
            ProgressStatus::Other => None,
        }
    }

    /// Write the event to stdout, flushed immediately
    pub fn report(&self, event: &ProgressEvent) {
        if let Some(text) = Self::render(event) {
            let mut out = io::stdout();
            let _ = out.write_all(text.as_bytes());
            let _ = out.flush();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
