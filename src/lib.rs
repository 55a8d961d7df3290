//! # ytgrab - yt-dlp front end
//!
//! Download videos or audio through the yt-dlp engine from the command line.
//!
//! ## Features
//!
//! - Audio or video mode with tiered format fallback chains
//! - Ordered post-processing (audio extraction, metadata, thumbnails)
//! - Playlist support with per-item error tolerance
//! - Single-line live progress rendering
//! - Configurable retry and timeout fan-out
//!
//! ## Example
//!
//! ```rust,no_run
//! use ytgrab::core::{run, DownloadOptions};
//! use ytgrab::engine::YtDlpEngine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let opts = DownloadOptions::for_url("VIDEO_URL");
//!     let engine = YtDlpEngine::new();
//!     let result = run(&engine, &opts, &|_event| {}).await?;
//!     println!("{:?}", result);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod engine;
pub mod error;
pub mod utils;

// Re-export main types
pub use core::{build_config, run, AudioFormat, DownloadOptions, EngineConfig, Mode, PostStep};
pub use engine::{Engine, ProgressEvent, ResultDescriptor, YtDlpEngine};
pub use error::YtgrabError;

/// Result type alias for ytgrab operations
pub type Result<T> = std::result::Result<T, YtgrabError>;
