//! Engine configuration synthesis
//!
//! Maps validated [`DownloadOptions`] to the one-shot [`EngineConfig`] the
//! download engine consumes: format-selection expression with fallback
//! chain, ordered post-processing steps, and retry/timeout fan-out. Pure and
//! deterministic; all inputs are validated by argument parsing.

use crate::core::options::{AudioFormat, DownloadOptions, Mode};
use crate::utils::expand_user;
use std::path::PathBuf;

/// Format expression for audio mode: best audio-only stream, else best anything
pub const AUDIO_FORMAT_EXPR: &str = "bestaudio/best";

/// A post-processing step, applied by the engine after raw transfer
///
/// List order is load-bearing: extraction changes the artifact the embed
/// steps operate on, so extraction must come first and metadata before
/// thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostStep {
    /// Convert the fetched artifact to an audio file with ffmpeg
    ExtractAudio {
        codec: AudioFormat,
        /// Quality passed through as a string; "0" is the engine's
        /// best-quality sentinel, not interpreted here
        quality: String,
    },
    EmbedMetadata,
    EmbedThumbnail,
}

/// One-shot engine configuration, never mutated after synthesis
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Home-expanded output directory joined with the filename template;
    /// template placeholders like `%(title)s` are the engine's business
    pub output_template: PathBuf,
    pub allow_playlist: bool,
    pub restrict_filenames: bool,
    pub ignore_errors: bool,
    pub concurrent_fragments: u32,
    pub quiet: bool,
    /// Always set together with `quiet`: quiet runs suppress engine
    /// warnings too, without touching our own progress line
    pub no_warnings: bool,
    /// Priority-ordered format-selection expression, evaluated left to
    /// right by the engine; first satisfiable alternative wins
    pub format: String,
    /// Container to remux into when video and audio arrive as separate
    /// streams; video mode only
    pub merge_output_format: Option<String>,
    /// Post-processing steps in application order
    pub postprocessors: Vec<PostStep>,
    pub retries: u32,
    pub file_access_retries: u32,
    pub fragment_retries: u32,
    pub socket_timeout: u32,
}

/// Build the format expression for video mode
///
/// Three-tier fallback: best separate mp4 video + m4a audio (honoring the
/// height cap when given), then best pre-muxed mp4, then best of anything.
fn video_format_expr(max_height: Option<u32>) -> String {
    match max_height {
        Some(height) => format!(
            "bestvideo[ext=mp4][height<={height}]+bestaudio[ext=m4a]/best[ext=mp4]/best"
        ),
        None => "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best".to_string(),
    }
}

/// Synthesize the engine configuration from validated options
pub fn build_config(opts: &DownloadOptions) -> EngineConfig {
    let output_template = expand_user(&opts.output_dir).join(&opts.template);

    let (format, merge_output_format, postprocessors) = match &opts.mode {
        Mode::Audio { format, quality } => {
            let mut steps = vec![PostStep::ExtractAudio {
                codec: *format,
                quality: quality.to_string(),
            }];
            if opts.embed_metadata {
                steps.push(PostStep::EmbedMetadata);
            }
            if opts.embed_thumbnail {
                steps.push(PostStep::EmbedThumbnail);
            }
            (AUDIO_FORMAT_EXPR.to_string(), None, steps)
        }
        Mode::Video { max_height } => {
            let mut steps = Vec::new();
            if opts.embed_metadata {
                steps.push(PostStep::EmbedMetadata);
            }
            if opts.embed_thumbnail {
                steps.push(PostStep::EmbedThumbnail);
            }
            (
                video_format_expr(*max_height),
                Some("mp4".to_string()),
                steps,
            )
        }
    };

    EngineConfig {
        output_template,
        allow_playlist: opts.allow_playlist,
        restrict_filenames: opts.safe_names,
        ignore_errors: opts.ignore_errors,
        concurrent_fragments: opts.concurrent_fragments,
        quiet: opts.quiet,
        no_warnings: opts.quiet,
        format,
        merge_output_format,
        postprocessors,
        // One user-facing knob fans out to the engine's three retry counts
        retries: opts.retries,
        file_access_retries: opts.retries,
        fragment_retries: opts.retries,
        socket_timeout: opts.socket_timeout,
    }
}
