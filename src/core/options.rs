//! Validated download preferences

use clap::ValueEnum;
use std::path::PathBuf;

/// Target audio codec for extraction in audio mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AudioFormat {
    Mp3,
    M4a,
    Aac,
    Opus,
    Vorbis,
    Wav,
    Flac,
}

impl AudioFormat {
    /// Codec name as the engine spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4a => "m4a",
            AudioFormat::Aac => "aac",
            AudioFormat::Opus => "opus",
            AudioFormat::Vorbis => "vorbis",
            AudioFormat::Wav => "wav",
            AudioFormat::Flac => "flac",
        }
    }
}

/// Download mode
///
/// A closed two-variant choice: audio extraction and video download carry
/// different knobs, and exactly one of them applies to a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Audio-only download, converted to the given codec
    Audio {
        format: AudioFormat,
        /// Bitrate/quality for conversion, 0 means best
        quality: u32,
    },
    /// Video download, optionally capped at a maximum height
    Video { max_height: Option<u32> },
}

/// Everything the user asked for, validated and immutable
///
/// Constructed once from CLI arguments and handed to the configuration
/// synthesizer; nothing downstream mutates it.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Video or playlist URL
    pub url: String,
    /// Output directory, may start with `~`
    pub output_dir: PathBuf,
    /// Filename template in the engine's outtmpl syntax
    pub template: String,
    pub mode: Mode,
    /// Allow the engine to expand playlists
    pub allow_playlist: bool,
    /// Restrict file names to ASCII and safe characters
    pub safe_names: bool,
    /// Continue past per-item failures in playlists
    pub ignore_errors: bool,
    pub embed_metadata: bool,
    pub embed_thumbnail: bool,
    /// Retry count, fanned out to all engine retry knobs
    pub retries: u32,
    /// Socket timeout in seconds
    pub socket_timeout: u32,
    /// Concurrent fragment downloads for segmented streams
    pub concurrent_fragments: u32,
    /// Suppress engine chatter (our own progress line still shows)
    pub quiet: bool,
}

impl DownloadOptions {
    /// Options for a URL with the stock defaults: video mode, no height cap,
    /// `./downloads`, five retries
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            output_dir: PathBuf::from("./downloads"),
            template: "%(title)s.%(ext)s".to_string(),
            mode: Mode::Video { max_height: None },
            allow_playlist: false,
            safe_names: false,
            ignore_errors: false,
            embed_metadata: false,
            embed_thumbnail: false,
            retries: 5,
            socket_timeout: 30,
            concurrent_fragments: 4,
            quiet: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_format_names() {
        assert_eq!(AudioFormat::Mp3.as_str(), "mp3");
        assert_eq!(AudioFormat::Vorbis.as_str(), "vorbis");
        assert_eq!(AudioFormat::Flac.as_str(), "flac");
    }

    #[test]
    fn test_default_options() {
        let opts = DownloadOptions::for_url("https://example.com/watch?v=abc");
        assert_eq!(opts.mode, Mode::Video { max_height: None });
        assert_eq!(opts.retries, 5);
        assert_eq!(opts.socket_timeout, 30);
        assert_eq!(opts.concurrent_fragments, 4);
        assert!(!opts.allow_playlist);
    }
}
