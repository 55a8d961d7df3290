//! Command line argument parsing

use crate::core::{AudioFormat, DownloadOptions, Mode};
use clap::Parser;
use std::path::PathBuf;

/// Download videos or audio through the yt-dlp engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Video or playlist URL
    pub url: String,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = "./downloads")]
    pub output: PathBuf,

    /// Filename template (engine outtmpl syntax)
    #[arg(short, long, value_name = "TEMPLATE", default_value = "%(title)s.%(ext)s")]
    pub template: String,

    /// Reduce engine output (our progress line still shows)
    #[arg(short, long)]
    pub quiet: bool,

    /// Download audio only
    #[arg(long, group = "mode")]
    pub audio: bool,

    /// Download video (default)
    #[arg(long, group = "mode")]
    pub video: bool,

    /// Audio format when using --audio
    #[arg(long, value_enum, default_value = "mp3")]
    pub audio_format: AudioFormat,

    /// Audio bitrate/quality for conversion (0 = best)
    #[arg(long, default_value = "0")]
    pub audio_quality: u32,

    /// Max video height (e.g., 1080)
    #[arg(short, long, value_name = "HEIGHT")]
    pub resolution: Option<u32>,

    /// Allow playlist downloads
    #[arg(long)]
    pub allow_playlist: bool,

    /// Restrict file names to ASCII and safe characters
    #[arg(long)]
    pub safe_names: bool,

    /// Continue on download errors in playlists
    #[arg(long)]
    pub ignore_errors: bool,

    /// Embed metadata tags
    #[arg(long)]
    pub embed_meta: bool,

    /// Embed thumbnail into the media file (needs ffmpeg)
    #[arg(long)]
    pub embed_thumb: bool,

    /// Number of retries for network errors
    #[arg(long, default_value = "5")]
    pub retries: u32,

    /// Socket timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value = "30")]
    pub timeout: u32,

    /// Concurrent fragment downloads for DASH/HLS
    #[arg(long, default_value = "4")]
    pub concurrent: u32,
}

impl Args {
    /// Fold the parsed flags into validated download options
    ///
    /// The `--audio`/`--video` pair collapses into [`Mode`]; the audio
    /// format and quality only travel along in audio mode, and the height
    /// cap only in video mode.
    pub fn into_options(self) -> DownloadOptions {
        let mode = if self.audio {
            Mode::Audio {
                format: self.audio_format,
                quality: self.audio_quality,
            }
        } else {
            Mode::Video {
                max_height: self.resolution,
            }
        };

        DownloadOptions {
            url: self.url,
            output_dir: self.output,
            template: self.template,
            mode,
            allow_playlist: self.allow_playlist,
            safe_names: self.safe_names,
            ignore_errors: self.ignore_errors,
            embed_metadata: self.embed_meta,
            embed_thumbnail: self.embed_thumb,
            retries: self.retries,
            socket_timeout: self.timeout,
            concurrent_fragments: self.concurrent,
            quiet: self.quiet,
        }
    }
}
