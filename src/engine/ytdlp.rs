//! yt-dlp subprocess engine
//!
//! Runs yt-dlp with piped output. Progress comes back through a custom
//! `--progress-template` carrying a sentinel prefix and tab-separated
//! fields; completed items come back as one JSON object per line through
//! `--print after_move:`. Everything else yt-dlp writes to stdout is
//! ignored.

use super::{Engine, ItemRecord, ProgressEvent, ProgressHook, ProgressStatus, ResultDescriptor};
use crate::core::{EngineConfig, PostStep};
use crate::error::YtgrabError;
use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Marks progress lines in the engine's stdout
const PROGRESS_SENTINEL: &str = "__ytgrab_progress__";

/// Marks per-item result lines in the engine's stdout
const ITEM_SENTINEL: &str = "__ytgrab_item__";

/// How many trailing stderr lines to keep for error reports
const STDERR_TAIL_LINES: usize = 12;

/// yt-dlp engine collaborator
pub struct YtDlpEngine {
    binary: PathBuf,
}

impl YtDlpEngine {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("yt-dlp"),
        }
    }

    /// Use a specific yt-dlp binary instead of whatever is on PATH
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Template for `--progress-template`: sentinel, then status, percent,
    /// speed, and ETA separated by tabs
    fn progress_template() -> String {
        format!(
            "download:{PROGRESS_SENTINEL}\t%(progress.status)s\t\
             %(progress._percent_str)s\t%(progress._speed_str)s\t%(progress._eta_str)s"
        )
    }

    /// Template for `--print after_move:`: sentinel followed by a JSON
    /// object with the fields [`ItemRecord`] deserializes
    fn item_template() -> String {
        format!("after_move:{ITEM_SENTINEL}%(.{{title,filepath,playlist_title}})j")
    }

    /// Map the synthesized configuration onto yt-dlp's command line
    fn build_args(config: &EngineConfig, target: &str) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            config.output_template.to_string_lossy().into_owned(),
        ];

        if !config.allow_playlist {
            args.push("--no-playlist".to_string());
        }
        if config.restrict_filenames {
            args.push("--restrict-filenames".to_string());
        }
        if config.ignore_errors {
            args.push("--ignore-errors".to_string());
        }
        args.push("--concurrent-fragments".to_string());
        args.push(config.concurrent_fragments.to_string());

        if config.quiet {
            args.push("--quiet".to_string());
        }
        if config.no_warnings {
            args.push("--no-warnings".to_string());
        }

        args.push("-f".to_string());
        args.push(config.format.clone());
        if let Some(container) = &config.merge_output_format {
            args.push("--merge-output-format".to_string());
            args.push(container.clone());
        }

        // Post-processing flags in list order; the engine applies them in
        // the order they describe
        for step in &config.postprocessors {
            match step {
                PostStep::ExtractAudio { codec, quality } => {
                    args.push("-x".to_string());
                    args.push("--audio-format".to_string());
                    args.push(codec.as_str().to_string());
                    args.push("--audio-quality".to_string());
                    args.push(quality.clone());
                }
                PostStep::EmbedMetadata => args.push("--embed-metadata".to_string()),
                PostStep::EmbedThumbnail => args.push("--embed-thumbnail".to_string()),
            }
        }

        args.push("--retries".to_string());
        args.push(config.retries.to_string());
        args.push("--file-access-retries".to_string());
        args.push(config.file_access_retries.to_string());
        args.push("--fragment-retries".to_string());
        args.push(config.fragment_retries.to_string());
        args.push("--socket-timeout".to_string());
        args.push(config.socket_timeout.to_string());

        args.push("--no-check-certificate".to_string());

        // Progress and result reporting; --print implies quiet mode, so
        // --progress forces the hook output back on
        args.push("--progress".to_string());
        args.push("--newline".to_string());
        args.push("--progress-template".to_string());
        args.push(Self::progress_template());
        args.push("--print".to_string());
        args.push(Self::item_template());

        args.push(target.to_string());
        args
    }

    /// Parse one sentinel-prefixed progress line
    ///
    /// Missing fields default to empty strings; a garbled line yields a
    /// degraded event rather than an error, because a reporting fault must
    /// never abort a transfer.
    fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
        let rest = line.strip_prefix(PROGRESS_SENTINEL)?;
        let mut fields = rest.split('\t').skip(1);
        let status = ProgressStatus::parse(fields.next().unwrap_or(""));
        Some(ProgressEvent {
            status,
            percent: fields.next().unwrap_or("").to_string(),
            speed: fields.next().unwrap_or("").to_string(),
            eta: fields.next().unwrap_or("").to_string(),
        })
    }

    /// Parse one sentinel-prefixed item line into a record
    fn parse_item_line(line: &str) -> Option<ItemRecord> {
        let json = line.strip_prefix(ITEM_SENTINEL)?;
        match serde_json::from_str(json) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Unparseable item record from engine: {}", e);
                None
            }
        }
    }

    /// Shape the collected item records into a result descriptor
    fn assemble_result(mut items: Vec<ItemRecord>) -> ResultDescriptor {
        if items.is_empty() {
            return ResultDescriptor::Nothing;
        }
        if items.len() == 1 && items[0].playlist_title.is_none() {
            return ResultDescriptor::Single(items.remove(0));
        }
        let title = items.iter().find_map(|item| item.playlist_title.clone());
        ResultDescriptor::Collection {
            title,
            items: items.into_iter().map(Some).collect(),
        }
    }

    /// Drain a stderr pipe, keeping only the tail for error reports
    async fn collect_stderr_tail(stream: impl AsyncRead + Unpin) -> Vec<String> {
        let mut tail = Vec::new();
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!("engine stderr: {}", line);
            if tail.len() == STDERR_TAIL_LINES {
                tail.remove(0);
            }
            tail.push(line);
        }
        tail
    }
}

impl Default for YtDlpEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for YtDlpEngine {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn probe(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| YtgrabError::EngineMissing(e.to_string()))?;

        if !output.status.success() {
            return Err(YtgrabError::EngineMissing(format!(
                "`{} --version` exited with {}",
                self.binary.display(),
                output.status
            )));
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        info!("yt-dlp is available, version {}", version);
        Ok(version)
    }

    async fn download(
        &self,
        config: &EngineConfig,
        target: &str,
        on_progress: ProgressHook<'_>,
    ) -> Result<ResultDescriptor> {
        let args = Self::build_args(config, target);
        debug!("Spawning {} with args: {:?}", self.binary.display(), args);

        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| YtgrabError::Engine("failed to capture engine stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| YtgrabError::Engine("failed to capture engine stderr".to_string()))?;

        let stderr_task = tokio::spawn(Self::collect_stderr_tail(stderr));

        let mut items = Vec::new();
        let mut lines = BufReader::new(stdout).lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(event) = Self::parse_progress_line(&line) {
                on_progress(&event);
            } else if let Some(record) = Self::parse_item_line(&line) {
                items.push(record);
            }
            // Remaining stdout lines are engine chatter
        }

        let status = child.wait().await?;
        let stderr_tail = stderr_task.await.unwrap_or_default();

        if !status.success() {
            // Under ignore-errors the engine keeps going past failed
            // playlist items but may still exit non-zero; if anything did
            // come through, report what survived instead of failing the run
            if config.ignore_errors && !items.is_empty() {
                warn!("Engine exited with {} after partial success", status);
            } else {
                let detail = if stderr_tail.is_empty() {
                    format!("engine exited with {}", status)
                } else {
                    stderr_tail.join("\n")
                };
                return Err(YtgrabError::Download(detail));
            }
        }

        info!("Engine finished, {} item(s) reported", items.len());
        Ok(Self::assemble_result(items))
    }
}
