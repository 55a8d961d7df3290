//! Download engine boundary
//!
//! The actual fetch, muxing, and embedding are delegated to an external
//! engine (yt-dlp + ffmpeg). Its whole contract with this crate is the
//! [`Engine`] trait: take a synthesized [`EngineConfig`] and a target,
//! stream [`ProgressEvent`]s to a callback during transfer, and come back
//! with a [`ResultDescriptor`] or a failure.

pub mod ytdlp;

pub use ytdlp::*;

use crate::core::EngineConfig;
use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

/// Transfer state carried by a progress event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    /// Bytes are moving
    Downloading,
    /// Raw transfer done, post-processing starts
    Finished,
    /// Anything else the engine emits; ignored
    Other,
}

impl ProgressStatus {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "downloading" => ProgressStatus::Downloading,
            "finished" => ProgressStatus::Finished,
            _ => ProgressStatus::Other,
        }
    }
}

/// A progress event as emitted by the engine during transfer
///
/// Percent, speed, and ETA arrive pre-formatted; they are opaque display
/// strings and never parsed or validated here.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub status: ProgressStatus,
    pub percent: String,
    pub speed: String,
    pub eta: String,
}

/// Progress callback handed into the engine call
///
/// Invoked synchronously, potentially many times per second, from whatever
/// context the engine chooses. Implementations must not block and must
/// never panic.
pub type ProgressHook<'a> = &'a (dyn Fn(&ProgressEvent) + Send + Sync);

/// One downloaded item as reported back by the engine
///
/// The engine alone knows the final template-expanded, extension-resolved
/// path, so filename resolution is its job, not ours.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemRecord {
    pub title: Option<String>,
    pub filepath: Option<PathBuf>,
    /// Set when the item was fetched as part of a playlist
    pub playlist_title: Option<String>,
}

/// What an engine invocation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultDescriptor {
    /// Nothing was downloaded
    Nothing,
    /// A single item
    Single(ItemRecord),
    /// A playlist or other collection; absent entries are items skipped
    /// under the ignore-errors policy
    Collection {
        title: Option<String>,
        items: Vec<Option<ItemRecord>>,
    },
}

/// External download engine collaborator
#[async_trait]
pub trait Engine: Send + Sync {
    /// Engine name for messages and logs
    fn name(&self) -> &'static str;

    /// Check that the engine is available, returning its version string
    async fn probe(&self) -> Result<String>;

    /// Perform one download: blocking from the caller's perspective,
    /// progress streamed through `on_progress` while the call runs
    async fn download(
        &self,
        config: &EngineConfig,
        target: &str,
        on_progress: ProgressHook<'_>,
    ) -> Result<ResultDescriptor>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_status_parse() {
        assert_eq!(
            ProgressStatus::parse("downloading"),
            ProgressStatus::Downloading
        );
        assert_eq!(ProgressStatus::parse("finished"), ProgressStatus::Finished);
        assert_eq!(ProgressStatus::parse("error"), ProgressStatus::Other);
        assert_eq!(ProgressStatus::parse(""), ProgressStatus::Other);
    }
}
