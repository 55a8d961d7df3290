//! Download run orchestration
//!
//! One engine invocation per run: prepare the output directory, synthesize
//! the configuration, hand both to the engine, and return whatever it
//! reports. Retries live inside the engine per the configured counts, not
//! here.

use crate::core::config::build_config;
use crate::core::options::DownloadOptions;
use crate::engine::{Engine, ProgressHook, ResultDescriptor};
use crate::utils::expand_user;
use crate::Result;
use tracing::{debug, info};

/// Run one download against the given engine
///
/// Creates the output directory (with parents) if needed; doing so is
/// idempotent. The engine call blocks until the transfer and all
/// post-processing are done, streaming progress through `on_progress`.
pub async fn run(
    engine: &dyn Engine,
    opts: &DownloadOptions,
    on_progress: ProgressHook<'_>,
) -> Result<ResultDescriptor> {
    let output_dir = expand_user(&opts.output_dir);
    tokio::fs::create_dir_all(&output_dir).await?;
    debug!("Output directory ready: {}", output_dir.display());

    let config = build_config(opts);
    info!("Invoking {} for {}", engine.name(), opts.url);

    engine.download(&config, &opts.url, on_progress).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;
    use crate::engine::{ItemRecord, ProgressEvent, ProgressStatus};
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Engine stand-in that records the configuration it was handed
    struct RecordingEngine {
        seen: Mutex<Vec<EngineConfig>>,
        result: ResultDescriptor,
    }

    impl RecordingEngine {
        fn returning(result: ResultDescriptor) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                result,
            }
        }
    }

    #[async_trait]
    impl Engine for RecordingEngine {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn probe(&self) -> Result<String> {
            Ok("test".to_string())
        }

        async fn download(
            &self,
            config: &EngineConfig,
            _target: &str,
            on_progress: ProgressHook<'_>,
        ) -> Result<ResultDescriptor> {
            self.seen.lock().unwrap().push(config.clone());
            on_progress(&ProgressEvent {
                status: ProgressStatus::Downloading,
                percent: "100%".to_string(),
                speed: "1.0MiB/s".to_string(),
                eta: "00:00".to_string(),
            });
            Ok(self.result.clone())
        }
    }

    #[tokio::test]
    async fn test_run_creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = DownloadOptions::for_url("url");
        opts.output_dir = dir.path().join("nested").join("out");

        let engine = RecordingEngine::returning(ResultDescriptor::Nothing);
        let result = run(&engine, &opts, &|_| {}).await.unwrap();
        assert_eq!(result, ResultDescriptor::Nothing);
        assert!(opts.output_dir.is_dir());
    }

    #[tokio::test]
    async fn test_run_is_idempotent_over_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = DownloadOptions::for_url("url");
        opts.output_dir = dir.path().to_path_buf();

        let engine = RecordingEngine::returning(ResultDescriptor::Nothing);
        run(&engine, &opts, &|_| {}).await.unwrap();
        run(&engine, &opts, &|_| {}).await.unwrap();
        assert_eq!(engine.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_run_hands_synthesized_config_to_engine() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = DownloadOptions::for_url("url");
        opts.output_dir = dir.path().to_path_buf();
        opts.retries = 3;

        let item = ItemRecord {
            title: Some("Clip".to_string()),
            filepath: Some(PathBuf::from("/tmp/Clip.mp4")),
            playlist_title: None,
        };
        let engine = RecordingEngine::returning(ResultDescriptor::Single(item.clone()));
        let result = run(&engine, &opts, &|_| {}).await.unwrap();
        assert_eq!(result, ResultDescriptor::Single(item));

        let seen = engine.seen.lock().unwrap();
        assert_eq!(seen[0].fragment_retries, 3);
        assert_eq!(
            seen[0].output_template,
            dir.path().join("%(title)s.%(ext)s")
        );
    }

    #[tokio::test]
    async fn test_run_passes_engine_failures_through_unchanged() {
        struct FailingEngine;

        #[async_trait]
        impl Engine for FailingEngine {
            fn name(&self) -> &'static str {
                "failing"
            }
            async fn probe(&self) -> Result<String> {
                Ok("test".to_string())
            }
            async fn download(
                &self,
                _config: &EngineConfig,
                _target: &str,
                _on_progress: ProgressHook<'_>,
            ) -> Result<ResultDescriptor> {
                Err(crate::YtgrabError::Download("no formats".to_string()))
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let mut opts = DownloadOptions::for_url("url");
        opts.output_dir = dir.path().to_path_buf();

        let err = run(&FailingEngine, &opts, &|_| {}).await.unwrap_err();
        assert!(err.is_download_error());
    }
}
