//! Main entry point for the ytgrab CLI

use clap::Parser;
use colored::Colorize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ytgrab::cli::{print_summary, Args, ProgressReporter};
use ytgrab::core::run;
use ytgrab::engine::Engine;
use ytgrab::{YtDlpEngine, YtgrabError};

#[tokio::main]
async fn main() {
    init_logging();

    // The engine collaborator is checked before argument handling so a
    // missing install is reported regardless of how the tool was called
    let engine = YtDlpEngine::new();
    if let Err(e) = engine.probe().await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        eprintln!("Install yt-dlp with:\n  pip install -U yt-dlp\nor (macOS) brew install yt-dlp");
        std::process::exit(1);
    }

    let args = Args::parse();
    debug!("Parsed args: {:?}", args);
    let opts = args.into_options();
    info!("Starting download for {}", opts.url);

    let reporter = ProgressReporter::new();
    match run(&engine, &opts, &|event| reporter.report(event)).await {
        Ok(result) => print_summary(&result),
        Err(e @ YtgrabError::Download(_)) => {
            eprintln!("\n{} {}", "Download error:".red().bold(), e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("\n{} {}", "Unexpected error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Initialize logging system
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
