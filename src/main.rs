//! # zjxc_rss
//!
//! Mirrors the 浙江宣传 news column on zjnews.zjol.com.cn as an RSS 2.0
//! feed for a site that publishes no native feed. One run fetches the
//! column's index page, extracts article metadata (title, link,
//! publication time), and rewrites the configured output file.
//!
//! ## Usage
//!
//! ```sh
//! zjxc_rss -c ./zjxc.yaml
//! ```
//!
//! Intended to be re-invoked periodically by an external scheduler (cron
//! or similar); a run that fails leaves the previous output file in place
//! and exits non-zero so the scheduler can observe it.
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: Download the index page with a browser-like identity
//! 2. **Extraction**: Enumerate `ul.listUl` and pull out raw item triples
//! 3. **Normalization**: Absolutize links, parse locale timestamps, drop
//!    items that don't parse
//! 4. **Output**: Sort newest-first, truncate, and write the RSS document

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::FeedConfig;
use error::PipelineError;
use utils::ensure_writable_parent;

#[tokio::main]
#[instrument]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("zjxc_rss starting up");

    // Parse CLI and resolve configuration
    let args = Cli::parse();
    debug!(?args.config, ?args.output, ?args.max_articles, "Parsed CLI arguments");

    let mut config = match FeedConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration is unusable; nothing was fetched");
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli(&args);
    debug!(?config, "Resolved configuration");

    // Early check: ensure the output location is writable before spending
    // a network request on a run that could never be persisted.
    if let Err(e) = ensure_writable_parent(&config.output_path).await {
        error!(
            path = %config.output_path,
            error = %e,
            "Output location is not writable (fix perms or choose a different path)"
        );
        return ExitCode::FAILURE;
    }

    // ---- Fetch, extract, normalize ----
    let articles = match pipeline::run(&config).await {
        Ok(articles) => articles,
        Err(e) => {
            report_failure(&e);
            return ExitCode::FAILURE;
        }
    };

    // ---- Emit ----
    if let Err(e) = outputs::rss::write_feed(&articles, &config).await {
        report_failure(&PipelineError::from(e));
        return ExitCode::FAILURE;
    }

    let absolute_path = std::fs::canonicalize(&config.output_path)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| config.output_path.clone());

    let elapsed = start_time.elapsed();
    info!(
        entries = articles.len(),
        path = %absolute_path,
        ?elapsed,
        "Feed written; open it in an RSS reader to verify"
    );

    ExitCode::SUCCESS
}

/// Emit the per-stage diagnostic for a failed run.
///
/// Each failure mode gets a distinct message pointing the operator at the
/// thing that actually broke: the network, the site's markup, the site's
/// content, or the local filesystem.
fn report_failure(e: &PipelineError) {
    match e {
        PipelineError::Fetch(cause) => {
            error!(error = %cause, "Fetch failed; check the network or the target URL");
        }
        PipelineError::Layout(cause) => {
            error!(error = %cause, "Structural parse failed; check whether the site was redesigned");
        }
        PipelineError::NoContent => {
            error!("Site reachable and list present, but no usable articles survived; no feed written");
        }
        PipelineError::Emit(cause) => {
            error!(error = %cause, "Feed emission failed; the previous output file (if any) is untouched");
        }
    }
}
