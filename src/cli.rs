//! Command-line interface definitions for the feed mirror.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The binary is designed to be driven by an external scheduler (cron,
//! systemd timer), so the surface is deliberately small: a config file path
//! and a couple of per-run overrides.

use clap::Parser;

/// Command-line arguments for the zjxc_rss application.
///
/// Everything else (target URL, channel metadata, time zone offset, request
/// timeout) lives in the YAML config file; see [`crate::config::FeedConfig`]
/// for the full surface and its defaults.
///
/// # Examples
///
/// ```sh
/// # Run with built-in defaults (writes docs/rss.xml)
/// zjxc_rss
///
/// # Run with a config file
/// zjxc_rss -c ./zjxc.yaml
///
/// # Override the output path for this run only
/// zjxc_rss -c ./zjxc.yaml -o /var/www/feeds/zjxc.xml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the configured output path for this run
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override the configured maximum number of feed entries
    #[arg(long)]
    pub max_articles: Option<usize>,
}
