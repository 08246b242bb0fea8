//! Error taxonomy for the feed pipeline.
//!
//! Two families of errors exist and must never be confused:
//!
//! - **Per-run errors** ([`PipelineError`], [`ConfigError`]): abort the
//!   current run before any output file is touched. The scheduler sees a
//!   non-zero exit and a diagnostic naming the failed stage.
//! - **Per-item errors** ([`TimeParseError`]): drop the offending list item
//!   and continue. A run never fails because one article carried a
//!   malformed timestamp.

use std::path::PathBuf;
use thiserror::Error;

/// The index page could not be fetched.
///
/// Network failures, timeouts, non-success HTTP statuses, and body read
/// failures all collapse into this one error; the transport cause is
/// preserved for the diagnostic.
#[derive(Error, Debug)]
#[error("failed to fetch index page: {0}")]
pub struct FetchError(#[from] pub reqwest::Error);

/// The expected article list container is missing from the page.
///
/// Distinct from [`FetchError`] so the operator knows to check the site's
/// markup, not the network.
#[derive(Error, Debug)]
#[error("article list container `ul.listUl` not found; the page layout may have changed")]
pub struct LayoutError;

/// One item's timestamp does not match the `YYYY年MM月DD日HH时` layout.
#[derive(Error, Debug)]
pub enum TimeParseError {
    /// The marker-stripped text did not split into a date part and an hour part.
    #[error("timestamp `{0}` does not match the YYYY年MM月DD日HH时 layout")]
    Layout(String),

    /// The date part failed calendar validation (wrong digit count, month 13, ...).
    #[error("invalid calendar date in timestamp: {0}")]
    Date(#[from] chrono::ParseError),

    /// The hour part was not a number or was outside 0..=23.
    #[error("invalid hour `{0}` in timestamp")]
    Hour(String),
}

/// The rendered feed could not be written to disk.
#[derive(Error, Debug)]
#[error("failed to write feed to {}: {source}", path.display())]
pub struct EmitError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// The configuration file could not be loaded or failed validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("target_url `{0}` is not a well-formed absolute URL")]
    InvalidTargetUrl(String),

    #[error("utc_offset_hours {0} is outside the representable -23..=23 range")]
    InvalidOffset(i32),
}

/// A whole run failed; no output file is produced.
///
/// Each variant is a distinct, loggable outcome for the operator: a fetch
/// failure points at the network, a layout failure at the site, `NoContent`
/// at the extraction yield, and an emit failure at the filesystem.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// The site was reachable and well-formed, but nothing usable was found.
    #[error("no publishable articles survived extraction")]
    NoContent,

    #[error(transparent)]
    Emit(#[from] EmitError),
}
