//! Output generation for the rendered feed.
//!
//! # Submodules
//!
//! - [`rss`]: Builds the RSS 2.0 channel from articles and writes it to
//!   the configured path
//!
//! The run either replaces the output file wholesale or leaves it
//! untouched; there is no partial or append-style output.

pub mod rss;
