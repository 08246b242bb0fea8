//! Data models for scraped list items and feed-ready articles.
//!
//! This module defines the two records the pipeline moves between:
//! - [`RawItem`]: the unprocessed triple pulled from one `li.listLi`
//! - [`Article`]: the normalized, validated record ready for feed emission
//!
//! A `RawItem` is a pure extraction artifact: nothing about it is trusted
//! yet. An `Article` is constructed exactly once from a `RawItem` by the
//! pipeline, is never mutated afterwards, and only exists for the duration
//! of a run; the rendered feed file is the only thing that persists.

use chrono::{DateTime, FixedOffset};

/// One article entry as it appears in the index page's list markup.
///
/// # Fields
///
/// * `time_text` - The raw timestamp label, e.g. `2026年02月23日12时`
/// * `title` - The anchor's visible text, whitespace-trimmed (may be empty)
/// * `href` - The raw `href` attribute, possibly protocol- or root-relative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItem {
    /// Raw timestamp text from the item's `span.listSpan`.
    pub time_text: String,
    /// Trimmed visible text of the item's first anchor.
    pub title: String,
    /// Raw `href` attribute of the item's first anchor.
    pub href: String,
}

/// A normalized article ready to become one feed entry.
///
/// Invariants, enforced at construction time by the pipeline:
/// - `link` is absolute and starts with an `http`/`https` scheme
/// - `published_at` always carries the configured fixed offset, never a
///   naive time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// The article headline, extracted verbatim (trimmed) from the markup.
    pub title: String,
    /// Fully qualified article URL; doubles as the feed entry's guid.
    pub link: String,
    /// Publication instant in the site's civil time zone.
    pub published_at: DateTime<FixedOffset>,
    /// Feed entry body. Currently identical to `title`; fetching and
    /// summarizing article bodies is a possible future extension.
    pub description: String,
}
