//! Site scraper for turning an HTML news index into raw article records.
//!
//! There is exactly one supported source. Its scraper follows a
//! three-phase pattern:
//!
//! 1. **Fetching**: Download the index page with a browser-like identity
//! 2. **Extraction**: Enumerate the article list and pull out raw triples
//! 3. **Normalization**: Absolutize links and parse locale timestamps
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | 浙江宣传 (zjol.com.cn) | [`zjol`] | HTML scraping | News column index page |
//!
//! # Structural Contract
//!
//! The extractor depends on the source page keeping this shape:
//!
//! ```text
//! ul.listUl                 the single article list container
//! └── li.listLi             one per article, newest first
//!     ├── span.listSpan     timestamp label, e.g. 2026年02月23日12时
//!     └── a[href]           headline anchor
//! ```
//!
//! The container going missing is an expected long-term failure mode for
//! a scraper (site redesigns happen) and is reported as a distinct error
//! rather than a crash.

pub mod zjol;
