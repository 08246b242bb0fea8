//! Pipeline coordinator: fetch → extract → normalize → sort → truncate.
//!
//! This module owns the list of [`Article`] records a run produces. It
//! strings the scraper's phases together and enforces the two run-level
//! policies the components themselves don't know about:
//!
//! - **Skip, don't abort**: an item whose timestamp doesn't parse is
//!   dropped (counted, one sample logged) before truncation, so dropped
//!   items never occupy a slot in the article cap.
//! - **Defensive ordering**: the site lists newest first, but the pipeline
//!   still sorts by publication time descending. The sort is stable, so
//!   equal timestamps keep their document order and a run is byte-for-byte
//!   deterministic for a given page.

use crate::config::FeedConfig;
use crate::error::PipelineError;
use crate::models::{Article, RawItem};
use crate::scrapers::zjol;
use crate::utils::truncate_for_log;
use chrono::FixedOffset;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Run the whole pipeline and return the ordered, truncated article list.
///
/// # Errors
///
/// - [`PipelineError::Fetch`] when the index page is unreachable
/// - [`PipelineError::Layout`] when the article list container is missing
/// - [`PipelineError::NoContent`] when zero articles survive filtering;
///   distinct from the failures above because it means the site was
///   reachable and well-formed but nothing usable was found
#[instrument(level = "info", skip_all, fields(url = %config.target_url))]
pub async fn run(config: &FeedConfig) -> Result<Vec<Article>, PipelineError> {
    let html = zjol::fetch_index(
        &config.target_url,
        Duration::from_secs(config.timeout_secs),
    )
    .await?;

    let raw_items = zjol::extract_items(&html)?;
    let articles = assemble(raw_items, config);

    if articles.is_empty() {
        return Err(PipelineError::NoContent);
    }

    info!(
        count = articles.len(),
        newest = %truncate_for_log(&articles[0].title, 80),
        newest_at = %articles[0].published_at,
        "Pipeline produced articles"
    );
    Ok(articles)
}

/// Normalize raw items into articles, sort newest-first, and apply the cap.
///
/// Emitted count is `min(parseable items, max_articles)`: dropping happens
/// before truncation.
fn assemble(raw_items: Vec<RawItem>, config: &FeedConfig) -> Vec<Article> {
    let mut articles = build_articles(raw_items, &config.origin, config.zone());

    // sort_by is stable: ties keep document order.
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    articles.truncate(config.max_articles);
    articles
}

fn build_articles(raw_items: Vec<RawItem>, origin: &str, zone: FixedOffset) -> Vec<Article> {
    let total = raw_items.len();
    let mut dropped = 0usize;
    let mut sample: Option<String> = None;

    let mut articles = Vec::with_capacity(total);
    for item in raw_items {
        let published_at = match zjol::normalize_time(&item.time_text, zone) {
            Ok(instant) => instant,
            Err(e) => {
                dropped += 1;
                if sample.is_none() {
                    sample = Some(format!("{}: {e}", truncate_for_log(&item.time_text, 48)));
                }
                continue;
            }
        };

        let link = zjol::normalize_link(&item.href, origin);
        let description = item.title.clone();
        articles.push(Article {
            title: item.title,
            link,
            published_at,
            description,
        });
    }

    if dropped > 0 {
        warn!(
            dropped,
            total,
            sample = %sample.as_deref().unwrap_or_default(),
            "Dropped items with unparseable timestamps"
        );
    }
    articles
}
