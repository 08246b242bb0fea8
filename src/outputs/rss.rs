//! RSS 2.0 feed construction and file output.
//!
//! Articles arrive already ordered and truncated; this module only maps
//! them onto the wire format. Each article becomes one `<item>` whose
//! `guid` is its link, flagged as a permalink, so feed readers treat the
//! URL as the entry's permanent identity across runs.

use crate::config::FeedConfig;
use crate::error::EmitError;
use crate::models::Article;
use rss::{Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Build the RSS 2.0 channel for the supplied articles.
///
/// Channel title, link, description, and language come from the config;
/// items are appended in the supplied order with title, link, description,
/// RFC 2822 `pubDate`, and a permalink `guid` equal to the link.
pub fn build_channel(articles: &[Article], config: &FeedConfig) -> Channel {
    let items: Vec<Item> = articles
        .iter()
        .map(|article| {
            let guid = GuidBuilder::default()
                .value(article.link.clone())
                .permalink(true)
                .build();

            ItemBuilder::default()
                .title(Some(article.title.clone()))
                .link(Some(article.link.clone()))
                .description(Some(article.description.clone()))
                .pub_date(Some(article.published_at.to_rfc2822()))
                .guid(Some(guid))
                .build()
        })
        .collect();

    ChannelBuilder::default()
        .title(config.channel_title.clone())
        .link(config.channel_link.clone())
        .description(config.channel_description.clone())
        .language(Some(config.language.clone()))
        .items(items)
        .build()
}

/// Serialize the channel and write it to the configured output path.
///
/// The parent directory is created if missing and any existing file at the
/// path is overwritten. Single-writer, non-overlapping invocations are the
/// external scheduler's responsibility, so no locking or atomic rename is
/// attempted.
///
/// # Errors
///
/// Filesystem failures (permissions, read-only mount, disk full) surface
/// as [`EmitError`] carrying the path and the underlying cause.
#[instrument(level = "info", skip_all, fields(path = %config.output_path, entries = articles.len()))]
pub async fn write_feed(articles: &[Article], config: &FeedConfig) -> Result<(), EmitError> {
    let channel = build_channel(articles, config);
    let xml = channel.to_string();

    let path = Path::new(&config.output_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(|source| EmitError {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    fs::write(path, xml).await.map_err(|source| EmitError {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Wrote RSS feed");
    Ok(())
}
