//! Scraper for the 浙江宣传 column on [zjnews.zjol.com.cn](https://zjnews.zjol.com.cn/zjxc/).
//!
//! The column publishes a plain `ul.listUl` index with one `li.listLi`
//! per article, which keeps extraction cheap: no pagination, no script
//! evaluation, no article-body fetches. This module owns everything
//! source-specific: the request identity, the CSS selectors, the link
//! prefix rules, and the `YYYY年MM月DD日HH时` timestamp layout.
//!
//! Per-item failures (a list item missing its time label or anchor, a
//! timestamp that doesn't parse) are the caller's business to skip; only
//! the list container going missing is reported as a page-level error.

use crate::error::{FetchError, LayoutError, TimeParseError};
use crate::models::RawItem;
use chrono::{DateTime, FixedOffset, NaiveDate};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Browser-like identity sent with the index request. The site serves the
/// full list markup to ordinary desktop browsers; an obvious bot UA risks
/// trivial blocking.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

static LIST_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("ul.listUl").unwrap());
static ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("li.listLi").unwrap());
static TIME_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("span.listSpan").unwrap());
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Fetch the index page and return its body as UTF-8 text.
///
/// One best-effort GET per invocation, bounded by `timeout`; there are no
/// retries, since the process is expected to be re-invoked periodically by
/// an external scheduler. The body is decoded as UTF-8 regardless of the
/// response's declared charset (the site declares UTF-8 but the decode
/// must not depend on it).
///
/// # Errors
///
/// Any transport failure (connect, timeout, non-success status, body read)
/// surfaces as a single [`FetchError`] carrying the cause.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_index(url: &str, timeout: Duration) -> Result<String, FetchError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;

    let response = client.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    let html = String::from_utf8_lossy(&bytes).into_owned();

    info!(bytes = html.len(), "Fetched index page");
    Ok(html)
}

/// Enumerate the article list and pull out one [`RawItem`] per usable entry.
///
/// Items are returned in document order (top of list = newest, per the
/// site's convention). An item is usable when it carries both a
/// `span.listSpan` time label and at least one `a[href]` anchor; items
/// missing either are skipped and reported as counts, not individually.
/// Empty anchor titles are retained.
///
/// # Errors
///
/// Returns [`LayoutError`] when no `ul.listUl` container exists in the
/// document, which means the site layout changed.
pub fn extract_items(html: &str) -> Result<Vec<RawItem>, LayoutError> {
    let document = Html::parse_document(html);

    let container = document.select(&LIST_SELECTOR).next().ok_or(LayoutError)?;

    let mut items = Vec::new();
    let mut missing_time = 0usize;
    let mut missing_anchor = 0usize;

    for li in container.select(&ITEM_SELECTOR) {
        let Some(time_label) = li.select(&TIME_SELECTOR).next() else {
            missing_time += 1;
            continue;
        };
        let Some(anchor) = li.select(&ANCHOR_SELECTOR).next() else {
            missing_anchor += 1;
            continue;
        };

        let time_text = time_label.text().collect::<String>().trim().to_string();
        let title = anchor.text().collect::<String>().trim().to_string();
        let href = anchor.value().attr("href").unwrap_or_default().to_string();

        debug!(%time_text, %title, "Extracted list item");
        items.push(RawItem {
            time_text,
            title,
            href,
        });
    }

    if missing_time > 0 || missing_anchor > 0 {
        warn!(
            missing_time,
            missing_anchor, "Skipped list items missing a time label or anchor"
        );
    }
    info!(count = items.len(), "Extracted raw items from list container");

    Ok(items)
}

/// Rewrite a raw `href` into a fully qualified absolute URL.
///
/// Rules, applied in order, first match wins:
/// 1. Protocol-relative (`//host/path`) gets an `https:` scheme
/// 2. Root-relative (`/path`) is joined onto `origin` (scheme + host, no
///    trailing slash)
/// 3. Anything else passes through unchanged, assumed already absolute
///
/// There is no validation beyond the prefix rules; a malformed absolute
/// URL passes through as-is.
pub fn normalize_link(raw_href: &str, origin: &str) -> String {
    if raw_href.starts_with("//") {
        format!("https:{raw_href}")
    } else if raw_href.starts_with('/') {
        format!("{origin}{raw_href}")
    } else {
        raw_href.to_string()
    }
}

/// Parse a `YYYY年MM月DD日HH时` timestamp and attach the site's civil zone.
///
/// The source granularity is hours; minutes and seconds are always zero.
/// The unit markers are stripped into the canonical `YYYY-MM-DD HH` form,
/// the date and hour are validated separately, and the fixed configured
/// offset is attached as constant metadata (no DST tables are consulted).
///
/// # Errors
///
/// Returns a [`TimeParseError`] for any shape violation: missing markers,
/// a non-calendar date (month 13, day 30 in February), or an hour outside
/// `0..=23`. The caller is expected to drop the item and continue.
pub fn normalize_time(
    raw_time_text: &str,
    zone: FixedOffset,
) -> Result<DateTime<FixedOffset>, TimeParseError> {
    let cleaned = raw_time_text
        .replace('年', "-")
        .replace('月', "-")
        .replace('日', " ")
        .replace('时', "");
    let cleaned = cleaned.trim();

    let (date_part, hour_part) = cleaned
        .split_once(' ')
        .ok_or_else(|| TimeParseError::Layout(raw_time_text.to_string()))?;

    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")?;
    let hour: u32 = hour_part
        .parse()
        .map_err(|_| TimeParseError::Hour(hour_part.to_string()))?;
    let naive = date
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| TimeParseError::Hour(hour_part.to_string()))?;

    naive
        .and_local_timezone(zone)
        .single()
        .ok_or_else(|| TimeParseError::Layout(raw_time_text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cst() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn index_page(items: &str) -> String {
        format!(
            "<html><body><div class=\"content\">\
             <ul class=\"listUl\">{items}</ul>\
             </div></body></html>"
        )
    }

    fn list_item(time: &str, href: &str, title: &str) -> String {
        format!(
            "<li class=\"listLi\">\
             <span class=\"listSpan\">{time}</span>\
             <a href=\"{href}\">{title}</a>\
             </li>"
        )
    }

    #[test]
    fn test_extract_items_in_document_order() {
        let html = index_page(&format!(
            "{}{}{}",
            list_item("2026年02月23日12时", "/a.html", "甲"),
            list_item("2026年02月22日09时", "//zjnews.zjol.com.cn/b.html", "乙"),
            list_item("2026年02月21日18时", "https://zjnews.zjol.com.cn/c.html", "丙"),
        ));

        let items = extract_items(&html).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "甲");
        assert_eq!(items[0].time_text, "2026年02月23日12时");
        assert_eq!(items[0].href, "/a.html");
        assert_eq!(items[1].title, "乙");
        assert_eq!(items[2].title, "丙");
    }

    #[test]
    fn test_extract_skips_item_without_time_label() {
        let html = index_page(&format!(
            "{}<li class=\"listLi\"><a href=\"/no-time.html\">无时间</a></li>{}",
            list_item("2026年02月23日12时", "/a.html", "甲"),
            list_item("2026年02月22日09时", "/b.html", "乙"),
        ));

        let items = extract_items(&html).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.href != "/no-time.html"));
    }

    #[test]
    fn test_extract_skips_item_without_anchor() {
        let html = index_page(&format!(
            "<li class=\"listLi\"><span class=\"listSpan\">2026年02月23日12时</span></li>{}",
            list_item("2026年02月22日09时", "/b.html", "乙"),
        ));

        let items = extract_items(&html).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].href, "/b.html");
    }

    #[test]
    fn test_extract_retains_empty_title() {
        let html = index_page(&list_item("2026年02月23日12时", "/a.html", ""));

        let items = extract_items(&html).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "");
    }

    #[test]
    fn test_extract_trims_title_whitespace() {
        let html = index_page(&list_item("2026年02月23日12时", "/a.html", "  标题  "));

        let items = extract_items(&html).unwrap();
        assert_eq!(items[0].title, "标题");
    }

    #[test]
    fn test_extract_missing_container_is_layout_error() {
        let html = "<html><body><ul class=\"otherList\"><li>x</li></ul></body></html>";
        assert!(extract_items(html).is_err());
    }

    #[test]
    fn test_normalize_link_protocol_relative() {
        assert_eq!(
            normalize_link("//a.b/c", "https://zjnews.zjol.com.cn"),
            "https://a.b/c"
        );
    }

    #[test]
    fn test_normalize_link_root_relative() {
        assert_eq!(normalize_link("/x", "https://h"), "https://h/x");
    }

    #[test]
    fn test_normalize_link_absolute_passthrough() {
        assert_eq!(
            normalize_link("https://full/url", "https://zjnews.zjol.com.cn"),
            "https://full/url"
        );
        assert_eq!(
            normalize_link("http://plain/http", "https://zjnews.zjol.com.cn"),
            "http://plain/http"
        );
    }

    #[test]
    fn test_normalize_time_valid() {
        let instant = normalize_time("2026年02月23日12时", cst()).unwrap();
        assert_eq!(instant.to_rfc3339(), "2026-02-23T12:00:00+08:00");
    }

    #[test]
    fn test_normalize_time_carries_configured_offset() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let instant = normalize_time("2026年02月23日12时", utc).unwrap();
        assert_eq!(instant.offset(), &utc);
        assert_eq!(instant.to_rfc3339(), "2026-02-23T12:00:00+00:00");
    }

    #[test]
    fn test_normalize_time_invalid_month() {
        assert!(matches!(
            normalize_time("2026年13月01日10时", cst()),
            Err(TimeParseError::Date(_))
        ));
    }

    #[test]
    fn test_normalize_time_invalid_day() {
        assert!(normalize_time("2026年02月30日10时", cst()).is_err());
    }

    #[test]
    fn test_normalize_time_invalid_hour() {
        assert!(matches!(
            normalize_time("2026年02月23日24时", cst()),
            Err(TimeParseError::Hour(_))
        ));
    }

    #[test]
    fn test_normalize_time_missing_hour_marker() {
        // No 日/时 markers means no way to split a date from an hour.
        assert!(matches!(
            normalize_time("2026年02月23", cst()),
            Err(TimeParseError::Layout(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_index_unreachable_is_fetch_error() {
        // Nothing listens on the discard port of loopback; the connection
        // is refused without touching the real network.
        let result = fetch_index("http://127.0.0.1:9/", Duration::from_secs(2)).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_time_garbage() {
        assert!(normalize_time("", cst()).is_err());
        assert!(normalize_time("昨天", cst()).is_err());
        assert!(normalize_time("2026年xx月23日12时", cst()).is_err());
    }
}
