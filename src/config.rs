//! Run configuration for the feed mirror.
//!
//! All knobs the reference deployment hardcodes live in [`FeedConfig`]:
//! the target URL, the output path, the article cap, the channel metadata,
//! the site's civil time zone offset, and the request timeout. Every field
//! has a serde default reproducing the reference value, so an empty config
//! file (or none at all) yields a working run against the 浙江宣传 column.
//!
//! Configuration is resolved in three layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. The YAML file passed via `--config`
//! 3. Per-run CLI overrides (`--output`, `--max-articles`)
//!
//! No component reads process-wide state; the resolved `FeedConfig` is
//! passed explicitly into every pipeline call.

use crate::cli::Cli;
use crate::error::ConfigError;
use chrono::FixedOffset;
use serde::Deserialize;
use std::fs;
use tracing::{debug, info};
use url::Url;

/// Channel metadata and run parameters, constant for one run.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    /// The index page to fetch.
    pub target_url: String,
    /// Scheme + host used to absolutize root-relative links, no trailing slash.
    pub origin: String,
    /// Where the rendered RSS document is written (overwritten each run).
    pub output_path: String,
    /// Maximum number of feed entries to emit.
    pub max_articles: usize,
    /// RSS `<channel><title>`.
    pub channel_title: String,
    /// RSS `<channel><link>`.
    pub channel_link: String,
    /// RSS `<channel><description>`.
    pub channel_description: String,
    /// RSS `<channel><language>` tag.
    pub language: String,
    /// The site's civil time zone as a fixed UTC offset in hours.
    /// Applied uniformly to every parsed timestamp; no DST adjustment.
    pub utc_offset_hours: i32,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            target_url: "https://zjnews.zjol.com.cn/zjxc/".to_string(),
            origin: "https://zjnews.zjol.com.cn".to_string(),
            output_path: "docs/rss.xml".to_string(),
            max_articles: 30,
            channel_title: "浙江宣传".to_string(),
            channel_link: "https://zjnews.zjol.com.cn/zjxc/".to_string(),
            channel_description: "自动生成的浙江宣传 RSS 订阅源（基于真实网页结构）".to_string(),
            language: "zh-CN".to_string(),
            utc_offset_hours: 8,
            timeout_secs: 15,
        }
    }
}

impl FeedConfig {
    /// Load configuration, starting from defaults and layering the YAML
    /// file at `path` on top when one is given.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, or
    /// if the resulting values fail validation.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_string(),
                    source,
                })?;
                let config: FeedConfig =
                    serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
                        path: path.to_string(),
                        source,
                    })?;
                info!(config_path = %path, "Loaded configuration file");
                config
            }
            None => {
                debug!("No config file given; using built-in defaults");
                Self::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply per-run CLI overrides on top of the loaded configuration.
    pub fn apply_cli(&mut self, args: &Cli) {
        if let Some(output) = &args.output {
            self.output_path = output.clone();
        }
        if let Some(max_articles) = args.max_articles {
            self.max_articles = max_articles;
        }
    }

    /// The configured civil zone as a `chrono::FixedOffset`.
    ///
    /// `load` guarantees the offset is representable; the fallback only
    /// exists for hand-built configs that bypassed validation.
    pub fn zone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .unwrap_or_else(|| FixedOffset::east_opt(8 * 3600).unwrap())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if Url::parse(&self.target_url).is_err() {
            return Err(ConfigError::InvalidTargetUrl(self.target_url.clone()));
        }
        if FixedOffset::east_opt(self.utc_offset_hours * 3600).is_none() {
            return Err(ConfigError::InvalidOffset(self.utc_offset_hours));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_deployment() {
        let config = FeedConfig::default();
        assert_eq!(config.target_url, "https://zjnews.zjol.com.cn/zjxc/");
        assert_eq!(config.origin, "https://zjnews.zjol.com.cn");
        assert_eq!(config.output_path, "docs/rss.xml");
        assert_eq!(config.max_articles, 30);
        assert_eq!(config.channel_title, "浙江宣传");
        assert_eq!(config.language, "zh-CN");
        assert_eq!(config.utc_offset_hours, 8);
        assert_eq!(config.timeout_secs, 15);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_yaml_keeps_defaults_for_missing_fields() {
        let config: FeedConfig =
            serde_yaml::from_str("output_path: /tmp/feed.xml\nmax_articles: 5\n").unwrap();
        assert_eq!(config.output_path, "/tmp/feed.xml");
        assert_eq!(config.max_articles, 5);
        assert_eq!(config.target_url, "https://zjnews.zjol.com.cn/zjxc/");
        assert_eq!(config.utc_offset_hours, 8);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<FeedConfig, _> = serde_yaml::from_str("max_article: 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_beat_file_values() {
        use clap::Parser;

        let mut config = FeedConfig::default();
        let args = Cli::parse_from(&["zjxc_rss", "--output", "/tmp/out.xml", "--max-articles", "3"]);
        config.apply_cli(&args);
        assert_eq!(config.output_path, "/tmp/out.xml");
        assert_eq!(config.max_articles, 3);
    }

    #[test]
    fn test_invalid_target_url_is_rejected() {
        let config = FeedConfig {
            target_url: "not a url".to_string(),
            ..FeedConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTargetUrl(_))
        ));
    }

    #[test]
    fn test_out_of_range_offset_is_rejected() {
        let config = FeedConfig {
            utc_offset_hours: 99,
            ..FeedConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidOffset(99))));
    }

    #[test]
    fn test_zone_is_the_configured_offset() {
        let config = FeedConfig::default();
        assert_eq!(config.zone(), FixedOffset::east_opt(8 * 3600).unwrap());
    }
}
