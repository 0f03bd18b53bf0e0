use std::time::Duration;

use crate::errors::{SwipeError, SwipeResult};
use crate::sources::filter::{QualityFilter, DEFAULT_MIN_EXTRACT_LENGTH};
use crate::sources::mixed::DEFAULT_TRENDING_SHARE;
use crate::sources::MAX_PAGE_SIZE;

pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_PREFETCH_THRESHOLD: usize = 3;
pub const DEFAULT_WHEEL_QUIET_MS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub wiki_lang: String,
    pub backend_url: Option<String>,
    pub page_size: usize,
    pub prefetch_threshold: usize,
    pub wheel_quiet: Duration,
    pub require_thumbnail: bool,
    pub min_extract_length: usize,
    pub trending_share: f32,
    pub cache_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "./wikiswipe.db".to_string(),
            wiki_lang: "en".to_string(),
            backend_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            prefetch_threshold: DEFAULT_PREFETCH_THRESHOLD,
            wheel_quiet: Duration::from_millis(DEFAULT_WHEEL_QUIET_MS),
            require_thumbnail: true,
            min_extract_length: DEFAULT_MIN_EXTRACT_LENGTH,
            trending_share: DEFAULT_TRENDING_SHARE,
            cache_enabled: true,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: Option<String>, default: T) -> SwipeResult<T> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| SwipeError::Config(format!("{} has an invalid value: {}", name, raw))),
        None => Ok(default),
    }
}

fn parse_flag(name: &str, value: Option<String>, default: bool) -> SwipeResult<bool> {
    match value.as_deref().map(|v| v.trim().to_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(SwipeError::Config(format!("{} must be on or off, got {}", name, v))),
        },
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> SwipeResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let mut config = Self::from_lookup(|key| std::env::var(key).ok())?;

        // Default db_path is relative to executable directory
        if std::env::var("WIKISWIPE_DB_PATH").is_err() {
            if let Some(dir) = exe_dir {
                config.db_path = dir.join("wikiswipe.db").to_string_lossy().into_owned();
            }
        }

        Ok(config)
    }

    /// Build a config from any variable lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> SwipeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let page_size: usize = parse_var("WIKISWIPE_PAGE_SIZE", lookup("WIKISWIPE_PAGE_SIZE"), defaults.page_size)?;
        let wheel_quiet_ms: u64 = parse_var(
            "WIKISWIPE_WHEEL_QUIET_MS",
            lookup("WIKISWIPE_WHEEL_QUIET_MS"),
            DEFAULT_WHEEL_QUIET_MS,
        )?;
        let trending_share: f32 = parse_var(
            "WIKISWIPE_TRENDING_SHARE",
            lookup("WIKISWIPE_TRENDING_SHARE"),
            defaults.trending_share,
        )?;

        Ok(Self {
            db_path: lookup("WIKISWIPE_DB_PATH").unwrap_or(defaults.db_path),
            wiki_lang: lookup("WIKISWIPE_WIKI_LANG").unwrap_or(defaults.wiki_lang),
            backend_url: lookup("WIKISWIPE_BACKEND_URL").filter(|url| !url.trim().is_empty()),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            prefetch_threshold: parse_var(
                "WIKISWIPE_PREFETCH_THRESHOLD",
                lookup("WIKISWIPE_PREFETCH_THRESHOLD"),
                defaults.prefetch_threshold,
            )?,
            wheel_quiet: Duration::from_millis(wheel_quiet_ms),
            require_thumbnail: parse_flag(
                "WIKISWIPE_REQUIRE_THUMBNAIL",
                lookup("WIKISWIPE_REQUIRE_THUMBNAIL"),
                defaults.require_thumbnail,
            )?,
            min_extract_length: parse_var(
                "WIKISWIPE_MIN_EXTRACT_LENGTH",
                lookup("WIKISWIPE_MIN_EXTRACT_LENGTH"),
                defaults.min_extract_length,
            )?,
            trending_share: trending_share.clamp(0.0, 1.0),
            cache_enabled: parse_flag("WIKISWIPE_CACHE", lookup("WIKISWIPE_CACHE"), defaults.cache_enabled)?,
        })
    }

    pub fn quality_filter(&self) -> QualityFilter {
        QualityFilter {
            require_thumbnail: self.require_thumbnail,
            min_extract_length: self.min_extract_length,
            exclude_lists: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.prefetch_threshold, 3);
        assert_eq!(config.wheel_quiet, Duration::from_millis(300));
        assert_eq!(config.wiki_lang, "en");
        assert!(config.backend_url.is_none());
        assert!(config.cache_enabled);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("WIKISWIPE_DB_PATH", "/tmp/swipe.db"),
            ("WIKISWIPE_WIKI_LANG", "fr"),
            ("WIKISWIPE_BACKEND_URL", "http://localhost:3000"),
            ("WIKISWIPE_PREFETCH_THRESHOLD", "2"),
            ("WIKISWIPE_REQUIRE_THUMBNAIL", "off"),
            ("WIKISWIPE_CACHE", "no"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, "/tmp/swipe.db");
        assert_eq!(config.wiki_lang, "fr");
        assert_eq!(config.backend_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(config.prefetch_threshold, 2);
        assert!(!config.require_thumbnail);
        assert!(!config.cache_enabled);
    }

    #[test]
    fn test_page_size_is_clamped() {
        let config = Config::from_lookup(lookup(&[("WIKISWIPE_PAGE_SIZE", "40")])).unwrap();
        assert_eq!(config.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        let result = Config::from_lookup(lookup(&[("WIKISWIPE_PAGE_SIZE", "lots")]));
        assert!(matches!(result, Err(SwipeError::Config(_))));
    }

    #[test]
    fn test_invalid_flag_is_config_error() {
        let result = Config::from_lookup(lookup(&[("WIKISWIPE_CACHE", "maybe")]));
        assert!(matches!(result, Err(SwipeError::Config(_))));
    }

    #[test]
    fn test_blank_backend_url_is_ignored() {
        let config = Config::from_lookup(lookup(&[("WIKISWIPE_BACKEND_URL", "  ")])).unwrap();
        assert!(config.backend_url.is_none());
    }
}
