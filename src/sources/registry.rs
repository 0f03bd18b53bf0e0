use std::sync::Arc;

use crate::config::Config;
use crate::errors::{SwipeError, SwipeResult};
use crate::sources::backend::BackendSource;
use crate::sources::mixed::MixedSource;
use crate::sources::random::RandomSource;
use crate::sources::traits::ArticleSource;
use crate::sources::trending::TrendingSource;
use crate::sources::wikipedia::WikipediaClient;

/// Which articles a feed is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    Random,
    Trending,
    #[default]
    Mixed,
}

impl SourceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMode::Random => "random",
            SourceMode::Trending => "trending",
            SourceMode::Mixed => "mixed",
        }
    }
}

impl std::str::FromStr for SourceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(SourceMode::Random),
            "trending" => Ok(SourceMode::Trending),
            "mixed" => Ok(SourceMode::Mixed),
            _ => Err(format!("Unknown source mode: {}", s)),
        }
    }
}

impl std::fmt::Display for SourceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub struct SourceRegistry;

impl SourceRegistry {
    /// Build the article source for `mode`: the configured backend when
    /// there is one, Wikipedia directly otherwise
    pub fn build(config: &Config, mode: SourceMode) -> SwipeResult<Box<dyn ArticleSource>> {
        if let Some(backend_url) = &config.backend_url {
            tracing::info!(%backend_url, %mode, "using feed backend");
            return Ok(Box::new(BackendSource::new(backend_url, mode)?));
        }

        let client = Arc::new(WikipediaClient::new(&config.wiki_lang)?);
        let project_base = client.project_base();
        let filter = config.quality_filter();

        let random = RandomSource::new(client.clone(), filter, project_base.clone());
        let trending = TrendingSource::new(client, filter, project_base);

        let source: Box<dyn ArticleSource> = match mode {
            SourceMode::Random => Box::new(random),
            SourceMode::Trending => Box::new(trending),
            SourceMode::Mixed => Box::new(MixedSource::new(
                Box::new(trending),
                Box::new(random),
                config.trending_share,
            )),
        };

        tracing::info!(lang = %config.wiki_lang, %mode, source = source.name(), "using wikipedia");
        Ok(source)
    }

    pub fn parse_mode(value: &str) -> SwipeResult<SourceMode> {
        value.parse().map_err(SwipeError::InvalidInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!(SourceRegistry::parse_mode("random").unwrap(), SourceMode::Random);
        assert_eq!(SourceRegistry::parse_mode("TRENDING").unwrap(), SourceMode::Trending);
        assert_eq!(SourceRegistry::parse_mode("mixed").unwrap(), SourceMode::Mixed);
        assert!(matches!(
            SourceRegistry::parse_mode("popular"),
            Err(SwipeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_build_prefers_backend() {
        let config = Config {
            backend_url: Some("http://localhost:3000".to_string()),
            ..Config::default()
        };
        let source = SourceRegistry::build(&config, SourceMode::Random).unwrap();
        assert_eq!(source.name(), "backend");
    }

    #[test]
    fn test_build_wikipedia_sources() {
        let config = Config::default();
        assert_eq!(SourceRegistry::build(&config, SourceMode::Random).unwrap().name(), "random");
        assert_eq!(SourceRegistry::build(&config, SourceMode::Trending).unwrap().name(), "trending");
        assert_eq!(SourceRegistry::build(&config, SourceMode::Mixed).unwrap().name(), "mixed");
    }
}
