use reqwest::blocking::Client;
use url::Url;

use crate::domain::Article;
use crate::errors::{SwipeError, SwipeResult};
use crate::sources::registry::SourceMode;
use crate::sources::traits::{clamp_count, ArticleSource};

/// Client for a feed backend exposing `GET /api/articles?source=&count=`.
///
/// `source` carries the feed mode (`random`, `trending` or `mixed`), not an
/// article tag: the backend assembles mixed pages itself and tags each
/// article `random` or `trending`.
pub struct BackendSource {
    client: Client,
    base_url: Url,
    mode: SourceMode,
}

impl BackendSource {
    pub fn new(base_url: &str, mode: SourceMode) -> SwipeResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| SwipeError::Config(format!("Invalid backend URL {}: {}", base_url, e)))?;
        // Relative joins replace the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url,
            mode,
        })
    }

    pub fn articles_url(&self, count: usize) -> SwipeResult<Url> {
        let mut url = self
            .base_url
            .join("api/articles")
            .map_err(|e| SwipeError::Config(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("source", self.mode.as_str())
            .append_pair("count", &clamp_count(count).to_string());
        Ok(url)
    }
}

impl ArticleSource for BackendSource {
    fn name(&self) -> &'static str {
        "backend"
    }

    fn fetch(&self, count: usize) -> SwipeResult<Vec<Article>> {
        let url = self.articles_url(count)?;
        tracing::debug!(%url, "backend request");

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SwipeError::HttpStatus(status.as_u16()));
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| SwipeError::Upstream(e.to_string()))
    }
}
