use chrono::{Datelike, NaiveDate};
use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

use crate::domain::{Article, SourceKind, Thumbnail};
use crate::errors::{SwipeError, SwipeResult};
use crate::sources::traits::WikiApi;

const USER_AGENT: &str = concat!("wikiswipe/", env!("CARGO_PKG_VERSION"));
const METRICS_BASE: &str = "https://wikimedia.org/api/rest_v1";

#[derive(Debug, Clone, Deserialize)]
pub struct ContentUrl {
    pub page: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentUrls {
    pub desktop: ContentUrl,
}

/// Response of `page/summary` and `page/random/summary`
#[derive(Debug, Clone, Deserialize)]
pub struct PageSummary {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub pageid: i64,
    #[serde(default)]
    pub extract: String,
    pub thumbnail: Option<Thumbnail>,
    pub content_urls: Option<ContentUrls>,
}

impl PageSummary {
    pub fn is_disambiguation(&self) -> bool {
        self.kind == "disambiguation"
    }

    pub fn into_article(self, project_base: &str) -> Article {
        let url = match self.content_urls {
            Some(urls) => urls.desktop.page,
            None => format!("{}/wiki/{}", project_base, self.title.replace(' ', "_")),
        };

        Article::new(self.pageid, self.title, url)
            .with_extract(self.extract)
            .with_thumbnail(self.thumbnail)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TopArticle {
    pub article: String,
    pub views: u64,
    pub rank: u32,
}

#[derive(Debug, Deserialize)]
struct TopDay {
    articles: Vec<TopArticle>,
}

#[derive(Debug, Deserialize)]
struct TopResponse {
    items: Vec<TopDay>,
}

pub struct WikipediaClient {
    client: Client,
    lang: String,
    rest_base: Url,
    metrics_base: Url,
}

impl WikipediaClient {
    pub fn new(lang: &str) -> SwipeResult<Self> {
        let rest_base = format!("https://{}.wikipedia.org/api/rest_v1", lang);
        Self::with_base_urls(lang, &rest_base, METRICS_BASE)
    }

    pub fn with_base_urls(lang: &str, rest_base: &str, metrics_base: &str) -> SwipeResult<Self> {
        let rest_base =
            Url::parse(rest_base).map_err(|e| SwipeError::Config(format!("{}: {}", rest_base, e)))?;
        let metrics_base = Url::parse(metrics_base)
            .map_err(|e| SwipeError::Config(format!("{}: {}", metrics_base, e)))?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            lang: lang.to_string(),
            rest_base,
            metrics_base,
        })
    }

    /// Base URL of the wiki itself, used to build article links
    pub fn project_base(&self) -> String {
        format!("https://{}.wikipedia.org", self.lang)
    }

    fn project(&self) -> String {
        format!("{}.wikipedia", self.lang)
    }

    fn endpoint(base: &Url, segments: &[&str]) -> SwipeResult<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| SwipeError::Config(format!("Cannot extend base URL {}", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn random_summary_url(&self) -> SwipeResult<Url> {
        Self::endpoint(&self.rest_base, &["page", "random", "summary"])
    }

    pub fn summary_url(&self, title: &str) -> SwipeResult<Url> {
        Self::endpoint(&self.rest_base, &["page", "summary", title])
    }

    pub fn top_pageviews_url(&self, date: NaiveDate) -> SwipeResult<Url> {
        let year = format!("{:04}", date.year());
        let month = format!("{:02}", date.month());
        let day = format!("{:02}", date.day());
        let project = self.project();
        Self::endpoint(
            &self.metrics_base,
            &[
                "metrics",
                "pageviews",
                "top",
                project.as_str(),
                "all-access",
                year.as_str(),
                month.as_str(),
                day.as_str(),
            ],
        )
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> SwipeResult<T> {
        tracing::debug!(%url, "wikipedia request");
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.json()?)
    }
}

impl WikiApi for WikipediaClient {
    fn random_summary(&self) -> SwipeResult<PageSummary> {
        self.get_json(self.random_summary_url()?)
    }

    fn summary(&self, title: &str) -> SwipeResult<PageSummary> {
        self.get_json(self.summary_url(title)?)
    }

    fn top_pageviews(&self, date: NaiveDate) -> SwipeResult<Vec<TopArticle>> {
        let response: TopResponse = self.get_json(self.top_pageviews_url(date)?)?;
        Ok(response
            .items
            .into_iter()
            .next()
            .map(|day| day.articles)
            .unwrap_or_default())
    }
}

/// Convert a summary into a feed article tagged with `source`
pub fn summary_to_article(summary: PageSummary, project_base: &str, source: SourceKind) -> Article {
    let mut article = summary.into_article(project_base);
    article.source = source;
    article
}
