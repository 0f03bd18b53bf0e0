use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{Days, NaiveDate, Utc};

use crate::domain::{Article, SourceKind};
use crate::errors::SwipeResult;
use crate::sources::filter::QualityFilter;
use crate::sources::traits::{clamp_count, ArticleSource, WikiApi};
use crate::sources::wikipedia::{summary_to_article, TopArticle};

/// Summary lookups per requested article before giving up on a page
const LOOKUPS_PER_ARTICLE: usize = 3;

/// Namespaces that show up in the pageview rankings. Titles are matched with
/// underscores, as the pageviews API reports them.
const NAMESPACES: &[&str] = &[
    "Special",
    "Wikipedia",
    "WP",
    "Project",
    "File",
    "Image",
    "Media",
    "Portal",
    "Help",
    "Template",
    "Category",
    "Talk",
    "User",
    "Draft",
    "Module",
    "MediaWiki",
    "TimedText",
];

fn is_namespaced(title: &str) -> bool {
    let Some((prefix, _)) = title.split_once(':') else {
        return false;
    };
    let prefix = prefix.strip_suffix("_talk").unwrap_or(prefix);
    NAMESPACES.iter().any(|ns| ns.eq_ignore_ascii_case(prefix))
}

/// Pages that top the pageview charts without being articles
fn is_non_article(title: &str) -> bool {
    title == "Main_Page" || title.starts_with('-') || is_namespaced(title)
}

/// Most-viewed articles of a day, in rank order. Remembers what it already
/// served so consecutive pages walk down the ranking. Titles looked up for a
/// staged page only count as served once that page is committed.
pub struct TrendingSource<A: WikiApi> {
    api: Arc<A>,
    filter: QualityFilter,
    project_base: String,
    date: Option<NaiveDate>,
    served: Mutex<HashSet<String>>,
    staged: Mutex<Vec<String>>,
}

impl<A: WikiApi> TrendingSource<A> {
    pub fn new(api: Arc<A>, filter: QualityFilter, project_base: String) -> Self {
        Self {
            api,
            filter,
            project_base,
            date: None,
            served: Mutex::new(HashSet::new()),
            staged: Mutex::new(Vec::new()),
        }
    }

    /// Pin the ranking day instead of using yesterday (UTC)
    pub fn for_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    fn ranking_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| {
            let today = Utc::now().date_naive();
            today.checked_sub_days(Days::new(1)).unwrap_or(today)
        })
    }

    fn candidates(&self, top: Vec<TopArticle>) -> Vec<TopArticle> {
        let served = match self.served.lock() {
            Ok(served) => served.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };

        let mut top: Vec<TopArticle> = top
            .into_iter()
            .filter(|t| !is_non_article(&t.article) && !served.contains(&t.article))
            .collect();
        top.sort_by_key(|t| t.rank);
        top
    }

    fn set_staged(&self, titles: Vec<String>) {
        let mut staged = match self.staged.lock() {
            Ok(staged) => staged,
            Err(poisoned) => poisoned.into_inner(),
        };
        *staged = titles;
    }
}

impl<A: WikiApi> ArticleSource for TrendingSource<A> {
    fn name(&self) -> &'static str {
        "trending"
    }

    fn fetch(&self, count: usize) -> SwipeResult<Vec<Article>> {
        let articles = self.stage(count)?;
        self.commit();
        Ok(articles)
    }

    fn stage(&self, count: usize) -> SwipeResult<Vec<Article>> {
        let count = clamp_count(count);
        let date = self.ranking_date();
        let top = self.api.top_pageviews(date)?;
        let mut articles = Vec::with_capacity(count);
        let mut looked_up = Vec::new();

        for candidate in self
            .candidates(top)
            .into_iter()
            .take(count * LOOKUPS_PER_ARTICLE)
        {
            if articles.len() == count {
                break;
            }

            // Looked-up titles are never retried once committed, accepted or not
            looked_up.push(candidate.article.clone());

            let summary = match self.api.summary(&candidate.article) {
                Ok(summary) => summary,
                Err(e) => {
                    tracing::debug!(title = %candidate.article, error = %e, "trending summary lookup failed");
                    continue;
                }
            };

            if !self.filter.accepts(&summary) {
                continue;
            }

            articles.push(
                summary_to_article(summary, &self.project_base, SourceKind::Trending)
                    .with_trending(candidate.views, candidate.rank),
            );
        }

        self.set_staged(looked_up);
        tracing::debug!(%date, count = articles.len(), "trending page assembled");
        Ok(articles)
    }

    fn commit(&self) {
        let titles = match self.staged.lock() {
            Ok(mut staged) => std::mem::take(&mut *staged),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        let mut served = match self.served.lock() {
            Ok(served) => served,
            Err(poisoned) => poisoned.into_inner(),
        };
        served.extend(titles);
    }
}
