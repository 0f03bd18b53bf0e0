use chrono::NaiveDate;

use crate::domain::Article;
use crate::errors::SwipeResult;
use crate::sources::wikipedia::{PageSummary, TopArticle};

/// Upper bound on articles per page, whatever the caller asks for
pub const MAX_PAGE_SIZE: usize = 10;

pub fn clamp_count(count: usize) -> usize {
    count.clamp(1, MAX_PAGE_SIZE)
}

#[cfg_attr(test, mockall::automock)]
pub trait ArticleSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Fetch the next page of articles, in display order
    fn fetch(&self, count: usize) -> SwipeResult<Vec<Article>>;

    /// Build a page without recording it as delivered. Sources that remember
    /// what they served only do so on [`commit`](Self::commit), so a page
    /// that is thrown away can be produced again.
    fn stage(&self, count: usize) -> SwipeResult<Vec<Article>> {
        self.fetch(count)
    }

    /// Record the last staged page as delivered
    fn commit(&self) {}
}

/// The subset of the Wikipedia REST API the sources rely on
#[cfg_attr(test, mockall::automock)]
pub trait WikiApi: Send + Sync {
    fn random_summary(&self) -> SwipeResult<PageSummary>;

    fn summary(&self, title: &str) -> SwipeResult<PageSummary>;

    fn top_pageviews(&self, date: NaiveDate) -> SwipeResult<Vec<TopArticle>>;
}
