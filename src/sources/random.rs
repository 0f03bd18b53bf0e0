use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{Article, SourceKind};
use crate::errors::SwipeResult;
use crate::sources::filter::QualityFilter;
use crate::sources::traits::{clamp_count, ArticleSource, WikiApi};
use crate::sources::wikipedia::summary_to_article;

/// Random summaries per accepted article we are willing to spend
const ATTEMPTS_PER_ARTICLE: usize = 5;

pub struct RandomSource<A: WikiApi> {
    api: Arc<A>,
    filter: QualityFilter,
    project_base: String,
}

impl<A: WikiApi> RandomSource<A> {
    pub fn new(api: Arc<A>, filter: QualityFilter, project_base: String) -> Self {
        Self {
            api,
            filter,
            project_base,
        }
    }
}

impl<A: WikiApi> ArticleSource for RandomSource<A> {
    fn name(&self) -> &'static str {
        "random"
    }

    fn fetch(&self, count: usize) -> SwipeResult<Vec<Article>> {
        let count = clamp_count(count);
        let mut seen = HashSet::new();
        let mut articles = Vec::with_capacity(count);
        let mut attempts = 0;

        while articles.len() < count && attempts < count * ATTEMPTS_PER_ARTICLE {
            attempts += 1;
            let summary = self.api.random_summary()?;

            if !self.filter.accepts(&summary) || !seen.insert(summary.pageid) {
                tracing::trace!(title = %summary.title, "random article rejected");
                continue;
            }

            articles.push(summary_to_article(
                summary,
                &self.project_base,
                SourceKind::Random,
            ));
        }

        if articles.len() < count {
            tracing::debug!(
                wanted = count,
                got = articles.len(),
                attempts,
                "random source ran out of attempts"
            );
        }

        Ok(articles)
    }
}
