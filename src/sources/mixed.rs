use crate::domain::Article;
use crate::errors::SwipeResult;
use crate::sources::traits::{clamp_count, ArticleSource};

pub const DEFAULT_TRENDING_SHARE: f32 = 0.3;

/// A page made of a trending slice followed by random articles. Trending
/// failures degrade to an all-random page.
pub struct MixedSource {
    trending: Box<dyn ArticleSource>,
    random: Box<dyn ArticleSource>,
    trending_share: f32,
}

impl MixedSource {
    pub fn new(
        trending: Box<dyn ArticleSource>,
        random: Box<dyn ArticleSource>,
        trending_share: f32,
    ) -> Self {
        Self {
            trending,
            random,
            trending_share: trending_share.clamp(0.0, 1.0),
        }
    }

    fn trending_slots(&self, count: usize) -> usize {
        ((count as f32) * self.trending_share).round() as usize
    }
}

impl ArticleSource for MixedSource {
    fn name(&self) -> &'static str {
        "mixed"
    }

    fn fetch(&self, count: usize) -> SwipeResult<Vec<Article>> {
        let count = clamp_count(count);
        let slots = self.trending_slots(count);

        // Trending picks are committed only once the whole page is built
        let (mut articles, trending_staged) = if slots > 0 {
            match self.trending.stage(slots) {
                Ok(mut trending) => {
                    trending.truncate(slots);
                    (trending, true)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "trending unavailable, serving random only");
                    (Vec::new(), false)
                }
            }
        } else {
            (Vec::new(), false)
        };

        let remaining = count - articles.len();
        if remaining > 0 {
            let fresh: Vec<Article> = self
                .random
                .fetch(remaining)?
                .into_iter()
                .filter(|a| !articles.iter().any(|t| t.id == a.id))
                .collect();
            articles.extend(fresh);
        }

        if trending_staged {
            self.trending.commit();
        }
        Ok(articles)
    }
}
