use super::Article;
use crate::errors::SwipeResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Confirmed(bool),
    RolledBack(bool),
}

/// A tentative like/unlike already applied to the local article, waiting for
/// the persistence result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a pending like must be settled"]
pub struct PendingLike {
    pub article_id: i64,
    previous: Option<bool>,
    requested: bool,
}

impl PendingLike {
    pub fn begin(article: &mut Article, liked: bool) -> Self {
        let pending = Self {
            article_id: article.id,
            previous: article.is_liked,
            requested: liked,
        };
        article.is_liked = Some(liked);
        pending
    }

    pub fn requested(&self) -> bool {
        self.requested
    }

    /// Keep the tentative value on success, restore the previous one otherwise
    pub fn settle(self, article: &mut Article, result: &SwipeResult<()>) -> LikeOutcome {
        debug_assert_eq!(article.id, self.article_id);
        match result {
            Ok(()) => LikeOutcome::Confirmed(self.requested),
            Err(_) => {
                article.is_liked = self.previous;
                LikeOutcome::RolledBack(self.previous.unwrap_or(false))
            }
        }
    }
}
