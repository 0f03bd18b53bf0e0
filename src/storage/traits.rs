use crate::domain::Article;
use crate::errors::SwipeResult;

/// Session-scoped, best-effort persistence of the feed sequence
#[cfg_attr(test, mockall::automock)]
pub trait SessionCache: Send + Sync {
    fn load(&self) -> SwipeResult<Option<Vec<Article>>>;
    fn save(&self, items: &[Article]) -> SwipeResult<()>;
    fn clear(&self) -> SwipeResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikedArticle {
    pub article_id: i64,
    pub title: String,
    pub url: String,
    pub liked_at: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
pub trait LikeRepository: Send + Sync {
    fn set_liked(&self, article: &Article, liked: bool) -> SwipeResult<()>;
    fn is_liked(&self, article_id: i64) -> SwipeResult<bool>;
    fn list_liked(&self) -> SwipeResult<Vec<LikedArticle>>;
}
