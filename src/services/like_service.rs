use crate::domain::{Article, LikeOutcome, PendingLike};
use crate::errors::SwipeResult;
use crate::storage::traits::{LikeRepository, LikedArticle};

pub struct LikeService<L: LikeRepository> {
    repository: L,
}

impl<L: LikeRepository> LikeService<L> {
    pub fn new(repository: L) -> Self {
        Self { repository }
    }

    /// Flip the liked flag: applied locally first, rolled back when it
    /// cannot be persisted
    pub fn toggle(&self, article: &mut Article) -> LikeOutcome {
        let liked = !article.liked();
        let pending = PendingLike::begin(article, liked);
        let result = self.repository.set_liked(article, pending.requested());

        if let Err(e) = &result {
            tracing::warn!(article_id = article.id, error = %e, "like not persisted, reverting");
        }

        pending.settle(article, &result)
    }

    /// Fill in `is_liked` from the repository for articles that lack it
    pub fn annotate(&self, articles: &mut [Article]) {
        for article in articles.iter_mut().filter(|a| a.is_liked.is_none()) {
            match self.repository.is_liked(article.id) {
                Ok(liked) => article.is_liked = Some(liked),
                Err(e) => tracing::debug!(article_id = article.id, error = %e, "like lookup failed"),
            }
        }
    }

    pub fn list(&self) -> SwipeResult<Vec<LikedArticle>> {
        self.repository.list_liked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SwipeError;
    use crate::storage::sqlite::{SqliteLikeRepository, SqliteStorage};
    use crate::storage::traits::MockLikeRepository;

    fn article(id: i64) -> Article {
        Article::new(id, format!("Article {}", id), format!("https://en.wikipedia.org/?curid={}", id))
    }

    #[test]
    fn test_toggle_likes_then_unlikes() {
        let service = LikeService::new(SqliteLikeRepository::new(SqliteStorage::in_memory().unwrap()));
        let mut article = article(5);

        assert_eq!(service.toggle(&mut article), LikeOutcome::Confirmed(true));
        assert!(article.liked());
        assert_eq!(service.list().unwrap().len(), 1);

        assert_eq!(service.toggle(&mut article), LikeOutcome::Confirmed(false));
        assert!(!article.liked());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_reverts_on_persistence_failure() {
        let mut repository = MockLikeRepository::new();
        repository
            .expect_set_liked()
            .withf(|article, liked| article.id == 5 && *liked)
            .times(1)
            .returning(|_, _| Err(SwipeError::Persistence("database is locked".to_string())));

        let service = LikeService::new(repository);
        let mut article = article(5);

        assert_eq!(service.toggle(&mut article), LikeOutcome::RolledBack(false));
        assert_eq!(article.is_liked, None);
    }

    #[test]
    fn test_annotate_fills_missing_flags() {
        let mut repository = MockLikeRepository::new();
        repository
            .expect_is_liked()
            .returning(|id| Ok(id == 2));

        let service = LikeService::new(repository);
        let mut articles = vec![article(1), article(2)];
        articles.push(Article {
            is_liked: Some(false),
            ..article(3)
        });
        service.annotate(&mut articles);

        assert_eq!(articles[0].is_liked, Some(false));
        assert_eq!(articles[1].is_liked, Some(true));
        assert_eq!(articles[2].is_liked, Some(false));
    }
}
