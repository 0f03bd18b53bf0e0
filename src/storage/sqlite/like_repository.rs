use crate::domain::Article;
use crate::errors::{SwipeError, SwipeResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::{LikeRepository, LikedArticle};

pub struct SqliteLikeRepository {
    storage: SqliteStorage,
}

impl SqliteLikeRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl LikeRepository for SqliteLikeRepository {
    fn set_liked(&self, article: &Article, liked: bool) -> SwipeResult<()> {
        let conn = self.storage.connection()?;

        let result = if liked {
            conn.execute(
                "INSERT OR REPLACE INTO liked_articles (article_id, title, url) VALUES (?1, ?2, ?3)",
                (article.id, &article.title, &article.url),
            )
        } else {
            conn.execute(
                "DELETE FROM liked_articles WHERE article_id = ?1",
                [article.id],
            )
        };

        result
            .map(|_| ())
            .map_err(|e| SwipeError::Persistence(e.to_string()))
    }

    fn is_liked(&self, article_id: i64) -> SwipeResult<bool> {
        let conn = self.storage.connection()?;
        let mut stmt =
            conn.prepare("SELECT EXISTS(SELECT 1 FROM liked_articles WHERE article_id = ?1)")?;
        let exists: bool = stmt.query_row([article_id], |row| row.get(0))?;
        Ok(exists)
    }

    fn list_liked(&self) -> SwipeResult<Vec<LikedArticle>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT article_id, title, url, liked_at FROM liked_articles ORDER BY liked_at DESC, article_id DESC",
        )?;

        let liked = stmt.query_map([], |row| {
            Ok(LikedArticle {
                article_id: row.get(0)?,
                title: row.get(1)?,
                url: row.get(2)?,
                liked_at: row.get(3)?,
            })
        })?;

        liked.collect::<Result<Vec<_>, _>>().map_err(SwipeError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_repo() -> SqliteLikeRepository {
        SqliteLikeRepository::new(SqliteStorage::in_memory().unwrap())
    }

    fn article(id: i64, title: &str) -> Article {
        Article::new(id, title.to_string(), format!("https://en.wikipedia.org/wiki/{}", title))
    }

    #[test]
    fn test_like_and_unlike() {
        let repo = setup_repo();
        let article = article(10, "Tardigrade");

        assert!(!repo.is_liked(10).unwrap());
        repo.set_liked(&article, true).unwrap();
        assert!(repo.is_liked(10).unwrap());
        repo.set_liked(&article, false).unwrap();
        assert!(!repo.is_liked(10).unwrap());
    }

    #[test]
    fn test_like_is_idempotent() {
        let repo = setup_repo();
        let article = article(10, "Tardigrade");

        repo.set_liked(&article, true).unwrap();
        repo.set_liked(&article, true).unwrap();
        assert_eq!(repo.list_liked().unwrap().len(), 1);
    }

    #[test]
    fn test_unlike_missing_is_ok() {
        let repo = setup_repo();
        assert!(repo.set_liked(&article(99, "Nothing"), false).is_ok());
    }

    #[test]
    fn test_list_liked() {
        let repo = setup_repo();
        repo.set_liked(&article(1, "Axolotl"), true).unwrap();
        repo.set_liked(&article(2, "Okapi"), true).unwrap();

        let liked = repo.list_liked().unwrap();
        assert_eq!(liked.len(), 2);
        assert!(liked.iter().any(|l| l.title == "Okapi" && l.liked_at.is_some()));
    }
}
