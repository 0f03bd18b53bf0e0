use rusqlite::OptionalExtension;

use crate::domain::Article;
use crate::errors::{SwipeError, SwipeResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::SessionCache;

pub const FEED_CACHE_KEY: &str = "feed:articles";

/// Feed sequence stored as a JSON array under a single key
pub struct SqliteSessionCache {
    storage: SqliteStorage,
    key: String,
}

impl SqliteSessionCache {
    pub fn new(storage: SqliteStorage) -> Self {
        Self::with_key(storage, FEED_CACHE_KEY)
    }

    pub fn with_key(storage: SqliteStorage, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }
}

impl SessionCache for SqliteSessionCache {
    fn load(&self) -> SwipeResult<Option<Vec<Article>>> {
        let conn = self.storage.connection()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM session_store WHERE key = ?1",
                [&self.key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| SwipeError::Cache(format!("malformed cached feed: {}", e))),
            None => Ok(None),
        }
    }

    fn save(&self, items: &[Article]) -> SwipeResult<()> {
        let json = serde_json::to_string(items)?;
        let conn = self.storage.connection()?;
        conn.execute(
            "INSERT INTO session_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            (&self.key, &json),
        )?;
        Ok(())
    }

    fn clear(&self) -> SwipeResult<()> {
        let conn = self.storage.connection()?;
        conn.execute("DELETE FROM session_store WHERE key = ?1", [&self.key])?;
        Ok(())
    }
}
