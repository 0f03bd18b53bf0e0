mod connection;
mod like_repository;
mod session_cache;

pub use connection::SqliteStorage;
pub use like_repository::SqliteLikeRepository;
pub use session_cache::{SqliteSessionCache, FEED_CACHE_KEY};
