pub mod traits;
pub mod sqlite;
pub mod disabled;

pub use traits::{LikeRepository, LikedArticle, SessionCache};
pub use sqlite::{SqliteLikeRepository, SqliteSessionCache, SqliteStorage};
pub use disabled::DisabledSessionCache;
