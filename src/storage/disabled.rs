use crate::domain::Article;
use crate::errors::SwipeResult;
use crate::storage::traits::SessionCache;

/// Session cache that never remembers anything
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledSessionCache;

impl SessionCache for DisabledSessionCache {
    fn load(&self) -> SwipeResult<Option<Vec<Article>>> {
        Ok(None)
    }

    fn save(&self, _items: &[Article]) -> SwipeResult<()> {
        Ok(())
    }

    fn clear(&self) -> SwipeResult<()> {
        Ok(())
    }
}
