pub mod traits;
pub mod wikipedia;
pub mod filter;
pub mod random;
pub mod trending;
pub mod mixed;
pub mod backend;
pub mod registry;

pub use traits::{clamp_count, ArticleSource, WikiApi, MAX_PAGE_SIZE};
pub use filter::QualityFilter;
pub use registry::{SourceMode, SourceRegistry};
pub use wikipedia::WikipediaClient;

#[cfg(test)]
pub(crate) mod test_server;
