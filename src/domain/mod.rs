pub mod article;
pub mod like;
pub mod navigation;
pub mod window;

pub use article::{Article, SourceKind, Thumbnail};
pub use like::{LikeOutcome, PendingLike};
pub use navigation::Direction;
pub use window::render_window;
