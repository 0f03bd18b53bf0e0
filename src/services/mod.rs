pub mod feed_controller;
pub mod fetch_worker;
pub mod like_service;

pub use feed_controller::{FeedController, FeedSettings, FeedStatus};
pub use fetch_worker::{FetchCompletion, FetchDispatcher, FetchRequest, FetchWorker};
pub use like_service::LikeService;
