pub mod client;
pub mod error;

pub use client::{FeedClientConfig, FeedSource, HttpFeedClient};
pub use error::{Feed, FeedError};
