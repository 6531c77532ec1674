pub mod client;
pub mod donations;
pub mod error;
pub mod organizations;
pub mod parse_helpers;
pub mod procurements;
pub mod rows;

pub use client::{FeedClient, ScratchCopy};
pub use error::ScraperError;
pub use rows::open_feed;
