pub mod classify;
pub mod client;
pub mod dates;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod images;
pub mod normalize;
pub mod pipeline;

pub use client::PageClient;
pub use error::ScraperError;
pub use images::ImageResolver;
pub use normalize::{normalize_content, NormalizedContent};
pub use pipeline::{
    ArticleBatch, BatchOrigin, GazetteScraper, CONTENT_LOAD_FAILED, CONTENT_UNAVAILABLE,
};
