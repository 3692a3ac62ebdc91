pub mod crawl;
pub mod error;
pub mod sitemap;

pub use error::CoreError;
