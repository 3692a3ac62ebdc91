pub mod crawler;
pub mod error;
pub mod fetch;
pub mod link;
pub mod normalize;
pub mod result;

pub use crawler::{CrawlState, Crawler, ProgressCallback};
pub use error::ScanError;
pub use fetch::{FetchedPage, Fetcher, HttpFetcher};
pub use link::{HtmlLink, parse_links};
pub use normalize::Origin;
pub use result::{CrawlOutcome, CrawlResult};
