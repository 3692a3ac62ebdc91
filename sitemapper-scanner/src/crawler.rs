use crate::error::{Result, ScanError};
use crate::fetch::{FetchedPage, Fetcher, HttpFetcher};
use crate::link::parse_links;
use crate::normalize::{Origin, filter_and_normalize};
use crate::result::{CrawlOutcome, CrawlResult};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::mem;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Called with `(depth, url)` just before a URL is fetched.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Frontier and visited bookkeeping for a single crawl.
#[derive(Debug, Default)]
pub struct CrawlState {
    visited: HashSet<String>,
    current: HashSet<String>,
    next: HashSet<String>,
    results: Vec<CrawlResult>,
}

impl CrawlState {
    pub fn new(seed: &str) -> Self {
        Self {
            next: HashSet::from([seed.to_string()]),
            ..Self::default()
        }
    }

    /// Promote the next level to current. Returns false once there is nothing left.
    pub fn advance(&mut self) -> bool {
        self.current = mem::take(&mut self.next);
        !self.current.is_empty()
    }

    /// Drain the current level, marking and returning the URLs not seen before.
    pub fn claim_level(&mut self) -> Vec<String> {
        let visited = &mut self.visited;
        self.current
            .drain()
            .filter(|url| visited.insert(url.clone()))
            .collect()
    }

    pub fn enqueue<I: IntoIterator<Item = String>>(&mut self, urls: I) {
        self.next.extend(urls);
    }

    pub fn record(&mut self, result: CrawlResult) {
        self.results.push(result);
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn into_outcome(self) -> CrawlOutcome {
        CrawlOutcome {
            visited: self.visited,
            results: self.results,
        }
    }
}

pub struct Crawler<F = HttpFetcher> {
    fetcher: F,
    workers: usize,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler<HttpFetcher> {
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        Ok(Self::new(HttpFetcher::with_timeout(timeout_secs)?))
    }
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            workers: 10,
            progress_callback: None,
        }
    }

    /// Maximum number of fetches in flight within one depth level.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Breadth-first crawl from `seed`, following links up to `max_depth` hops.
    ///
    /// Every level is finished before the next one starts, and no URL is
    /// fetched twice. Absolute links are only followed when `keep` accepts
    /// them; root-relative links always are. Only a failure to fetch the seed
    /// is an error; any other failed page is kept in the result with no
    /// outbound links.
    pub async fn crawl<K>(&self, seed: &str, max_depth: usize, keep: K) -> Result<CrawlOutcome>
    where
        K: Fn(&str) -> bool,
    {
        if Origin::parse(seed).is_none() {
            return Err(ScanError::InvalidUrl(seed.to_string()));
        }
        info!("Starting crawl of {} to depth {} with {} workers", seed, max_depth, self.workers);

        let mut state = CrawlState::new(seed);

        for depth in 0..=max_depth {
            if !state.advance() {
                debug!("Frontier empty before depth {}, stopping", depth);
                break;
            }

            let level = state.claim_level();
            info!("Depth {}: fetching {} page(s)", depth, level.len());

            let mut fetched = stream::iter(level)
                .map(|url| async move {
                    if let Some(ref callback) = self.progress_callback {
                        callback(depth, url.clone());
                    }
                    let page = self.fetcher.fetch(&url).await;
                    (url, page)
                })
                .buffer_unordered(self.workers);

            // Pages are parsed as they land; the frontier for depth + 1 only
            // becomes visible after `advance`.
            while let Some((url, page)) = fetched.next().await {
                match page {
                    Ok(page) => {
                        let links = page_links(&page, &keep);
                        debug!("{} -> {} link(s) kept", url, links.len());

                        let mut result = CrawlResult::new(url, depth);
                        result.status_code = Some(page.status);
                        state.enqueue(links.iter().cloned());
                        result.links_found = links;
                        state.record(result);
                    }
                    Err(e) if depth == 0 && url == seed => {
                        return Err(ScanError::SeedFetch {
                            url,
                            source: Box::new(e),
                        });
                    }
                    Err(e) => {
                        warn!("Crawl error for {}: {}", url, e);
                        state.record(CrawlResult::with_error(url, depth, e.to_string()));
                    }
                }
            }
        }

        let outcome = state.into_outcome();
        info!("Crawl complete. Visited {} pages", outcome.visited.len());
        Ok(outcome)
    }
}

/// Links on a fetched page, normalized against the page's own resolved origin.
fn page_links<K>(page: &FetchedPage, keep: &K) -> Vec<String>
where
    K: Fn(&str) -> bool + ?Sized,
{
    let Some(origin) = Origin::from_url(&page.url) else {
        warn!("No origin for {}, ignoring its links", page.url);
        return Vec::new();
    };

    let links = parse_links(&page.body);
    filter_and_normalize(&links, &origin, keep)
}
