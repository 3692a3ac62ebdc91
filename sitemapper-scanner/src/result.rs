use std::collections::HashSet;

/// What happened when a single URL was visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    pub url: String,
    pub depth: usize,
    pub status_code: Option<u16>,
    pub links_found: Vec<String>,
    pub error: Option<String>,
}

impl CrawlResult {
    pub fn new(url: String, depth: usize) -> Self {
        Self {
            url,
            depth,
            status_code: None,
            links_found: Vec::new(),
            error: None,
        }
    }

    pub fn with_error(url: String, depth: usize, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::new(url, depth)
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// The pages a crawl visited, plus a record for each.
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    pub visited: HashSet<String>,
    pub results: Vec<CrawlResult>,
}

impl CrawlOutcome {
    /// Visited URLs in ascending order.
    pub fn sorted_pages(&self) -> Vec<&str> {
        let mut pages: Vec<&str> = self.visited.iter().map(String::as_str).collect();
        pages.sort_unstable();
        pages
    }

    pub fn failures(&self) -> impl Iterator<Item = &CrawlResult> {
        self.results.iter().filter(|r| r.is_failure())
    }

    pub fn max_depth_reached(&self) -> usize {
        self.results.iter().map(|r| r.depth).max().unwrap_or(0)
    }
}
