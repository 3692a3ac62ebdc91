use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use sitemapper_scanner::{CrawlOutcome, CrawlResult, Crawler, Origin, ScanError};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

/// Options for configuring a crawl operation
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub url: String,
    pub max_depth: usize,
    pub threads: usize,
    pub timeout_secs: u64,
    pub show_progress: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_depth: 3,
            threads: 10,
            timeout_secs: 10,
            show_progress: false,
        }
    }
}

/// Callback for reporting crawl progress
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Boundary predicate accepting absolute URLs on the same origin as `seed`.
pub fn same_origin_as(seed: &str) -> Result<impl Fn(&str) -> bool + use<>> {
    let origin = Origin::parse(seed).ok_or_else(|| ScanError::InvalidUrl(seed.to_string()))?;
    Ok(move |url: &str| origin.contains(url))
}

/// Execute a crawl with the given options
/// Returns the crawl outcome
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<CrawlOutcome> {
    let CrawlOptions {
        url,
        max_depth,
        threads,
        timeout_secs,
        show_progress,
    } = options;

    let keep = same_origin_as(&url)?;

    let progress_bar = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let fetched_count = Arc::new(AtomicUsize::new(0));

    let mut crawler = Crawler::with_timeout(timeout_secs)?.with_workers(threads);

    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        let count_clone = fetched_count.clone();
        crawler = crawler.with_progress_callback(Arc::new(move |depth: usize, url: String| {
            let count = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
            pb_clone.set_message(format!(
                "Depth {} | {} URLs fetched | {}",
                depth,
                count,
                extract_url_path(&url)
            ));
        }));
    }

    if let Some(ref callback) = progress_callback {
        callback(format!("Crawling {} (max depth {})", url, max_depth));
    }

    let outcome = crawler.crawl(&url, max_depth, keep).await;

    if let Some(ref pb) = progress_bar {
        pb.finish_and_clear();
    }

    let outcome = outcome?;
    if let Some(ref callback) = progress_callback {
        callback(format!(
            "Discovered {} pages ({} failed)",
            outcome.visited.len(),
            outcome.failures().count()
        ));
    }

    Ok(outcome)
}

/// Generate a crawl report from results
pub fn generate_crawl_report(outcome: &CrawlOutcome) -> String {
    let failures: Vec<&CrawlResult> = outcome.failures().collect();
    let total_links: usize = outcome.results.iter().map(|r| r.links_found.len()).sum();

    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Pages discovered: {}\n", outcome.visited.len()));
    report.push_str(&format!("  Failed fetches: {}\n", failures.len()));
    report.push_str(&format!("  Links followed: {}\n", total_links));
    report.push_str(&format!("  Deepest level: {}\n", outcome.max_depth_reached()));

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    let mut by_depth: BTreeMap<usize, Vec<&CrawlResult>> = BTreeMap::new();
    for result in &outcome.results {
        by_depth.entry(result.depth).or_default().push(result);
    }

    for (depth, results) in by_depth.iter_mut() {
        results.sort_by(|a, b| a.url.cmp(&b.url));

        report.push_str(&format!("## Depth {}\n", depth));
        report.push_str(&format!("  {} pages found\n\n", results.len()));

        for result in results.iter() {
            let path = extract_url_path(&result.url);

            // Color code based on status
            let status_str = match result.status_code {
                Some(code @ 200..=299) => format!("\x1b[32m{}\x1b[0m", code), // Green
                Some(code @ 300..=399) => format!("\x1b[36m{}\x1b[0m", code), // Cyan
                Some(code @ 400..=499) => format!("\x1b[33m{}\x1b[0m", code), // Orange/Yellow
                Some(code @ 500..=599) => format!("\x1b[31m{}\x1b[0m", code), // Red
                Some(code) => format!("\x1b[37m{}\x1b[0m", code),             // White
                None => "\x1b[31mERR\x1b[0m".to_string(),
            };

            report.push_str(&format!("  {} {}\n", status_str, path));
        }
        report.push('\n');
    }

    if !failures.is_empty() {
        report.push_str("## Failed\n");
        for result in failures {
            report.push_str(&format!(
                "  {} \x1b[90m{}\x1b[0m\n",
                result.url,
                result.error.as_deref().unwrap_or("unknown error")
            ));
        }
        report.push('\n');
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_origin_as_rejects_invalid_seed() {
        assert!(same_origin_as("no scheme here").is_err());
    }

    #[test]
    fn test_same_origin_as_matches_scheme_and_host() {
        let keep = same_origin_as("https://example.com/start").unwrap();
        assert!(keep("https://example.com/other"));
        assert!(!keep("https://external.com"));
        assert!(!keep("http://example.com/other"));
    }
}
