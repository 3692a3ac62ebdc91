use clap::ArgMatches;
use colored::Colorize;
use sitemapper_core::CoreError;
use sitemapper_core::crawl::{CrawlOptions, CrawlProgressCallback, execute_crawl, generate_crawl_report};
use sitemapper_core::sitemap::save_sitemap;
use sitemapper_scanner::CrawlOutcome;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build crawl options from parsed command line arguments
pub fn crawl_options_from(args: &ArgMatches) -> CrawlOptions {
    let defaults = CrawlOptions::default();

    CrawlOptions {
        url: args
            .get_one::<Url>("url")
            .map(|u| u.as_str().to_string())
            .unwrap_or_default(),
        max_depth: args
            .get_one::<u64>("depth")
            .map(|d| *d as usize)
            .unwrap_or(defaults.max_depth),
        threads: *args.get_one::<usize>("threads").unwrap_or(&defaults.threads),
        timeout_secs: *args.get_one::<u64>("timeout").unwrap_or(&defaults.timeout_secs),
        show_progress: !args.get_flag("quiet"),
    }
}

/// The sitemap destination, with a leading `~` expanded
pub fn output_path(args: &ArgMatches) -> PathBuf {
    let out = args
        .get_one::<String>("out")
        .map(String::as_str)
        .unwrap_or("sitemap.xml");
    PathBuf::from(shellexpand::tilde(out).as_ref())
}

/// Crawl the site and write its sitemap to `out`.
pub async fn run_crawl(
    options: CrawlOptions,
    out: &Path,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<CrawlOutcome, CoreError> {
    let outcome = execute_crawl(options, progress_callback).await?;
    save_sitemap(outcome.sorted_pages(), out)?;
    Ok(outcome)
}

pub async fn handle_crawl(args: &ArgMatches) {
    let options = crawl_options_from(args);
    let out = output_path(args);
    let quiet = !options.show_progress;
    debug!("Crawl options: {:?}", options);

    if !quiet {
        println!("\n{} {}", "Crawling".bright_white().bold(), options.url.bright_cyan());
        println!("Workers: {}", options.threads);
        println!("Max depth: {}", options.max_depth);
        println!("Output: {}\n", out.display());
    }

    let progress_callback: Option<CrawlProgressCallback> = if quiet {
        None
    } else {
        Some(Arc::new(|msg: String| {
            println!("{} {}", "→".blue(), msg);
        }))
    };

    let outcome = match run_crawl(options, &out, progress_callback).await {
        Ok(outcome) => outcome,
        Err(e @ CoreError::Output { .. }) => {
            eprintln!("{} Sitemap write failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{} Crawl failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    if quiet {
        return;
    }

    println!("\n{} Crawl complete!\n", "✓".green().bold());
    print!("{}", generate_crawl_report(&outcome));
    println!(
        "{} Sitemap with {} URLs written to {}",
        "✓".green().bold(),
        outcome.visited.len().to_string().cyan(),
        out.display().to_string().bright_white()
    );
}
