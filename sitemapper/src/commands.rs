use clap::arg;
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitemapper")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitemapper")
        .about("Crawl a website from a seed URL and write a sitemap.xml of every page found")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress progress output and the crawl report").required(false))
        .arg(
            arg!(-u --"url" <URL>)
                .required(true)
                .help("The seed URL to crawl from")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!(-d --"depth" <DEPTH>)
                .required(false)
                .help("Maximum number of links to follow away from the seed")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("3"),
        )
        .arg(
            arg!(-o --"out" <PATH>)
                .required(false)
                .help("Where to write the sitemap")
                .default_value("sitemap.xml"),
        )
        .arg(
            arg!(-t --"threads" <NUM_WORKERS>)
                .required(false)
                .help("The number of pages fetched concurrently within a depth level")
                .value_parser(clap::value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
}
