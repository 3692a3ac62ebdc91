use sitemapper::commands::command_argument_builder;
use sitemapper::handlers::{handle_crawl, init_tracing};

#[tokio::main]
async fn main() {
    let matches = command_argument_builder().get_matches();

    init_tracing();
    handle_crawl(&matches).await;
}
