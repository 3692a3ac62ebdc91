use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Could not fetch seed {url}: {source}")]
    SeedFetch {
        url: String,
        #[source]
        source: Box<ScanError>,
    },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
