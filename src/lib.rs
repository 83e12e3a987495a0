//! Shop-Harvest: a product catalogue harvester
//!
//! This crate walks a demo e-commerce site's link hierarchy (categories,
//! paginated listings, product cards), extracts product fields from the
//! pages it finds, and exports them as delimited tables or aggregates them
//! into a total stock value.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod layout;
pub mod output;
pub mod url;

#[cfg(test)]
pub(crate) mod test_support;

use thiserror::Error;

/// Main error type for Shop-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Missing element {element} on {url}")]
    MissingElement { url: String, element: String },

    #[error("Invalid category '{category}', expected one of: {}", .known.join(", "))]
    InvalidCategory { category: String, known: Vec<String> },

    #[error("Stock and price lists differ on {url}: {quantities} quantities, {prices} prices")]
    SchemaMismatch {
        url: String,
        quantities: usize,
        prices: usize,
    },

    #[error("Invalid number in {field} on {url}: '{value}'")]
    InvalidNumber {
        url: String,
        field: String,
        value: String,
    },

    #[error("Stock value overflows at {url}")]
    ValueOverflow { url: String },

    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Transport failures raised by a [`crawler::Fetch`] implementation
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url } | Self::Status { url, .. } | Self::Network { url, .. } => url,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Shop-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Fetch, HttpFetcher, UrlDiscovery};
pub use extract::{Attribute, Extractor, ListingRecord, ProductRecord};
pub use layout::SiteLayout;
pub use crate::url::{classify_urls, UrlKind};
