use crate::{ConfigError, ConfigResult};
use serde::Deserialize;

/// Product categories the demo shop exposes
pub const DEFAULT_CATEGORIES: &[&str] = &["watch", "mobile", "mouse", "hdd", "headphones"];

/// Main configuration structure for Shop-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Target site description
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Page carrying the navigation menu
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Prefix every discovered href is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Known product categories (lowercase)
    pub categories: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            start_url: "https://parsinger.ru/html/index1_page_1.html".to_string(),
            base_url: "https://parsinger.ru/html/".to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 4,
            user_agent: format!("shop-harvest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Field delimiter, a single ASCII character
    pub delimiter: String,

    /// Prefix the file with a UTF-8 byte-order mark
    #[serde(rename = "byte-order-mark")]
    pub byte_order_mark: bool,

    /// Number of product pages sampled when building a standalone header
    #[serde(rename = "header-sample-size")]
    pub header_sample_size: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: ";".to_string(),
            byte_order_mark: true,
            header_sample_size: 3,
        }
    }
}

impl OutputConfig {
    /// The delimiter as a byte
    ///
    /// Fails unless the delimiter is exactly one ASCII character.
    pub fn delimiter_byte(&self) -> ConfigResult<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(ConfigError::Validation(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            ))),
        }
    }
}
