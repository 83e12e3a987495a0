use crate::config::types::{Config, HttpConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// Category names are normalized to trimmed lowercase in place before they
/// are checked.
pub fn validate(config: &mut Config) -> Result<(), ConfigError> {
    validate_site_config(&mut config.site)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target site description
fn validate_site_config(config: &mut SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("start-url", &config.start_url)?;
    validate_http_url("base-url", &config.base_url)?;

    // Url::join drops the last path segment of a base without a trailing slash
    if !config.base_url.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base-url must end with '/', got '{}'",
            config.base_url
        )));
    }

    if config.categories.is_empty() {
        return Err(ConfigError::Validation(
            "categories cannot be empty".to_string(),
        ));
    }

    for category in config.categories.iter_mut() {
        *category = category.trim().to_lowercase();

        let well_formed = !category.is_empty()
            && category
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_');

        if !well_formed {
            return Err(ConfigError::Validation(format!(
                "category names must be non-empty and alphanumeric, got '{}'",
                category
            )));
        }
    }

    let mut seen = std::collections::HashSet::new();
    for category in &config.categories {
        if !seen.insert(category.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category '{}'",
                category
            )));
        }
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if !(1..=9).contains(&config.timeout_secs) {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 9, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates export configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    config.delimiter_byte()?;

    if config.header_sample_size < 1 {
        return Err(ConfigError::Validation(
            "header-sample-size must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates that a URL parses and uses an HTTP(S) scheme
fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            key, value
        )));
    }

    Ok(())
}
