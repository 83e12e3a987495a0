//! Configuration module for Shop-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section has defaults targeting the demo shop, so a configuration file
//! is only needed to point the harvester somewhere else.
//!
//! # Example
//!
//! ```no_run
//! use shop_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Harvesting from: {}", config.site.start_url);
//! ```

mod parser;
mod types;
pub mod validation;

// Re-export types
pub use types::{Config, HttpConfig, OutputConfig, SiteConfig, DEFAULT_CATEGORIES};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
