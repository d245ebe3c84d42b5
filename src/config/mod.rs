//! Configuration module for the crawler
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so running without a file is
//! the same as loading an empty one.
//!
//! # Example
//!
//! ```no_run
//! use site_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Threaded pool size: {}", config.crawler.threaded_workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, DrainPolicy, HttpConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
