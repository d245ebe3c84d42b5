//! URL handling module
//!
//! This module provides the dedup key used by the frontier, the crawlable
//! protocol filter, seed preparation, and host extraction for scoring.

mod domain;
mod normalize;
mod protocol;

// Re-export main functions
pub use domain::extract_host;
pub use normalize::url_key;
pub use protocol::{is_crawlable, prepare_base_url, scheme_of, CRAWLABLE_SCHEMES};
