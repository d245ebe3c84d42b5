//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The frontier: admission control, task queue and result store
//! - HTTP fetching
//! - HTML link extraction
//! - Per-task processing and worker pool coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod worker;

pub use coordinator::{run_crawl, Coordinator, PoolSettings};
pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use frontier::{Frontier, FrontierError};
pub use parser::{extract_links, HtmlLinkExtractor, LinkExtractor};
pub use worker::{Crawler, Visit, VisitError};
