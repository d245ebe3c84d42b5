//! Output module for crawl reports
//!
//! This module handles:
//! - Printing the tab-separated crawl and errors report
//! - Summarizing outcome records into statistics

mod report;
pub mod stats;

pub use report::{print_report, write_report};
pub use stats::{log_statistics, CrawlStatistics};
