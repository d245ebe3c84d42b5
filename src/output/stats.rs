//! Statistics derived from a crawl's outcome records
//!
//! This module provides functionality for summarizing a finished crawl and
//! logging that summary.

use crate::state::{OutcomeRecord, StatusBand};
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Total number of recorded pages
    pub total_pages: usize,

    /// Count of pages by status band
    pub pages_by_band: HashMap<StatusBand, usize>,

    /// Deepest visit depth among the records
    pub max_depth_reached: u32,
}

impl CrawlStatistics {
    pub fn from_records(records: &[OutcomeRecord]) -> Self {
        let mut pages_by_band = HashMap::new();
        for record in records {
            *pages_by_band.entry(record.band()).or_insert(0) += 1;
        }

        Self {
            total_pages: records.len(),
            pages_by_band,
            max_depth_reached: records.iter().map(|r| r.depth).max().unwrap_or(0),
        }
    }

    pub fn count(&self, band: StatusBand) -> usize {
        self.pages_by_band.get(&band).copied().unwrap_or(0)
    }

    /// Pages reported with a status of 400 or above
    pub fn errors(&self) -> usize {
        StatusBand::all_bands()
            .into_iter()
            .filter(StatusBand::is_error)
            .map(|band| self.count(band))
            .sum()
    }

    pub fn successes(&self) -> usize {
        self.count(StatusBand::Success)
    }
}

/// Logs the statistics at info level
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn log_statistics(stats: &CrawlStatistics) {
    tracing::info!(
        "Crawled {} pages ({} ok, {} errors), deepest level {}",
        stats.total_pages,
        stats.successes(),
        stats.errors(),
        stats.max_depth_reached
    );

    for band in StatusBand::all_bands() {
        let count = stats.count(band);
        if band.is_error() && count > 0 {
            tracing::info!("  {}: {}", band, count);
        }
    }
}
