//! Tab-separated crawl report
//!
//! The report lists every page that answered below 400 with its depth and
//! score, and optionally a second listing of every failed page with its
//! status code and error message.

use crate::output::stats::CrawlStatistics;
use crate::state::{OutcomeRecord, StatusBand};
use crate::Result;
use std::io::{self, Write};

/// Writes the crawl report for `records`, in the order given
///
/// # Arguments
///
/// * `out` - Destination of the report
/// * `records` - Outcome records, usually in admission order
/// * `report_errors` - Also write the errors report
pub fn write_report<W: Write>(
    out: &mut W,
    records: &[OutcomeRecord],
    report_errors: bool,
) -> io::Result<()> {
    let stats = CrawlStatistics::from_records(records);

    writeln!(out, "URL\tdepth\tscore")?;
    for record in records.iter().filter(|r| !r.is_error()) {
        writeln!(out, "{}\t{}\t{}", record.url, record.depth, record.score)?;
    }
    writeln!(out, "Total links crawled: {}", stats.successes())?;

    if report_errors {
        write_errors(out, records, &stats)?;
    }

    Ok(())
}

fn write_errors<W: Write>(
    out: &mut W,
    records: &[OutcomeRecord],
    stats: &CrawlStatistics,
) -> io::Result<()> {
    if stats.errors() == 0 {
        return writeln!(out, "No errors found");
    }

    writeln!(out, "\n\nErrors report")?;
    writeln!(out, "URL\tstatus code\terror message")?;
    for record in records.iter().filter(|r| r.is_error()) {
        writeln!(out, "{}\t{}\t{}", record.url, record.status, record.message)?;
    }
    writeln!(
        out,
        "Total errors crawled: {} of {} links",
        stats.errors(),
        stats.total_pages
    )?;
    for legend in StatusBand::all_bands().iter().filter_map(StatusBand::legend) {
        writeln!(out, "{}", legend)?;
    }

    Ok(())
}

/// Writes the report to stdout
///
/// # Returns
///
/// * `Ok(())` - The full report was written and flushed
/// * `Err(CrawlerError::Io)` - stdout could not be written
pub fn print_report(records: &[OutcomeRecord], report_errors: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    emit(&mut out, records, report_errors)
}

fn emit<W: Write>(out: &mut W, records: &[OutcomeRecord], report_errors: bool) -> Result<()> {
    write_report(out, records, report_errors)?;
    out.flush()?;
    Ok(())
}
