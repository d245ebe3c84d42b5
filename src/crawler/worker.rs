//! Crawl worker - turns one task into frontier entries and an outcome record
//!
//! Processing is terminal in one pass: a task is either discarded for depth,
//! or exactly one outcome is recorded for it. Failures are classified into
//! status bands and never escape to the worker loop.

use crate::crawler::fetcher::{FetchError, Fetcher};
use crate::crawler::frontier::{Frontier, FrontierError};
use crate::crawler::parser::LinkExtractor;
use crate::state::{
    OutcomeRecord, Task, FRONTIER_FAILURE, TRANSPORT_FAILURE, UNCLASSIFIED_FAILURE,
};
use crate::url::{extract_host, prepare_base_url};
use std::any::Any;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinError;

/// Why a task could not produce a normal visit
#[derive(Debug, Error)]
pub enum VisitError {
    #[error(transparent)]
    Transport(#[from] FetchError),

    #[error(transparent)]
    Frontier(#[from] FrontierError),

    #[error("{0}")]
    Unclassified(String),
}

impl VisitError {
    /// Status code recorded for this failure
    pub fn status(&self) -> u16 {
        match self {
            Self::Transport(_) => TRANSPORT_FAILURE,
            Self::Frontier(_) => FRONTIER_FAILURE,
            Self::Unclassified(_) => UNCLASSIFIED_FAILURE,
        }
    }

    fn from_join(e: JoinError) -> Self {
        if e.is_panic() {
            Self::Unclassified(panic_message(e.into_panic()))
        } else {
            Self::Unclassified(e.to_string())
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked".to_string()
    }
}

/// A page that answered at the transport level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visit {
    pub status: u16,
    pub score: f64,
}

/// Processes crawl tasks against a shared frontier
pub struct Crawler<F, E> {
    frontier: Arc<Frontier>,
    fetcher: F,
    extractor: E,
    base_url: String,
    base_host: Option<String>,
    max_depth: u32,
}

impl<F: Fetcher, E: LinkExtractor> Crawler<F, E> {
    /// Creates a crawler rooted at `base_url`
    ///
    /// The seed gets `http://` when it has no scheme. Its host is the fixed
    /// reference for every page's locality score.
    pub fn new(
        frontier: Arc<Frontier>,
        fetcher: F,
        extractor: E,
        base_url: &str,
        max_depth: u32,
    ) -> Self {
        let base_url = prepare_base_url(base_url);
        let base_host = extract_host(&base_url);
        Self {
            frontier,
            fetcher,
            extractor,
            base_url,
            base_host,
            max_depth,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn frontier(&self) -> &Arc<Frontier> {
        &self.frontier
    }

    /// Fraction of `urls` that point at the seed's host
    ///
    /// Hosts are compared without their port, so `site.com:8080` is local to a
    /// `site.com` seed even though the dedup key tells the two apart. An empty
    /// set scores 0.
    pub fn calculate_score(&self, urls: &BTreeSet<String>) -> f64 {
        if urls.is_empty() {
            return 0.0;
        }

        let inner = urls
            .iter()
            .filter(|url| {
                self.base_host.is_some() && extract_host(url.as_str()) == self.base_host
            })
            .count();

        inner as f64 / urls.len() as f64
    }

    /// Queues every link at `depth`, unless the children would land beyond max depth
    pub fn enqueue_links(&self, urls: &BTreeSet<String>, depth: u32) -> Result<(), FrontierError> {
        if depth.saturating_add(1) > self.max_depth {
            return Ok(());
        }

        let mut admitted = 0;
        for url in urls {
            if self.frontier.enqueue(url, depth)? {
                admitted += 1;
            }
        }
        tracing::trace!("Admitted {} of {} links at depth {}", admitted, urls.len(), depth);

        Ok(())
    }

    /// Processes one task and records its outcome
    ///
    /// # Returns
    ///
    /// * `Some(OutcomeRecord)` - The outcome written to the frontier
    /// * `None` - The task was beyond max depth and discarded
    pub async fn crawl(self: &Arc<Self>, task: Task) -> Option<OutcomeRecord> {
        let depth = task.visit_depth();
        if depth > self.max_depth {
            tracing::debug!("Discarding {} at depth {} (max {})", task.url, depth, self.max_depth);
            return None;
        }

        // Run the visit on its own task so a panic is contained and classified
        let crawler = Arc::clone(self);
        let url = task.url.clone();
        let visit = tokio::spawn(async move { crawler.visit(&url, depth).await })
            .await
            .unwrap_or_else(|e| Err(VisitError::from_join(e)));

        let outcome = match visit {
            Ok(visit) => OutcomeRecord::visited(task.url, visit.status, visit.score, depth),
            Err(e) => {
                tracing::warn!("Failed {} (status {}): {}", task.url, e.status(), e);
                OutcomeRecord::failed(task.url, e.status(), depth, e.to_string())
            }
        };

        tracing::debug!(
            "Visited {} at depth {}: status {}, score {}",
            outcome.url,
            outcome.depth,
            outcome.status,
            outcome.score
        );

        if let Err(e) = self.frontier.record_outcome(outcome.clone()) {
            tracing::warn!("Could not record outcome for {}: {}", outcome.url, e);
        }

        Some(outcome)
    }

    /// Fetches a page, scores it and fans out to its links
    pub async fn visit(&self, url: &str, depth: u32) -> Result<Visit, VisitError> {
        let page = self.fetcher.fetch(url).await?;
        if page.status >= 400 {
            return Ok(Visit {
                status: page.status,
                score: 0.0,
            });
        }

        let links = self.extractor.extract_links(url, &page.body);
        let score = self.calculate_score(&links);
        self.enqueue_links(&links, depth)?;

        Ok(Visit {
            status: page.status,
            score,
        })
    }
}
