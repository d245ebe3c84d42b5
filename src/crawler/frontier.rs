//! URL frontier and result store
//!
//! The frontier is the single point of admission control for the crawl:
//! - A key map, indexed by [`url_key`], that doubles as the seen set and the
//!   result store. A key present with no record is claimed but unresolved.
//! - A FIFO queue of pending tasks shared by every worker.
//!
//! Admission (seen check, seen mark and queue push) happens under one lock,
//! so concurrent enqueues of the same logical URL admit it at most once. No
//! lock is ever held while a worker fetches a page.

use crate::state::{OutcomeRecord, Task};
use crate::url::{is_crawlable, url_key};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors raised by frontier operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontierError {
    #[error("Unsupported protocol for url {0}")]
    UnsupportedProtocol(String),

    #[error("No task arrived within {0:?}")]
    EmptyQueue(Duration),
}

/// One key in the result store
#[derive(Debug)]
struct Entry {
    /// Admission order, used to list records the way they were discovered
    seq: usize,
    record: Option<OutcomeRecord>,
}

/// Thread-safe frontier shared by all crawl workers
pub struct Frontier {
    entries: Mutex<HashMap<String, Entry>>,
    sender: mpsc::UnboundedSender<Task>,
    receiver: tokio::sync::Mutex<mpsc::UnboundedReceiver<Task>>,
    pending: AtomicUsize,
    in_flight: AtomicUsize,
    /// Tasks admitted but not yet reported done, queued or in flight
    outstanding: AtomicUsize,
}

impl Frontier {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            entries: Mutex::new(HashMap::new()),
            sender,
            receiver: tokio::sync::Mutex::new(receiver),
            pending: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            outstanding: AtomicUsize::new(0),
        }
    }

    /// Admits a URL into the frontier
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The URL's key was unseen; a task was queued
    /// * `Ok(false)` - The key was already claimed; nothing changed
    /// * `Err(FrontierError::UnsupportedProtocol)` - The URL is not http/https
    pub fn enqueue(&self, url: &str, depth: u32) -> Result<bool, FrontierError> {
        if !is_crawlable(url, false) {
            return Err(FrontierError::UnsupportedProtocol(url.to_string()));
        }

        let key = url_key(url);
        let mut entries = self.lock_entries();
        if entries.contains_key(&key) {
            tracing::trace!("Already seen {} (key {})", url, key);
            return Ok(false);
        }

        let seq = entries.len();
        entries.insert(key, Entry { seq, record: None });
        self.pending.fetch_add(1, Ordering::SeqCst);
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        // The receiver lives as long as `self`, so the send cannot fail.
        let _ = self.sender.send(Task::new(url, depth));
        tracing::trace!("Admitted {} at depth {}", url, depth);

        Ok(true)
    }

    /// Takes the next pending task, waiting up to `timeout` for one to arrive
    ///
    /// Every task returned here counts as in flight until the caller reports
    /// it with [`Frontier::task_done`].
    pub async fn dequeue(&self, timeout: Duration) -> Result<Task, FrontierError> {
        let received = tokio::time::timeout(timeout, async {
            let mut receiver = self.receiver.lock().await;
            receiver.recv().await
        })
        .await;

        match received {
            Ok(Some(task)) => {
                self.in_flight.fetch_add(1, Ordering::SeqCst);
                self.pending.fetch_sub(1, Ordering::SeqCst);
                Ok(task)
            }
            Ok(None) | Err(_) => Err(FrontierError::EmptyQueue(timeout)),
        }
    }

    /// Marks a dequeued task as finished
    ///
    /// Call this only after the task's children have been enqueued, so the
    /// outstanding count never passes through zero while work remains.
    pub fn task_done(&self) {
        let _ = self
            .in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        let _ = self
            .outstanding
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }

    /// Writes the outcome for a URL's key
    ///
    /// Overwriting an existing record is allowed and logged; the replaced
    /// record is returned.
    pub fn record_outcome(
        &self,
        record: OutcomeRecord,
    ) -> Result<Option<OutcomeRecord>, FrontierError> {
        if !is_crawlable(&record.url, false) {
            return Err(FrontierError::UnsupportedProtocol(record.url));
        }

        let key = url_key(&record.url);
        let mut entries = self.lock_entries();
        let seq = entries.len();
        let entry = entries.entry(key).or_insert(Entry { seq, record: None });

        let previous = entry.record.replace(record);
        if let Some(previous) = &previous {
            tracing::warn!(
                "Overwriting outcome for {} (status {} -> {})",
                previous.url,
                previous.status,
                entry.record.as_ref().map_or(0, |r| r.status)
            );
        }

        Ok(previous)
    }

    /// Returns the recorded outcome for a URL's key, if it has one
    pub fn outcome(&self, url: &str) -> Option<OutcomeRecord> {
        self.lock_entries()
            .get(&url_key(url))
            .and_then(|entry| entry.record.clone())
    }

    /// Returns true if the URL's key has been claimed
    pub fn is_seen(&self, url: &str) -> bool {
        self.lock_entries().contains_key(&url_key(url))
    }

    /// Number of claimed keys, resolved or not
    pub fn seen_len(&self) -> usize {
        self.lock_entries().len()
    }

    /// Number of tasks queued but not yet dequeued
    pub fn pending_len(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Number of dequeued tasks not yet reported done
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Number of admitted tasks not yet reported done
    ///
    /// Zero means the crawl is drained: nothing is queued and no worker holds
    /// a task that could still enqueue more.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Snapshot of every resolved record, in key admission order
    ///
    /// Keys that were claimed but never resolved are skipped.
    pub fn outcomes(&self) -> Vec<OutcomeRecord> {
        let entries = self.lock_entries();
        let mut resolved: Vec<(usize, OutcomeRecord)> = entries
            .values()
            .filter_map(|entry| entry.record.clone().map(|record| (entry.seq, record)))
            .collect();
        resolved.sort_by_key(|(seq, _)| *seq);
        resolved.into_iter().map(|(_, record)| record).collect()
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}
