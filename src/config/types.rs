use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for the crawler
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
}

/// Worker pool configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Number of workers started when running with `--threaded`
    pub threaded_workers: usize,

    /// How long an idle worker waits for a task before treating the frontier as drained (milliseconds)
    pub dequeue_timeout_ms: u64,

    /// What an idle worker does once its dequeue times out
    pub drain: DrainPolicy,
}

impl CrawlerConfig {
    pub fn dequeue_timeout(&self) -> Duration {
        Duration::from_millis(self.dequeue_timeout_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            threaded_workers: 10,
            dequeue_timeout_ms: 1000,
            drain: DrainPolicy::default(),
        }
    }
}

/// Drain detection strategy for idle workers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrainPolicy {
    /// Exit as soon as one dequeue times out.
    ///
    /// An idle worker can exit while a busy one is still fetching a page that
    /// will add more tasks. The busy worker drains those tasks itself, so
    /// nothing is lost, but the pool shrinks for the rest of the crawl.
    #[default]
    IdleTimeout,

    /// Exit only when a dequeue times out and no task is in flight anywhere
    /// in the pool.
    Quiescent,
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Total time allowed for one request, body included (milliseconds)
    pub request_timeout_ms: u64,

    /// Time allowed to establish a connection (milliseconds)
    pub connect_timeout_ms: u64,
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            request_timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
        }
    }
}
