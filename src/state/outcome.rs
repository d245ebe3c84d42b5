//! Outcome records and the status bands they are reported in
use std::fmt;

/// Status recorded when the fetch failed at the transport level
pub const TRANSPORT_FAILURE: u16 = 1000;

/// Status recorded when the frontier rejected an operation mid-task
pub const FRONTIER_FAILURE: u16 = 2000;

/// Status recorded for any other failure while processing a task
pub const UNCLASSIFIED_FAILURE: u16 = 3000;

/// Classification of a recorded status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBand {
    /// Page fetched with a status below 400
    Success,

    /// Server answered with a 4xx/5xx status
    HttpError,

    /// Network, DNS or timeout failure
    Transport,

    /// Frontier invariant violated while processing the page
    Frontier,

    /// Anything else
    Unclassified,
}

impl StatusBand {
    pub fn from_status(status: u16) -> Self {
        match status {
            0..=399 => Self::Success,
            TRANSPORT_FAILURE => Self::Transport,
            FRONTIER_FAILURE => Self::Frontier,
            UNCLASSIFIED_FAILURE => Self::Unclassified,
            _ if status < TRANSPORT_FAILURE => Self::HttpError,
            _ => Self::Unclassified,
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Success)
    }

    /// Line printed under the error report for failure bands
    pub fn legend(&self) -> Option<&'static str> {
        match self {
            Self::Transport => Some("* error code 1000 are connection errors"),
            Self::Frontier => Some("* error code 2000 are crawler errors"),
            Self::Unclassified => Some("* error code 3000 are general errors"),
            Self::Success | Self::HttpError => None,
        }
    }

    pub fn all_bands() -> [Self; 5] {
        [
            Self::Success,
            Self::HttpError,
            Self::Transport,
            Self::Frontier,
            Self::Unclassified,
        ]
    }
}

impl fmt::Display for StatusBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::HttpError => "http error",
            Self::Transport => "transport failure",
            Self::Frontier => "frontier failure",
            Self::Unclassified => "unclassified failure",
        };
        f.write_str(name)
    }
}

/// Final result of visiting one URL
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeRecord {
    pub url: String,
    pub status: u16,
    /// Fraction of the page's links that stay on the seed host, in `[0, 1]`
    pub score: f64,
    pub depth: u32,
    pub message: String,
}

impl OutcomeRecord {
    /// Record for a page that was fetched, successfully or with an HTTP error status
    pub fn visited(url: impl Into<String>, status: u16, score: f64, depth: u32) -> Self {
        Self {
            url: url.into(),
            status,
            score,
            depth,
            message: String::new(),
        }
    }

    /// Record for a task that failed before producing a response
    pub fn failed(url: impl Into<String>, status: u16, depth: u32, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            score: 0.0,
            depth,
            message: message.into(),
        }
    }

    pub fn band(&self) -> StatusBand {
        StatusBand::from_status(self.status)
    }

    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}
