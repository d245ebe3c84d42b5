//! State module for tasks and crawl outcomes
//!
//! # Components
//!
//! - `Task`: a pending visit handed out by the frontier
//! - `OutcomeRecord`: the final status/score/message recorded for a URL
//! - `StatusBand`: groups recorded status codes into reportable classes

mod outcome;
mod task;

// Re-export main types
pub use outcome::{
    OutcomeRecord, StatusBand, FRONTIER_FAILURE, TRANSPORT_FAILURE, UNCLASSIFIED_FAILURE,
};
pub use task::Task;
