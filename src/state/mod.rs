//! State module for tracking crawl progress
//!
//! - `PageOutcome`: the terminal result of processing one dequeued URL

mod page_outcome;

pub use page_outcome::PageOutcome;
