//! Breadth-first frontier for a single site crawl
//!
//! This module handles:
//! - The FIFO queue of URLs awaiting processing
//! - The visited set guaranteeing each URL is processed at most once
//!
//! Links are appended without checking the visited set; repeats are dropped
//! when they reach the head of the queue.

use std::collections::{HashSet, VecDeque};

/// FIFO queue plus visited set, owned by one crawler instance
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs waiting to be processed, head first
    queue: VecDeque<String>,

    /// Every URL handed out by `next_unvisited`; never pruned
    visited: HashSet<String>,

    /// Number of dequeued URLs dropped because they were already visited
    duplicates_skipped: u64,
}

impl Frontier {
    /// Creates a frontier holding only the seed URL
    pub fn new(seed: impl Into<String>) -> Self {
        let mut frontier = Self::default();
        frontier.push(seed);
        frontier
    }

    /// Appends a URL to the tail of the queue
    pub fn push(&mut self, url: impl Into<String>) {
        self.queue.push_back(url.into());
    }

    /// Appends URLs to the tail of the queue, preserving their order
    pub fn extend<I>(&mut self, urls: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.queue.extend(urls);
    }

    /// Pops queue entries until one has not been visited, marks it visited
    /// and returns it
    ///
    /// # Returns
    ///
    /// * `Some(String)` - A URL that has never been handed out before
    /// * `None` - The queue is exhausted
    pub fn next_unvisited(&mut self) -> Option<String> {
        while let Some(url) = self.queue.pop_front() {
            if self.visited.contains(&url) {
                self.duplicates_skipped += 1;
                tracing::trace!("Skipping already visited URL: {}", url);
                continue;
            }
            self.visited.insert(url.clone());
            return Some(url);
        }
        None
    }

    /// Number of entries currently queued, repeats included
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn duplicates_skipped(&self) -> u64 {
        self.duplicates_skipped
    }
}
