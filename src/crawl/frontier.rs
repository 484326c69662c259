// src/crawl/frontier.rs
// =============================================================================
// The crawl frontier: (url, depth) pairs waiting to be processed.
//
// Entries go in at the back and come out at the front, so every page at
// depth N is processed before any page at depth N+1 (breadth-first).
// =============================================================================

use std::collections::VecDeque;
use url::Url;

// Represents a page waiting in the crawl queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: Url,
    pub depth: usize, // link hops from the start URL (start = 0)
}

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
}

impl Frontier {
    /// A frontier holding only the start URL at depth 0.
    pub fn seeded(start: Url) -> Self {
        let mut frontier = Self::default();
        frontier.push(start, 0);
        frontier
    }

    pub fn push(&mut self, url: Url, depth: usize) {
        self.queue.push_back(FrontierEntry { url, depth });
    }

    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
