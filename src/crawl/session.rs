// src/crawl/session.rs
// =============================================================================
// This module owns all crawl state: the visited set, the frontier queue, the
// case-folded target word, and the visitation cap.
//
// The rules the session enforces:
// - A URL enters the frontier at most once per session. Deduplication happens
//   at admission time (offer), not at dequeue time, so duplicate discoveries
//   can never pile up in the queue ahead of the dequeue.
// - The number of URLs ever admitted never exceeds the cap. Every admitted
//   URL is fetched at most once, so the cap bounds fetch attempts.
// - offer() is the only way anything gets into the set or the queue, and it
//   updates both together.
//
// Rust concepts:
// - HashSet: To track admitted URLs (O(1) membership test)
// - VecDeque: FIFO queue for breadth-first ordering
// - Url: Parsed URLs compare by their normalized string form
// =============================================================================

use anyhow::{anyhow, bail, Result};
use std::collections::{HashSet, VecDeque};
use url::Url;

// All state for one crawl. Created per invocation, dropped when the crawl
// loop terminates; nothing persists between sessions.
#[derive(Debug)]
pub struct CrawlSession {
    // Every URL ever admitted (enqueued), including ones already dequeued
    visited: HashSet<Url>,
    // URLs admitted but not yet fetched, in admission order
    queue: VecDeque<Url>,
    // The target word, lowercased once here so the scan never re-folds it
    // inconsistently
    target: String,
    // Hard upper bound on admissions, and therefore on fetch attempts
    max: usize,
}

impl CrawlSession {
    // Creates a session with the seed already admitted
    //
    // Parameters:
    //   seed: the URL to start crawling from (must be absolute http/https)
    //   target: the word to hunt for (must be non-empty)
    //   max: how many pages the crawl may visit (must be at least 1)
    //
    // Returns: Err for any invalid input - the crawl must not start in an
    // inconsistent state, so these checks happen before any traversal.
    //
    // The seed counts as the first admission: with max = 1 the crawl visits
    // the seed and nothing else.
    pub fn new(seed: &str, target: &str, max: usize) -> Result<Self> {
        if max < 1 {
            bail!("max must be at least 1");
        }

        let target = target.trim().to_lowercase();
        if target.is_empty() {
            bail!("target word must not be empty");
        }

        let seed = Url::parse(seed).map_err(|e| anyhow!("Invalid seed URL '{}': {}", seed, e))?;
        if seed.scheme() != "http" && seed.scheme() != "https" {
            bail!("Seed URL must use http or https, got '{}'", seed.scheme());
        }

        let mut session = CrawlSession {
            visited: HashSet::new(),
            queue: VecDeque::new(),
            target,
            max,
        };
        session.visited.insert(seed.clone());
        session.queue.push_back(seed);

        Ok(session)
    }

    // True while the frontier still holds URLs awaiting a fetch
    pub fn has_next(&self) -> bool {
        !self.queue.is_empty()
    }

    // Dequeues the next URL to fetch, in FIFO (breadth-first) order
    pub fn next(&mut self) -> Option<Url> {
        self.queue.pop_front()
    }

    // Attempts to admit a discovered URL into the frontier
    //
    // Admission succeeds only if the URL has never been admitted before AND
    // the admission count is still below the cap. Both the visited set and
    // the queue are updated together, which keeps the invariant that the
    // queue never holds a URL missing from the set.
    //
    // Returns false for a duplicate or a reached cap. That is a normal
    // outcome for a crawler, not a failure.
    pub fn offer(&mut self, candidate: Url) -> bool {
        if self.visited.contains(&candidate) || self.visited.len() >= self.max {
            return false;
        }

        self.queue.push_back(candidate.clone());
        self.visited.insert(candidate);
        true
    }

    // How many URLs have ever been admitted this session
    pub fn admitted(&self) -> usize {
        self.visited.len()
    }

    // The target word, already lowercased
    pub fn target(&self) -> &str {
        &self.target
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why HashSet AND VecDeque?
//    - The set answers "have we ever seen this URL?" in O(1)
//    - The queue remembers the order URLs were discovered in
//    - Checking the set before pushing to the queue is what makes the
//      traversal breadth-first without revisits
//
// 2. Why does next() return Option<Url>?
//    - pop_front() on an empty VecDeque returns None
//    - Callers loop with `while let Some(url) = session.next()` and the loop
//      ends naturally when the frontier runs dry
//
// 3. Why does offer() take Url by value?
//    - On success the session keeps the URL in both collections (one clone)
//    - The caller is done with the candidate either way
//
// 4. Why is the cap checked against the set size, not the queue length?
//    - The set size is the count of URLs ever admitted
//    - Every admitted URL gets fetched exactly once, so capping admissions
//      caps fetches, which is the bound a caller actually cares about
// -----------------------------------------------------------------------------
