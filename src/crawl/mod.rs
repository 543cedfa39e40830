// src/crawl/mod.rs
// =============================================================================
// This module handles the bounded breadth-first crawl.
//
// Submodules:
// - session: the frontier state (visited set + FIFO queue + cap) with a
//   single test-and-admit entry point
// - runner: the loop that fetches, scans, and feeds discoveries back into
//   the session
//
// The split keeps all mutable crawl state behind the session's small API,
// while the runner stays a pure driver over two collaborators (the fetch
// closure and the scanner).
// =============================================================================

mod runner;
mod session;

// Re-export the crawl API so callers write `crawl::run_crawl(...)`
pub use runner::{run_crawl, CrawlReport, FetchFailure, RunOptions};
pub use session::CrawlSession;
