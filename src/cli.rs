// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is plain Rust structs and enums
// with attributes, and clap generates all the parsing, help text, and
// validation code from them.
// =============================================================================

use clap::{Parser, Subcommand};

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "pagehound",
    version = "0.1.0",
    about = "A CLI tool that crawls the web breadth-first hunting for a target word",
    long_about = "pagehound starts at a seed URL and follows links breadth-first, reporting every \
                  page where the target word appears in the page text or in a link. The crawl \
                  stops once a configurable number of pages has been visited."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

// The subcommands the user can run (crawl, page)
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl breadth-first from a seed URL and report pages containing the target word
    ///
    /// Example: pagehound crawl https://example.com bacon --max 50
    Crawl {
        /// Seed URL to start crawling from (e.g., https://example.com)
        seed_url: String,

        /// Word to hunt for, matched case-insensitively as a substring
        target: String,

        /// Maximum number of pages to visit (the seed counts as the first)
        #[arg(long, default_value_t = 100)]
        max: usize,

        /// Output the report in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// How many pages to fetch concurrently per round (1 = strictly sequential)
        #[arg(long, default_value_t = 1)]
        concurrency: usize,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,

        /// Politeness delay between fetch rounds, in milliseconds
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,
    },

    /// Fetch a single page and scan it for the target word (no crawling)
    ///
    /// Example: pagehound page https://example.com bacon
    Page {
        /// URL of the page to scan
        page_url: String,

        /// Word to hunt for, matched case-insensitively as a substring
        target: String,

        /// Output the result in JSON format
        #[arg(long)]
        json: bool,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why two subcommands?
//    - `crawl` is the real tool: bounded breadth-first traversal
//    - `page` is the same scanner pointed at one URL, handy for checking
//      what the crawler would see on a page before unleashing it
//
// 2. What does default_value_t do?
//    - Supplies a typed default when the flag is omitted
//    - --max 100 and no --max flag parse to the same value
//
// 3. Why usize for max and concurrency?
//    - Both count things (pages, in-flight requests), and counts are usize
//    - Validation beyond "is a number" (like max >= 1) happens in the
//      session constructor, where the crawl's preconditions live
// -----------------------------------------------------------------------------
