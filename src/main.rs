// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Run the crawl (or the single-page scan) and print the report
// 4. Exit with proper code (0 = target found, 1 = not found, 2 = error)
//
// The handlers wire the collaborators together: the session (crawl state),
// the reqwest-backed fetch closure, and the scanner. Ctrl-C flips a stop
// flag that the crawl loop checks between rounds, so an interrupted crawl
// still prints the matches it collected.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - frontier state and the crawl loop
mod fetch; // src/fetch/ - HTTP page downloads
mod scanner; // src/scanner/ - per-page tokenizing and matching

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

use cli::{Cli, Commands};
use crawl::{run_crawl, CrawlReport, CrawlSession, RunOptions};

#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // An unexpected error occurred: print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = target found on at least one page
//   Ok(1) = crawl finished without a match
//   Err   = invalid input or an unexpected failure (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            seed_url,
            target,
            max,
            json,
            concurrency,
            timeout_secs,
            delay_ms,
        } => {
            handle_crawl(
                &seed_url,
                &target,
                max,
                json,
                concurrency,
                timeout_secs,
                delay_ms,
            )
            .await
        }
        Commands::Page {
            page_url,
            target,
            json,
            timeout_secs,
        } => handle_page(&page_url, &target, json, timeout_secs).await,
    }
}

// Handles the 'crawl' subcommand: the full bounded breadth-first hunt
async fn handle_crawl(
    seed_url: &str,
    target: &str,
    max: usize,
    json: bool,
    concurrency: usize,
    timeout_secs: u64,
    delay_ms: u64,
) -> Result<i32> {
    // Validates every precondition (max >= 1, non-empty target, http(s)
    // seed) and admits the seed. Nothing has touched the network yet.
    let mut session = CrawlSession::new(seed_url, target, max)?;
    let client = fetch::build_client(Duration::from_secs(timeout_secs))?;

    println!("🔍 Hunting for \"{}\" starting at {}", target, seed_url);
    println!("📊 Visiting at most {} page(s)", max);

    // Ctrl-C requests a stop; the loop notices between rounds and the
    // partial report still gets printed below
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("Stop requested, finishing the current round...");
                stop.store(true, Ordering::Relaxed);
            }
        });
    }

    let options = RunOptions {
        concurrency,
        delay: Duration::from_millis(delay_ms),
        stop: Some(stop),
    };

    // The production fetch closure: each call clones the pooled client
    let fetch_page = |url: Url| {
        let client = client.clone();
        async move { fetch::fetch_page(&client, url.as_str()).await }
    };

    let started = Instant::now();
    let report = run_crawl(&mut session, fetch_page, options).await;
    let elapsed = started.elapsed();

    print_report(&report, elapsed, json)?;

    Ok(if report.found_any() { 0 } else { 1 })
}

// Handles the 'page' subcommand: fetch one URL and scan it, no traversal
async fn handle_page(page_url: &str, target: &str, json: bool, timeout_secs: u64) -> Result<i32> {
    let target = target.trim();
    if target.is_empty() {
        bail!("target word must not be empty");
    }

    let url = Url::parse(page_url).map_err(|e| anyhow!("Invalid URL '{}': {}", page_url, e))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        bail!("URL must use http or https, got '{}'", url.scheme());
    }

    let client = fetch::build_client(Duration::from_secs(timeout_secs))?;

    println!("🔍 Scanning {} for \"{}\"", url, target);

    // A single page with nothing queued behind it: a fetch failure here is
    // the whole result, so it propagates instead of being absorbed
    let content = fetch::fetch_page(&client, url.as_str()).await?;
    let outcome = scanner::scan(&content, target);

    if json {
        let links: Vec<String> = outcome.links.iter().map(|u| u.to_string()).collect();
        let output = serde_json::json!({
            "url": url.to_string(),
            "matched": outcome.matched,
            "links": links,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        if outcome.matched {
            println!("✅ \"{}\" found on {}", target, url);
        } else {
            println!("❌ \"{}\" not found on {}", target, url);
        }
        println!("🔗 {} outbound link(s) discovered:", outcome.links.len());
        for link in &outcome.links {
            println!("   {}", link);
        }
    }

    Ok(if outcome.matched { 0 } else { 1 })
}

// Wrapper so the JSON report carries the elapsed time alongside the
// crawl results
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a CrawlReport,
    elapsed_secs: f64,
}

// Prints the crawl report either as a table or JSON
fn print_report(report: &CrawlReport, elapsed: Duration, json: bool) -> Result<()> {
    if json {
        let output = JsonReport {
            report,
            elapsed_secs: elapsed.as_secs_f64(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    if report.matches.is_empty() {
        println!("❌ Target not found on any visited page");
    } else {
        println!("✅ Target found at {} location(s):", report.matches.len());
        for url in &report.matches {
            println!("   {}", url);
        }
    }

    println!();
    println!("📊 Summary:");
    println!("   📄 Pages visited: {}", report.pages_fetched);
    println!("   🔗 Locations admitted: {}", report.admitted);
    println!("   ⚠️  Fetch failures: {}", report.failures.len());
    if report.stopped_early {
        println!("   🛑 Stopped early on request");
    }
    println!("   ⏱️  Elapsed: {:.2}s", elapsed.as_secs_f64());

    Ok(())
}
