// src/crawl/runner.rs
// =============================================================================
// This module drives the crawl loop.
//
// How it works:
// 1. Dequeue up to `concurrency` URLs from the session's frontier
// 2. Fetch them (concurrently when concurrency > 1, via an ordered stream)
// 3. Scan each page in dequeue order, offer every discovered link back into
//    the session, and record a match when the scan says so
// 4. Repeat until the frontier is empty or a stop was requested
//
// The fetch step is a caller-supplied async closure. Production passes a
// reqwest-backed closure; tests pass an in-memory map. A failed fetch is a
// recoverable per-page outcome: it is recorded on the report and the crawl
// moves on. Nothing aborts a crawl once it has started.
//
// Ordering guarantee: the match list is in visitation (FIFO admission) order,
// with any concurrency setting. `buffered` yields fetch results in the order
// the futures were queued, unlike `buffer_unordered`, and all session
// mutation happens on this single task, so admissions stay atomic and the
// cap stays hard.
// =============================================================================

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use url::Url;

use super::session::CrawlSession;
use crate::scanner;

// One page that could not be fetched
#[derive(Debug, Clone, Serialize)]
pub struct FetchFailure {
    /// The URL whose fetch failed
    pub url: String,
    /// What went wrong, as reported by the fetcher
    pub reason: String,
}

// Everything a finished (or stopped) crawl has to report
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// URLs where the target word was observed, in visitation order
    pub matches: Vec<String>,
    /// How many fetch attempts were made (successes and failures)
    pub pages_fetched: usize,
    /// How many URLs were ever admitted to the frontier
    pub admitted: usize,
    /// Per-page fetch failures, absorbed without stopping the crawl
    pub failures: Vec<FetchFailure>,
    /// True when the crawl wound down because a stop was requested
    pub stopped_early: bool,
}

impl CrawlReport {
    /// True when the target was observed on at least one page
    pub fn found_any(&self) -> bool {
        !self.matches.is_empty()
    }
}

// Knobs for one crawl run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// How many fetches to run per round (1 = strictly sequential)
    pub concurrency: usize,
    /// Politeness delay between fetch rounds
    pub delay: Duration,
    /// Optional stop flag, checked between rounds
    pub stop: Option<Arc<AtomicBool>>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            concurrency: 1,
            delay: Duration::ZERO,
            stop: None,
        }
    }
}

// Runs the crawl loop to completion and returns the report
//
// Parameters:
//   session: the frontier state, seeded and validated by the caller
//   fetch: async closure mapping a URL to its raw content (or a failure)
//   options: concurrency, politeness delay, stop flag
//
// The loop ends when the frontier is exhausted (the cap makes that certain)
// or when the stop flag is observed between rounds. Either way the report
// holds every match collected so far, so a stopped crawl still returns
// valid partial results.
pub async fn run_crawl<F, Fut>(session: &mut CrawlSession, fetch: F, options: RunOptions) -> CrawlReport
where
    F: Fn(Url) -> Fut,
    Fut: Future<Output = anyhow::Result<String>>,
{
    let concurrency = options.concurrency.max(1);
    let mut report = CrawlReport {
        matches: Vec::new(),
        pages_fetched: 0,
        admitted: session.admitted(),
        failures: Vec::new(),
        stopped_early: false,
    };

    while session.has_next() {
        if let Some(stop) = &options.stop {
            if stop.load(Ordering::Relaxed) {
                report.stopped_early = true;
                break;
            }
        }

        // One round: up to `concurrency` URLs off the front of the frontier
        let mut round = Vec::with_capacity(concurrency);
        while round.len() < concurrency {
            match session.next() {
                Some(url) => round.push(url),
                None => break,
            }
        }

        // Fetch the round. The stream is ordered, so results come back in
        // dequeue order no matter which request finishes first.
        let fetched: Vec<(Url, anyhow::Result<String>)> = stream::iter(round)
            .map(|url| {
                let page = fetch(url.clone());
                async move { (url, page.await) }
            })
            .buffered(concurrency)
            .collect()
            .await;

        // Scan and offer sequentially; the session is only touched here
        for (url, result) in fetched {
            report.pages_fetched += 1;
            println!("  Visiting: {}", url);

            match result {
                Ok(content) => {
                    let outcome = scanner::scan(&content, session.target());
                    for link in outcome.links {
                        session.offer(link);
                    }
                    if outcome.matched {
                        report.matches.push(url.to_string());
                    }
                }
                Err(e) => {
                    eprintln!("  Warning: failed to fetch {}: {}", url, e);
                    report.failures.push(FetchFailure {
                        url: url.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        // Polite crawling: breathe between rounds, not after the last one
        if !options.delay.is_zero() && session.has_next() {
            tokio::time::sleep(options.delay).await;
        }
    }

    report.admitted = session.admitted();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::collections::HashMap;

    // Builds an in-memory fake fetcher. URLs present in the map resolve to
    // their content; anything else fails like an unreachable host.
    fn fetch_from(
        entries: &[(&str, &str)],
    ) -> impl Fn(Url) -> futures::future::Ready<anyhow::Result<String>> {
        let map: HashMap<String, String> = entries
            .iter()
            .map(|(url, content)| (url.to_string(), content.to_string()))
            .collect();
        move |url: Url| {
            futures::future::ready(
                map.get(url.as_str())
                    .cloned()
                    .ok_or_else(|| anyhow!("no route to {}", url)),
            )
        }
    }

    #[tokio::test]
    async fn test_matches_come_back_in_visitation_order() {
        let fetch = fetch_from(&[
            (
                "http://a.test/",
                r#"bacon intro href="http://b.test/" and href="http://c.test/""#,
            ),
            ("http://b.test/", "nothing here"),
            ("http://c.test/", "more bacon"),
        ]);
        let mut session = CrawlSession::new("http://a.test", "bacon", 10).unwrap();

        let report = run_crawl(&mut session, fetch, RunOptions::default()).await;

        assert_eq!(report.matches, vec!["http://a.test/", "http://c.test/"]);
        assert_eq!(report.pages_fetched, 3);
        assert_eq!(report.admitted, 3);
        assert!(report.failures.is_empty());
        assert!(!report.stopped_early);
    }

    #[tokio::test]
    async fn test_cap_bounds_fetches_not_discoveries() {
        // The seed links to three pages, but max = 2 leaves room for only
        // one of them (discovery order), and the rest are dropped
        let fetch = fetch_from(&[
            (
                "http://a.test/",
                r#"href="http://b.test/" href="http://c.test/" href="http://d.test/""#,
            ),
            ("http://b.test/", "bacon"),
            ("http://c.test/", "bacon"),
            ("http://d.test/", "bacon"),
        ]);
        let mut session = CrawlSession::new("http://a.test", "bacon", 2).unwrap();

        let report = run_crawl(&mut session, fetch, RunOptions::default()).await;

        assert_eq!(report.pages_fetched, 2);
        assert_eq!(report.admitted, 2);
        assert_eq!(report.matches, vec!["http://b.test/"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_does_not_stop_the_crawl() {
        // b.test is unreachable; c.test, queued from the same page, must
        // still be visited
        let fetch = fetch_from(&[
            (
                "http://a.test/",
                r#"href="http://b.test/" href="http://c.test/""#,
            ),
            ("http://c.test/", "bacon at last"),
        ]);
        let mut session = CrawlSession::new("http://a.test", "bacon", 10).unwrap();

        let report = run_crawl(&mut session, fetch, RunOptions::default()).await;

        assert_eq!(report.pages_fetched, 3);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].url, "http://b.test/");
        assert_eq!(report.matches, vec!["http://c.test/"]);
    }

    #[tokio::test]
    async fn test_each_page_is_fetched_at_most_once() {
        // a and b link to each other and repeat links; the cycle must not
        // cause revisits
        let fetch = fetch_from(&[
            (
                "http://a.test/",
                r#"href="http://b.test/" href="http://b.test/" href="http://a.test/""#,
            ),
            ("http://b.test/", r#"href="http://a.test/""#),
        ]);
        let mut session = CrawlSession::new("http://a.test", "bacon", 10).unwrap();

        let report = run_crawl(&mut session, fetch, RunOptions::default()).await;

        assert_eq!(report.pages_fetched, 2);
        assert_eq!(report.admitted, 2);
    }

    #[tokio::test]
    async fn test_preset_stop_flag_yields_valid_partial_report() {
        let fetch = fetch_from(&[("http://a.test/", "bacon")]);
        let mut session = CrawlSession::new("http://a.test", "bacon", 10).unwrap();

        let stop = Arc::new(AtomicBool::new(true));
        let options = RunOptions {
            stop: Some(stop),
            ..Default::default()
        };
        let report = run_crawl(&mut session, fetch, options).await;

        assert!(report.stopped_early);
        assert_eq!(report.pages_fetched, 0);
        assert!(report.matches.is_empty());
        // The frontier is intact: the seed is still queued
        assert!(session.has_next());
    }

    #[tokio::test]
    async fn test_concurrent_run_matches_sequential_run() {
        let graph: &[(&str, &str)] = &[
            (
                "http://a.test/",
                r#"href="http://b.test/" href="http://c.test/" href="http://d.test/""#,
            ),
            ("http://b.test/", r#"bacon href="http://e.test/""#),
            ("http://c.test/", "nothing"),
            ("http://d.test/", "smoky bacon"),
            ("http://e.test/", "Baconator"),
        ];

        let mut sequential = CrawlSession::new("http://a.test", "bacon", 10).unwrap();
        let seq_report =
            run_crawl(&mut sequential, fetch_from(graph), RunOptions::default()).await;

        let mut concurrent = CrawlSession::new("http://a.test", "bacon", 10).unwrap();
        let options = RunOptions {
            concurrency: 3,
            ..Default::default()
        };
        let conc_report = run_crawl(&mut concurrent, fetch_from(graph), options).await;

        assert_eq!(seq_report.matches, conc_report.matches);
        assert_eq!(seq_report.pages_fetched, conc_report.pages_fetched);
        assert_eq!(seq_report.admitted, conc_report.admitted);
    }
}
