// src/fetch/mod.rs
// =============================================================================
// This module downloads pages over HTTP.
//
// The crawler core never talks to the network directly: it takes an async
// fetch closure. This module provides the production implementation of that
// closure, built on reqwest:
// - one shared Client with connection pooling
// - a bounded per-request timeout, so one unresponsive host cannot stall
//   the whole crawl
// - a limited redirect policy (redirect loops become errors)
//
// Any failure here (timeout, DNS, TLS, non-2xx status) surfaces as an
// anyhow error that the crawl loop records and absorbs.
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::Client;
use std::time::Duration;

// Builds the HTTP client every fetch in a run shares
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()?;
    Ok(client)
}

// Fetches a page and returns its body as text
//
// Non-2xx responses are errors: a 404 page's body is not content worth
// scanning, and the crawl treats it like any other unreachable page.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP {}", response.status()));
    }

    let body = response.text().await?;
    Ok(body)
}
