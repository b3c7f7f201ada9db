//! # Acquisition layer
//! Thin HTTP glue over api.weather.gov and the SPC ArcGIS service. Response
//! parsing is split into pure functions so tests can run on captured bodies
//! without a network. No retries, no backoff, no auth — a failed fetch is a
//! fatal, user-visible error for the caller to surface.

pub mod nws;
pub mod spc;

use std::time::Duration;

use anyhow::{Context, Result};

/// Shared client: identifying User-Agent (api.weather.gov policy) plus the
/// geo+json Accept header both services understand.
pub fn build_client(user_agent: &str) -> Result<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/geo+json"),
    );

    reqwest::Client::builder()
        .user_agent(user_agent.to_string())
        .default_headers(headers)
        .timeout(Duration::from_secs(30))
        .build()
        .context("building http client")
}

/// Coordinates formatted the way both services expect: four decimals.
pub(crate) fn format_point(lat: f64, lon: f64) -> String {
    format!("{lat:.4},{lon:.4}")
}
