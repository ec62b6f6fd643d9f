use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a content document comes from: a local file or an HTTP endpoint.
#[derive(Debug, Clone)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Source::Url(raw.to_string())
        } else {
            Source::File(PathBuf::from(raw))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Url(url) => url.clone(),
        }
    }
}

/// Fetches one document as text. A single attempt, no retries; HTTP requests
/// carry cache-bypassing headers so edits to the published sheet show up
/// immediately.
pub fn fetch_text(source: &Source) -> Result<String> {
    match source {
        Source::File(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        Source::Url(url) => {
            let response = client()?
                .get(url)
                .send()
                .with_context(|| format!("request to {url} failed"))?
                .error_for_status()
                .with_context(|| format!("request to {url} failed"))?;
            response
                .text()
                .with_context(|| format!("failed to read response body from {url}"))
        }
    }
}

fn client() -> Result<HttpClient> {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    HttpClient::builder()
        .default_headers(headers)
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("failed to build http client")
}
