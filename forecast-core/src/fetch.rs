use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::ForecastError;

/// Source of raw response bodies. `HttpFetcher` is the real one.
#[async_trait]
pub trait Fetcher: Send + Sync + Debug {
    async fn fetch(&self, url: &Url) -> Result<String, ForecastError>;
}

/// Performs GET requests over a single `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    /// Builds the client. Without a timeout a stalled request waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ForecastError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().map_err(ForecastError::Client)?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, ForecastError> {
        let shown = redact(url);
        debug!(url = %shown, "sending request");

        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ForecastError::Transport { url: shown.clone(), source: e })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ForecastError::Transport { url: shown.clone(), source: e })?;

        if !status.is_success() {
            debug!(%status, "request rejected");
            return Err(ForecastError::HttpStatus {
                url: shown,
                status,
                body: truncate_body(&body),
            });
        }

        debug!(%status, bytes = body.len(), "received response");
        Ok(body)
    }
}

/// URL as safe to log: the `appid` credential is masked.
pub fn redact(url: &Url) -> String {
    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "appid" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();

    if !pairs.is_empty() {
        shown.query_pairs_mut().clear().extend_pairs(pairs);
    }
    shown.to_string()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
