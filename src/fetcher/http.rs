//! Third-party number API integration
//!
//! One URL template per source, with `{}` replaced by the request limit:
//!
//! - `p` → prime-numbers-api.com
//! - `f` → fibonacci-api.com
//! - `e` → api.math.tools
//! - `r` → random.org (plain text, one integer per line)
//!
//! Upstream response shapes differ, so the body parser accepts a JSON
//! array, a JSON object carrying an integer array, or whitespace-separated
//! plain text.

use super::backoff::ExponentialBackoff;
use super::{FetchError, NumberFetcher, NumberSource};
use crate::config::ServiceConfig;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpNumberFetcher {
    client: reqwest::Client,
    url_templates: HashMap<NumberSource, String>,
    limit: usize,
    max_retries: u32,
    backoff_initial_ms: u64,
    backoff_max_ms: u64,
}

impl HttpNumberFetcher {
    pub fn from_config(config: &ServiceConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.upstream_timeout_ms))
            .build()?;

        Ok(Self::with_client(config, client))
    }

    /// Use a caller-built client; per-attempt timeout is the client's own
    pub fn with_client(config: &ServiceConfig, client: reqwest::Client) -> Self {
        let url_templates = NumberSource::all()
            .into_iter()
            .map(|source| (source, config.url_template(source).to_string()))
            .collect();

        Self {
            client,
            url_templates,
            limit: config.upstream_limit,
            max_retries: config.upstream_max_retries,
            backoff_initial_ms: config.upstream_backoff_ms,
            backoff_max_ms: config.upstream_backoff_max_ms,
        }
    }

    pub fn url_for(&self, source: NumberSource) -> Option<String> {
        self.url_templates
            .get(&source)
            .map(|template| template.replace("{}", &self.limit.to_string()))
    }

    async fn fetch_once(&self, url: &str) -> Result<Vec<i64>, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        parse_numbers(&body)
    }
}

#[async_trait]
impl NumberFetcher for HttpNumberFetcher {
    async fn fetch(&self, source: NumberSource) -> Result<Vec<i64>, FetchError> {
        let url = self
            .url_for(source)
            .ok_or_else(|| FetchError::Unavailable(format!("no URL for source {}", source.as_str())))?;

        let mut backoff =
            ExponentialBackoff::new(self.backoff_initial_ms, self.backoff_max_ms, self.max_retries);

        loop {
            match self.fetch_once(&url).await {
                Ok(numbers) => return Ok(numbers),
                Err(e) if e.is_retryable() => {
                    log::debug!("Upstream {} attempt failed: {}", source.label(), e);
                    if let Err(exhausted) = backoff.sleep().await {
                        log::debug!("Upstream {}: {}", source.label(), exhausted);
                        return Err(e);
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn fetcher_type(&self) -> &'static str {
        "http"
    }
}

/// Parse an upstream body into integers, preserving order
pub fn parse_numbers(body: &str) -> Result<Vec<i64>, FetchError> {
    let trimmed = body.trim();

    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        let value: Value = serde_json::from_str(trimmed)?;
        return numbers_from_json(&value);
    }

    trimmed
        .split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| FetchError::Parse(format!("not an integer: {:?}", token)))
        })
        .collect()
}

fn numbers_from_json(value: &Value) -> Result<Vec<i64>, FetchError> {
    match value {
        Value::Array(items) => integer_array(items),
        Value::Object(map) => {
            if let Some(Value::Array(items)) = map.get("numbers") {
                return integer_array(items);
            }

            // Otherwise the first non-empty integer array, in document order
            map.values()
                .filter_map(|v| v.as_array())
                .filter(|items| !items.is_empty())
                .find_map(|items| integer_array(items).ok())
                .ok_or_else(|| FetchError::Parse("no integer array in response object".to_string()))
        }
        other => Err(FetchError::Parse(format!("unexpected JSON value: {}", other))),
    }
}

fn integer_array(items: &[Value]) -> Result<Vec<i64>, FetchError> {
    items
        .iter()
        .map(|item| {
            item.as_i64()
                .ok_or_else(|| FetchError::Parse(format!("not an integer: {}", item)))
        })
        .collect()
}
