use std::time::Duration;

use async_trait::async_trait;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::CheckError;
use crate::model::record::Record;
use crate::services::encoding;

/// Object keys under which the record array may be wrapped.
const CONTAINER_KEYS: &[&str] = &["persons"];

/// Source of the wanted-person records. Every call is a fresh retrieval.
#[async_trait]
pub trait DatasetFetcher: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Record>, CheckError>;
}

pub struct HttpDatasetFetcher {
    url: String,
    timeout: Duration,
}

impl HttpDatasetFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl DatasetFetcher for HttpDatasetFetcher {
    async fn fetch(&self) -> Result<Vec<Record>, CheckError> {
        let url = self.url.clone();
        let timeout = self.timeout;

        // The blocking client must live and die off the async runtime threads.
        tokio::task::spawn_blocking(move || fetch_blocking(&url, timeout))
            .await
            .map_err(|e| CheckError::Worker(e.to_string()))?
    }
}

fn fetch_blocking(url: &str, timeout: Duration) -> Result<Vec<Record>, CheckError> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CheckError::fetch(e.to_string()))?;

    let resp = client
        .get(url)
        .send()
        .map_err(|e| request_error(e, timeout))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(CheckError::fetch(extract_error_message(status, &body)));
    }

    let bytes = resp.bytes().map_err(|e| request_error(e, timeout))?;
    tracing::debug!(bytes = bytes.len(), "dataset downloaded");

    parse_payload(&bytes)
}

fn request_error(e: reqwest::Error, timeout: Duration) -> CheckError {
    if e.is_timeout() {
        CheckError::fetch(format!("request timed out after {}s", timeout.as_secs()))
    } else if e.is_decode() {
        CheckError::decode(e.to_string())
    } else {
        CheckError::fetch(e.to_string())
    }
}

fn extract_error_message(status: StatusCode, body_text: &str) -> String {
    let trimmed = body_text.trim();
    if trimmed.is_empty() {
        return format!("HTTP {}", status.as_u16());
    }

    let snippet: String = trimmed.chars().take(200).collect();
    format!("HTTP {}: {}", status.as_u16(), snippet)
}

/// Decodes a dataset body into a flat record list.
///
/// Accepts a bare array or an object holding the array under one of
/// [`CONTAINER_KEYS`]. Non-object array items are skipped.
pub fn parse_payload(bytes: &[u8]) -> Result<Vec<Record>, CheckError> {
    let decoded = encoding::decode_payload(bytes)?;

    let value: Value = serde_json::from_str(&decoded.text)
        .map_err(|e| CheckError::decode(format!("invalid json: {e}")))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match CONTAINER_KEYS.iter().find_map(|k| obj.remove(*k)) {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(CheckError::decode("record container is not an array")),
            None => return Err(CheckError::decode("no record array in payload")),
        },
        _ => return Err(CheckError::decode("payload is neither an array nor an object")),
    };

    let total = items.len();
    let records: Vec<Record> = items
        .into_iter()
        .filter_map(|v| match v {
            Value::Object(fields) => Some(Record::from(fields)),
            _ => None,
        })
        .collect();

    if records.len() < total {
        tracing::warn!(
            skipped = total - records.len(),
            encoding = decoded.encoding,
            "ignoring non-object dataset entries"
        );
    }

    Ok(records)
}

#[cfg(test)]
pub mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::DatasetFetcher;
    use crate::error::CheckError;
    use crate::model::record::Record;

    /// Serves a fixed result and counts how often it was asked.
    pub struct StaticFetcher {
        result: Result<Vec<Record>, CheckError>,
        pub calls: AtomicUsize,
    }

    impl StaticFetcher {
        pub fn records(records: Vec<Record>) -> Self {
            Self {
                result: Ok(records),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing(err: CheckError) -> Self {
            Self {
                result: Err(err),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DatasetFetcher for StaticFetcher {
        async fn fetch(&self) -> Result<Vec<Record>, CheckError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    /// Holds every fetch until `release` is notified.
    pub struct GatedFetcher {
        pub release: Arc<Notify>,
        records: Vec<Record>,
    }

    impl GatedFetcher {
        pub fn new(records: Vec<Record>) -> Self {
            Self {
                release: Arc::new(Notify::new()),
                records,
            }
        }
    }

    #[async_trait]
    impl DatasetFetcher for GatedFetcher {
        async fn fetch(&self) -> Result<Vec<Record>, CheckError> {
            self.release.notified().await;
            Ok(self.records.clone())
        }
    }
}
