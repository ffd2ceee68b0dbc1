use std::time::Instant;

use crate::error::CheckError;
use crate::model::query::Query;
use crate::model::record::Record;
use crate::services::dataset::DatasetFetcher;
use crate::services::matching::{hash, matcher};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Record),
    NotFound,
}

/// Fetches a fresh copy of the dataset and scans it for `query`.
///
/// The scan runs on the blocking pool: the dataset holds tens of thousands of
/// records and the caller sits on the async runtime.
pub async fn run(fetcher: &dyn DatasetFetcher, query: &Query) -> Result<SearchOutcome, CheckError> {
    let started = Instant::now();
    let digest = hash::query_digest(&matcher::IdentityKey::from_query(query));

    let records = match fetcher.fetch().await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(query_digest = %digest, error = %e, "dataset unavailable");
            return Err(e);
        }
    };
    let scanned = records.len();

    let q = query.clone();
    let hit = tokio::task::spawn_blocking(move || matcher::find_match(&q, &records).cloned())
        .await
        .map_err(|e| CheckError::Worker(e.to_string()))?;

    tracing::info!(
        query_digest = %digest,
        records = scanned,
        found = hit.is_some(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "search finished"
    );

    Ok(match hit {
        Some(record) => SearchOutcome::Found(record),
        None => SearchOutcome::NotFound,
    })
}
