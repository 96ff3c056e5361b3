use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::ReportQuery;

/// Body of a saved-report query response. `series` maps metric name to a
/// map of timestamp string -> value. Key order is whatever the upstream
/// returned (serde_json's preserve_order keeps it).
#[derive(Debug, Deserialize)]
pub struct InsightsReport {
    pub series: Option<serde_json::Map<String, Value>>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("upstream returned {code}: {body}")]
    UpstreamStatus { code: u16, body: String },

    #[error("report contains no series data")]
    EmptySeries,

    #[error("malformed response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait InsightsProvider: Send + Sync {
    /// Fetch a saved report. Exactly one outbound call, no retries.
    async fn fetch_report(&self, query: &ReportQuery) -> Result<InsightsReport, FetchError>;
}
