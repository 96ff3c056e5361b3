use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;

/// Coordinates for one saved-report fetch. Built fresh per request and
/// discarded with it; never persisted.
#[derive(Debug, Clone)]
pub struct ReportQuery {
    pub project_id: String,
    pub username: String,
    pub secret: String,
    pub bookmark_id: String,
}

impl ReportQuery {
    /// Returns `None` unless every field is non-empty. A `None` means the
    /// fetch is skipped entirely, not attempted and failed.
    pub fn build(analytics: &AnalyticsConfig, report_id: &str) -> Option<Self> {
        if report_id.trim().is_empty() {
            return None;
        }

        Some(Self {
            project_id: non_empty(analytics.project_id.as_deref())?,
            username: non_empty(analytics.username.as_deref())?,
            secret: non_empty(analytics.secret.as_deref())?,
            bookmark_id: report_id.to_string(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(|v| v.to_string())
}

/// One metric's latest value and trend, derived once per successful fetch.
///
/// When `previous_value` is present, `previous_date` is present too, and
/// the narrative's direction matches the sign of `latest - previous`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSummary {
    pub metric_name: String,
    pub latest_value: f64,
    pub latest_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_date: Option<String>,
    /// Pre-rendered trend sentence, embedded verbatim into the prompt.
    pub narrative: String,
}
