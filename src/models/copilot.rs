use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::MetricSummary;

/// User's question about a dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopilotQuestion {
    /// Free text, not validated as a URL
    pub dashboard_link: String,
    pub question: String,
    /// Optional saved-report id used to ground the answer in live data
    pub report_id: Option<String>,
}

/// Generated answer with optional live-data context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopilotAnswer {
    /// The model's output, displayed unmodified
    pub answer: String,
    /// Raw metric summary backing the answer, when a fetch succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<MetricSummary>,
    /// Informational note when the metric fetch was attempted but failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_note: Option<String>,
    pub generated_at: DateTime<Utc>,
}
