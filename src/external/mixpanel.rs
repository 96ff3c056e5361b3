use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::external::insights_provider::{FetchError, InsightsProvider, InsightsReport};
use crate::models::ReportQuery;

/// Upstream error bodies get cut down to this many characters before they
/// are surfaced in notes or logs.
const BODY_SNIPPET_CHARS: usize = 200;

pub struct MixpanelProvider {
    client: Client,
    base_url: String,
}

impl MixpanelProvider {
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }
}

#[async_trait]
impl InsightsProvider for MixpanelProvider {
    async fn fetch_report(&self, query: &ReportQuery) -> Result<InsightsReport, FetchError> {
        let url = format!("{}/insights", self.base_url);
        info!(
            "Fetching saved report {} for project {}",
            query.bookmark_id, query.project_id
        );

        let resp = self
            .client
            .get(&url)
            .basic_auth(&query.username, Some(&query.secret))
            .query(&[
                ("project_id", query.project_id.as_str()),
                ("bookmark_id", query.bookmark_id.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::UpstreamStatus {
                code: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str::<InsightsReport>(&body)
            .map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body_caps_at_snippet_length() {
        let long = "x".repeat(500);
        assert_eq!(truncate_body(&long).chars().count(), BODY_SNIPPET_CHARS);
    }

    #[test]
    fn test_truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("not found"), "not found");
    }
}
