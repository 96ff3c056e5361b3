use serde_json::Value;
use tracing::info;

use crate::config::AnalyticsConfig;
use crate::external::insights_provider::{FetchError, InsightsProvider};
use crate::models::{MetricSummary, ReportQuery};

/// Result of a metric fetch attempt. Not-configured is a skip, not a
/// failure: callers fall back to the no-data prompt without surfacing
/// anything alarming.
#[derive(Debug)]
pub enum FetchOutcome {
    Summary(MetricSummary),
    NotConfigured,
}

/// Fetch a saved report and normalize it into a `MetricSummary`.
///
/// Skips the network entirely when credentials or the report id are
/// missing. At most one upstream call, no retries.
pub async fn fetch_metric_summary(
    provider: &dyn InsightsProvider,
    analytics: &AnalyticsConfig,
    report_id: Option<&str>,
) -> Result<FetchOutcome, FetchError> {
    let Some(query) = ReportQuery::build(analytics, report_id.unwrap_or("")) else {
        info!("Analytics not configured for this request; skipping metric fetch");
        return Ok(FetchOutcome::NotConfigured);
    };

    let report = provider.fetch_report(&query).await?;
    let series = report.series.ok_or(FetchError::EmptySeries)?;
    let summary = summarize_series(&series)?;

    Ok(FetchOutcome::Summary(summary))
}

/// Normalize a `series` payload into a one-sentence trend summary.
///
/// The first metric in the map is taken as-is; key order is whatever the
/// upstream returned, so which metric wins is order-dependent on the
/// reporting API. Within the metric, timestamps are compared as plain
/// strings, which only holds while every point in a series shares the same
/// UTC-offset format; mixed offsets can mis-order points around DST shifts.
pub fn summarize_series(
    series: &serde_json::Map<String, Value>,
) -> Result<MetricSummary, FetchError> {
    let (metric_name, points_value) = series.iter().next().ok_or(FetchError::EmptySeries)?;

    let points_map = points_value.as_object().ok_or_else(|| {
        FetchError::Malformed(format!("series for {} is not an object", metric_name))
    })?;

    let mut points: Vec<(&str, f64)> = Vec::with_capacity(points_map.len());
    for (timestamp, value) in points_map {
        let value = value
            .as_f64()
            .ok_or_else(|| FetchError::Malformed(format!("non-numeric value at {}", timestamp)))?;
        points.push((timestamp.as_str(), value));
    }

    if points.is_empty() {
        return Err(FetchError::EmptySeries);
    }

    points.sort_by(|a, b| a.0.cmp(b.0));

    let (latest_ts, latest_value) = points[points.len() - 1];
    let previous = points.len().checked_sub(2).map(|i| points[i]);

    let latest_date = date_part(latest_ts).to_string();
    let previous_value = previous.map(|(_, v)| v);
    let previous_date = previous.map(|(ts, _)| date_part(ts).to_string());

    let mut narrative = format!(
        "The metric {} from your saved report is {} on {}.",
        metric_name, latest_value, latest_date
    );
    if let (Some(prev), Some(prev_date)) = (previous_value, previous_date.as_deref()) {
        let direction = if latest_value > prev {
            "increased"
        } else if latest_value < prev {
            "decreased"
        } else {
            "stayed flat"
        };
        narrative.push_str(&format!(
            " It has {} compared to {} on {}.",
            direction, prev, prev_date
        ));
    }

    Ok(MetricSummary {
        metric_name: metric_name.clone(),
        latest_value,
        latest_date,
        previous_value,
        previous_date,
        narrative,
    })
}

/// Date portion of an ISO-8601-like timestamp: everything before the first
/// `T`, or the whole string unchanged when there is none. Never fails on
/// malformed input.
fn date_part(timestamp: &str) -> &str {
    match timestamp.find('T') {
        Some(i) => &timestamp[..i],
        None => timestamp,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::external::insights_provider::InsightsReport;

    fn series_of(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        value.as_object().expect("test series must be an object").clone()
    }

    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl InsightsProvider for CountingProvider {
        async fn fetch_report(&self, _query: &ReportQuery) -> Result<InsightsReport, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(InsightsReport {
                series: Some(series_of(json!({"Metric": {"2025-01-01": 1.0}}))),
            })
        }
    }

    fn configured_analytics() -> AnalyticsConfig {
        AnalyticsConfig {
            project_id: Some("12345".to_string()),
            username: Some("svc.copilot".to_string()),
            secret: Some("s3cret".to_string()),
            base_url: "https://mixpanel.com/api/query".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_skip_fetch_entirely() {
        let provider = CountingProvider { calls: AtomicUsize::new(0) };
        let analytics = AnalyticsConfig {
            secret: None,
            ..configured_analytics()
        };

        let outcome = fetch_metric_summary(&provider, &analytics, Some("bk-1"))
            .await
            .unwrap();

        assert!(matches!(outcome, FetchOutcome::NotConfigured));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_report_id_skips_fetch_entirely() {
        let provider = CountingProvider { calls: AtomicUsize::new(0) };
        let analytics = configured_analytics();

        let outcome = fetch_metric_summary(&provider, &analytics, None).await.unwrap();
        assert!(matches!(outcome, FetchOutcome::NotConfigured));

        let outcome = fetch_metric_summary(&provider, &analytics, Some("  "))
            .await
            .unwrap();
        assert!(matches!(outcome, FetchOutcome::NotConfigured));

        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_configured_query_fetches_once() {
        let provider = CountingProvider { calls: AtomicUsize::new(0) };

        let outcome = fetch_metric_summary(&provider, &configured_analytics(), Some("bk-1"))
            .await
            .unwrap();

        assert!(matches!(outcome, FetchOutcome::Summary(_)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_latest_and_previous_ignore_input_order() {
        // Deliberately out of order; the two largest timestamps must win.
        let series = series_of(json!({
            "Sessions": {
                "2025-11-03T00:00:00-07:00": 300.0,
                "2025-11-01T00:00:00-07:00": 100.0,
                "2025-11-02T00:00:00-07:00": 200.0
            }
        }));

        let summary = summarize_series(&series).unwrap();
        assert_eq!(summary.latest_value, 300.0);
        assert_eq!(summary.latest_date, "2025-11-03");
        assert_eq!(summary.previous_value, Some(200.0));
        assert_eq!(summary.previous_date.as_deref(), Some("2025-11-02"));
    }

    #[test]
    fn test_single_point_has_no_comparison() {
        let series = series_of(json!({"Sessions": {"2025-11-01": 42.0}}));

        let summary = summarize_series(&series).unwrap();
        assert_eq!(summary.latest_value, 42.0);
        assert!(summary.previous_value.is_none());
        assert!(summary.previous_date.is_none());
        assert!(!summary.narrative.contains("compared to"));
    }

    #[test]
    fn test_direction_wording() {
        let cases = [
            (120.0, 100.0, "increased"),
            (100.0, 120.0, "decreased"),
            (100.0, 100.0, "stayed flat"),
        ];

        for (latest, previous, direction) in cases {
            let series = series_of(json!({
                "Metric": {"2025-11-01": previous, "2025-11-02": latest}
            }));
            let summary = summarize_series(&series).unwrap();
            assert!(
                summary.narrative.contains(&format!("It has {} compared to", direction)),
                "latest={} previous={} narrative={}",
                latest,
                previous,
                summary.narrative
            );
        }
    }

    #[test]
    fn test_date_part_strips_time_suffix() {
        assert_eq!(date_part("2025-11-07T00:00:00-07:00"), "2025-11-07");
        assert_eq!(date_part("2025-11-07"), "2025-11-07");
    }

    #[test]
    fn test_signups_example_narrative() {
        let series = series_of(json!({
            "Total signups": {
                "2025-11-01T00:00:00-07:00": 100.0,
                "2025-11-02T00:00:00-07:00": 120.0
            }
        }));

        let summary = summarize_series(&series).unwrap();
        assert_eq!(summary.metric_name, "Total signups");
        assert_eq!(summary.latest_value, 120.0);
        assert_eq!(summary.latest_date, "2025-11-02");
        assert_eq!(summary.previous_value, Some(100.0));
        assert_eq!(summary.previous_date.as_deref(), Some("2025-11-01"));
        assert_eq!(
            summary.narrative,
            "The metric Total signups from your saved report is 120 on 2025-11-02. \
             It has increased compared to 100 on 2025-11-01."
        );
    }

    #[test]
    fn test_empty_series_map_is_typed_error() {
        let series = series_of(json!({}));
        assert!(matches!(summarize_series(&series), Err(FetchError::EmptySeries)));
    }

    #[test]
    fn test_metric_with_no_points_is_typed_error() {
        let series = series_of(json!({"Sessions": {}}));
        assert!(matches!(summarize_series(&series), Err(FetchError::EmptySeries)));
    }

    #[test]
    fn test_non_numeric_value_is_malformed() {
        let series = series_of(json!({"Sessions": {"2025-11-01": "n/a"}}));
        assert!(matches!(summarize_series(&series), Err(FetchError::Malformed(_))));
    }

    #[test]
    fn test_non_object_points_is_malformed() {
        let series = series_of(json!({"Sessions": [1, 2, 3]}));
        assert!(matches!(summarize_series(&series), Err(FetchError::Malformed(_))));
    }
}
