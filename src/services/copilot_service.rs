use tracing::{info, warn};

use crate::config::AnalyticsConfig;
use crate::errors::AppError;
use crate::external::insights_provider::InsightsProvider;
use crate::models::{CopilotAnswer, CopilotQuestion, MetricSummary};
use crate::services::llm_service::LlmService;
use crate::services::metric_service::{self, FetchOutcome};

/// Live-data section used when no metric summary is available.
pub const NO_DATA_FALLBACK: &str = "No live metric data is available for this question. \
     Reason at a high level and defer to the dashboard itself for exact numbers.";

/// Answer a dashboard question: validate, fetch the optional live metric,
/// compose the prompt, generate.
///
/// Metric-fetch failures never block the question; the flow degrades to the
/// no-data prompt and reports the cause in `data_note`. Generation failures
/// propagate so the caller surfaces them instead of a fabricated answer.
pub async fn answer_dashboard_question(
    llm: &LlmService,
    provider: &dyn InsightsProvider,
    analytics: &AnalyticsConfig,
    request: CopilotQuestion,
) -> Result<CopilotAnswer, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("Please enter a question.".to_string()));
    }

    let (summary, data_note) =
        match metric_service::fetch_metric_summary(provider, analytics, request.report_id.as_deref())
            .await
        {
            Ok(FetchOutcome::Summary(summary)) => {
                info!("Grounding answer in metric: {}", summary.metric_name);
                (Some(summary), None)
            }
            Ok(FetchOutcome::NotConfigured) => (None, None),
            Err(e) => {
                warn!("Metric fetch failed, continuing without live data: {}", e);
                (None, Some(format!("Live data unavailable: {}", e)))
            }
        };

    let prompt = compose_prompt(&request.dashboard_link, &request.question, summary.as_ref());

    let answer = llm.generate_completion(prompt).await?;

    Ok(CopilotAnswer {
        answer,
        summary,
        data_note,
        generated_at: chrono::Utc::now(),
    })
}

/// Render the single instruction prompt. A present summary contributes its
/// narrative verbatim as the live-data section.
pub fn compose_prompt(
    dashboard_link: &str,
    question: &str,
    summary: Option<&MetricSummary>,
) -> String {
    let live_data = summary.map(|s| s.narrative.as_str()).unwrap_or(NO_DATA_FALLBACK);

    format!(
        r#"You are an analytics copilot.

The user is asking about this dashboard:
{}

LIVE DATA:
{}

QUESTION:
{}

INSTRUCTIONS:
- Answer in 1-3 short sentences.
- Always reference the dashboard link as the source.
- Do not invent specific numbers that are not given above.
- Avoid any personal data or PII."#,
        dashboard_link, live_data, question
    )
}
