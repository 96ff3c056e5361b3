use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{CopilotAnswer, CopilotQuestion};
use crate::services::copilot_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/ask", post(ask))
}

/// POST /api/copilot/ask
///
/// Ask a question about a dashboard and get a short generated answer,
/// optionally grounded in one live metric from a saved report.
///
/// Request body: CopilotQuestion
/// {
///   "dashboard_link": "https://mixpanel.com/project/.../dashboard",
///   "question": "What was signup conversion last week?",
///   "report_id": "12345678" (optional)
/// }
///
/// Returns: CopilotAnswer with the answer text, the raw metric summary when
/// one was fetched, and a data_note when the fetch was attempted but failed.
async fn ask(
    State(state): State<AppState>,
    Json(request): Json<CopilotQuestion>,
) -> Result<Json<CopilotAnswer>, AppError> {
    info!("POST /api/copilot/ask - Question: {}", request.question);

    let answer = copilot_service::answer_dashboard_question(
        &state.llm,
        state.insights.as_ref(),
        &state.analytics,
        request,
    )
    .await
    .map_err(|e| {
        error!("Failed to answer question: {}", e);
        e
    })?;

    Ok(Json(answer))
}
