use std::sync::Arc;

use crate::config::AnalyticsConfig;
use crate::external::insights_provider::InsightsProvider;
use crate::services::llm_service::LlmService;

#[derive(Clone)]
pub struct AppState {
    pub analytics: AnalyticsConfig,
    pub insights: Arc<dyn InsightsProvider>,
    pub llm: Arc<LlmService>,
}
