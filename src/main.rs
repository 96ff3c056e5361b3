mod app;
mod config;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::AnalyticsConfig;
use crate::external::mixpanel::MixpanelProvider;
use crate::logging::LoggingConfig;
use crate::services::llm_service::{LlmService, OpenAiProvider};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    logging::init_logging(LoggingConfig::from_env())?;

    // Without a generation key there is nothing this service can do.
    let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| "OPENAI_API_KEY is not set")?;
    let llm = Arc::new(LlmService::new(Arc::new(OpenAiProvider::new(api_key))));

    let analytics = AnalyticsConfig::from_env();
    if !analytics.is_configured() {
        tracing::info!(
            "Mixpanel credentials not fully set; answers will not include live metrics"
        );
    }
    let insights = Arc::new(MixpanelProvider::new(analytics.base_url.clone()));

    let state = AppState {
        analytics,
        insights,
        llm,
    };
    let app = app::create_app(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Copilot backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
