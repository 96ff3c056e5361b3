const DEFAULT_BASE_URL: &str = "https://mixpanel.com/api/query";

/// Analytics credentials and report coordinates. Every credential is
/// optional: when any piece is missing the copilot still answers, it just
/// skips the live-metric fetch.
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    pub project_id: Option<String>,
    pub username: Option<String>,
    pub secret: Option<String>,
    pub base_url: String,
}

impl AnalyticsConfig {
    pub fn from_env() -> Self {
        Self {
            project_id: env_opt("MIXPANEL_PROJECT_ID"),
            username: env_opt("MIXPANEL_USERNAME"),
            secret: env_opt("MIXPANEL_SECRET"),
            base_url: std::env::var("MIXPANEL_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.project_id.is_some() && self.username.is_some() && self.secret.is_some()
    }
}

/// Empty values count as unset so a blank line in .env behaves like a
/// missing one.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
