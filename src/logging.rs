use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub loki_enabled: bool,
    pub loki_url: Option<String>,
    pub service_name: String,
    pub environment: String,
    pub log_level: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let env_or = |key: &str, default: &str| {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Self {
            loki_enabled: env_or("LOKI_ENABLED", "false").parse().unwrap_or(false),
            loki_url: std::env::var("LOKI_URL").ok(),
            service_name: env_or("SERVICE_NAME", "copilot-backend"),
            environment: env_or("ENVIRONMENT", "development"),
            log_level: env_or("RUST_LOG", "info"),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.loki_enabled && self.loki_url.is_none() {
            return Err("LOKI_ENABLED is true but LOKI_URL is not set".to_string());
        }
        Ok(())
    }
}

/// Console fmt logging, plus a Loki shipping layer when the `loki` feature
/// is compiled in and enabled via env.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    let filter = tracing_subscriber::EnvFilter::new(&config.log_level);
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    #[cfg(feature = "loki")]
    if config.loki_enabled {
        if let Some(loki_url) = config.loki_url.as_deref() {
            let (loki_layer, task) = tracing_loki::builder()
                .label("service", &config.service_name)?
                .label("environment", &config.environment)?
                .build_url(url::Url::parse(loki_url)?)?;

            // Background task ships log batches to Loki
            tokio::spawn(task);

            registry.with(loki_layer).init();
            tracing::info!("Loki logging initialized (service: {})", config.service_name);
            return Ok(());
        }
    }

    registry.init();

    Ok(())
}
