pub mod copilot_service;
pub mod llm_service;
pub mod metric_service;
