mod copilot;
mod metric;

pub use copilot::{CopilotAnswer, CopilotQuestion};
pub use metric::{MetricSummary, ReportQuery};
