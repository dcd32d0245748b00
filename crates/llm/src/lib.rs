pub mod analysis;
pub mod provider;
pub mod providers;
pub mod schema;

pub use analysis::{AnalysisError, ConclusionRequest, LlmAnalyzer, ReportAnalyzer};
pub use provider::{LlmError, LlmProvider, Message, Role};
pub use providers::create_provider;
