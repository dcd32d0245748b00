//! External analysis of extracted report text.
//!
//! [`ReportAnalyzer`] is the narrow seam the batch pipeline depends on; the
//! production implementation, [`LlmAnalyzer`], prompts an [`LlmProvider`] for
//! schema-constrained JSON and maps it onto the domain result types.

mod prompt;
mod response;

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use oae_core::config::LlmConfig;
use oae_core::{
    AnalysisResult, AuditSections, ClassificationStatus, ConsistencyAuditResult, IdGenerator,
    MetadataCandidates, UuidGenerator,
};
use tracing::{debug, info};

use crate::provider::{LlmError, LlmProvider, Message};
use crate::schema::{analysis_schema, audit_schema, AuditResponse, ConclusionResponse};

const UNKNOWN_WORK: &str = "OAE Não Identificada";
const UNKNOWN_AUDIT_WORK: &str = "Obra Não Identificada";
const UNKNOWN_KM: &str = "KM Não Identificado";
const UNKNOWN_SENTIDO: &str = "Sentido Não Identificado";

/// Input for conclusion analysis.
#[derive(Debug, Clone)]
pub struct ConclusionRequest {
    pub file_name: String,
    /// Extracted conclusion chapter.
    pub text: String,
    /// Candidates detected in the front matter.
    pub metadata: MetadataCandidates,
    /// Reference standard text (or the placeholder).
    pub standard: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(
        "invalid API key: check GEMINI_API_KEY (or API_KEY) in the environment or .env file \
         and confirm the key is active in Google AI Studio"
    )]
    Credentials,
    #[error("model returned an empty response")]
    EmptyResponse,
    #[error("response does not match the expected schema: {reason}")]
    Schema {
        reason: String,
        raw_response: String,
    },
    #[error("analysis request failed: {0}")]
    Llm(LlmError),
}

impl From<LlmError> for AnalysisError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::InvalidCredentials(_) => AnalysisError::Credentials,
            LlmError::EmptyResponse => AnalysisError::EmptyResponse,
            other => AnalysisError::Llm(other),
        }
    }
}

/// The two analyses the pipeline can request.
#[async_trait]
pub trait ReportAnalyzer: Send + Sync {
    async fn analyze_conclusion(
        &self,
        request: &ConclusionRequest,
    ) -> Result<AnalysisResult, AnalysisError>;

    async fn analyze_audit(
        &self,
        sections: &AuditSections,
    ) -> Result<ConsistencyAuditResult, AnalysisError>;
}

/// [`ReportAnalyzer`] backed by an LLM provider.
pub struct LlmAnalyzer {
    provider: Box<dyn LlmProvider>,
    ids: Arc<dyn IdGenerator>,
    temperature: f32,
    max_tokens: u32,
}

impl LlmAnalyzer {
    pub fn new(provider: Box<dyn LlmProvider>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            provider,
            ids: Arc::new(UuidGenerator),
            temperature,
            max_tokens,
        }
    }

    /// Build from config, creating the appropriate provider.
    pub fn from_config(llm_config: &LlmConfig) -> Result<Self, LlmError> {
        let provider = crate::providers::create_provider(llm_config)?;
        Ok(Self::new(provider, llm_config.temperature, llm_config.max_tokens))
    }

    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }
}

fn first_non_empty(candidates: &[&str], fallback: &str) -> String {
    candidates
        .iter()
        .map(|c| c.trim())
        .find(|c| !c.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

#[async_trait]
impl ReportAnalyzer for LlmAnalyzer {
    async fn analyze_conclusion(
        &self,
        request: &ConclusionRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let start = Instant::now();
        info!(file = %request.file_name, chars = request.text.len(), "analyzing conclusion");

        let messages = vec![
            Message::system(prompt::CONCLUSION_SYSTEM_PROMPT),
            Message::user(prompt::conclusion_prompt(&request.standard, &request.text)),
        ];

        let raw = self
            .provider
            .complete_structured(messages, self.temperature, self.max_tokens, &analysis_schema())
            .await?;
        debug!(file = %request.file_name, "LLM response: {}", raw);

        let parsed: ConclusionResponse = response::parse_response(&raw)?;
        let detected = &request.metadata;

        Ok(AnalysisResult {
            id: self.ids.next_id(),
            file_name: request.file_name.clone(),
            work_name: first_non_empty(
                &[parsed.work_name.as_str(), detected.work_name.as_str()],
                UNKNOWN_WORK,
            ),
            km: first_non_empty(
                &[parsed.km.as_deref().unwrap_or(""), detected.km.as_str()],
                UNKNOWN_KM,
            ),
            sentido: first_non_empty(
                &[parsed.sentido.as_deref().unwrap_or(""), detected.sentido.as_str()],
                UNKNOWN_SENTIDO,
            ),
            structural: parsed.structural,
            structural_motivation: parsed.structural_motivation,
            functional: parsed.functional,
            functional_motivation: parsed.functional_motivation,
            durability: parsed.durability,
            durability_motivation: parsed.durability_motivation,
            summary: parsed.summary,
            points_of_attention: parsed.points_of_attention,
            compliance_status: ClassificationStatus::from_code(&parsed.compliance_status),
            compliance_reasoning: parsed.compliance_reasoning,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn analyze_audit(
        &self,
        sections: &AuditSections,
    ) -> Result<ConsistencyAuditResult, AnalysisError> {
        let start = Instant::now();
        info!(
            file = %sections.file_name,
            populated = ?sections.populated(),
            "running consistency audit"
        );

        let messages = vec![
            Message::system(prompt::AUDIT_SYSTEM_PROMPT),
            Message::user(prompt::audit_prompt(sections)),
        ];

        let raw = self
            .provider
            .complete_structured(messages, self.temperature, self.max_tokens, &audit_schema())
            .await?;
        debug!(file = %sections.file_name, "LLM response: {}", raw);

        let parsed: AuditResponse = response::parse_response(&raw)?;
        let detected = &sections.metadata;

        Ok(ConsistencyAuditResult {
            id: self.ids.next_id(),
            file_name: sections.file_name.clone(),
            work_name: first_non_empty(&[detected.work_name.as_str()], UNKNOWN_AUDIT_WORK),
            km: first_non_empty(&[detected.km.as_str()], UNKNOWN_KM),
            sentido: first_non_empty(&[detected.sentido.as_str()], UNKNOWN_SENTIDO),
            categories: parsed.categories,
            critical_inconsistencies: parsed.critical_inconsistencies,
            recommendations: parsed.recommendations,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests;
