//! The two per-document chains: therapy (conclusion analysis) and audit.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use oae_core::{AnalysisResult, ConsistencyAuditResult, Timed};
use oae_ingest::{extract_audit_sections, extract_conclusion, PageTextProvider, ReferenceStandard};
use oae_llm::{ConclusionRequest, ReportAnalyzer};
use tracing::debug;

use crate::document::InputDocument;
use crate::error::ProcessError;
use crate::pipeline::DocumentProcessor;

/// Page texts, conclusion scan, then conclusion analysis against the reference standard.
pub struct TherapyProcessor {
    pages: Arc<dyn PageTextProvider>,
    analyzer: Arc<dyn ReportAnalyzer>,
    standard: ReferenceStandard,
}

impl TherapyProcessor {
    /// `standard` falls back to the built-in placeholder when `None`.
    pub fn new(
        pages: Arc<dyn PageTextProvider>,
        analyzer: Arc<dyn ReportAnalyzer>,
        standard: Option<ReferenceStandard>,
    ) -> Self {
        Self {
            pages,
            analyzer,
            standard: standard.unwrap_or_default(),
        }
    }

    pub fn standard(&self) -> &ReferenceStandard {
        &self.standard
    }
}

#[async_trait]
impl DocumentProcessor<AnalysisResult> for TherapyProcessor {
    async fn process(&self, doc: &InputDocument) -> Result<AnalysisResult, ProcessError> {
        let start = Instant::now();
        let pages = self.pages.page_texts(&doc.file_name, &doc.bytes).await?;

        let extraction = extract_conclusion(&pages);
        if !extraction.is_found() {
            return Err(ProcessError::SectionNotFound);
        }
        debug!(
            file = %doc.file_name,
            chars = extraction.text.len(),
            work_name = %extraction.metadata.work_name,
            "conclusion extracted"
        );

        let request = ConclusionRequest {
            file_name: doc.file_name.clone(),
            text: extraction.text,
            metadata: extraction.metadata,
            standard: self.standard.text.clone(),
        };
        let mut result = self.analyzer.analyze_conclusion(&request).await?;
        result.set_processing_time_ms(start.elapsed().as_millis() as u64);
        Ok(result)
    }
}

/// Page texts, audit scan, then the chapter 3 × annex consistency audit.
pub struct AuditProcessor {
    pages: Arc<dyn PageTextProvider>,
    analyzer: Arc<dyn ReportAnalyzer>,
}

impl AuditProcessor {
    pub fn new(pages: Arc<dyn PageTextProvider>, analyzer: Arc<dyn ReportAnalyzer>) -> Self {
        Self { pages, analyzer }
    }
}

#[async_trait]
impl DocumentProcessor<ConsistencyAuditResult> for AuditProcessor {
    async fn process(&self, doc: &InputDocument) -> Result<ConsistencyAuditResult, ProcessError> {
        let start = Instant::now();
        let pages = self.pages.page_texts(&doc.file_name, &doc.bytes).await?;

        let sections = extract_audit_sections(&doc.file_name, &pages);
        debug!(file = %doc.file_name, populated = ?sections.populated(), "audit sections extracted");

        let mut result = self.analyzer.analyze_audit(&sections).await?;
        result.set_processing_time_ms(start.elapsed().as_millis() as u64);
        Ok(result)
    }
}
