use oae_core::{ErrorRecord, Severity};
use oae_ingest::ExtractionError;
use oae_llm::AnalysisError;
use thiserror::Error;

/// Per-document failure. Never aborts the batch.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("{0}")]
    Extraction(#[from] ExtractionError),
    #[error("chapter IV. CONCLUSÃO not found in document")]
    SectionNotFound,
    #[error("{0}")]
    Analysis(#[from] AnalysisError),
}

impl ProcessError {
    pub fn severity(&self) -> Severity {
        Severity::Error
    }

    pub fn to_record(&self, file_name: &str) -> ErrorRecord {
        ErrorRecord {
            file_name: file_name.to_string(),
            message: self.to_string(),
            severity: self.severity(),
        }
    }
}
