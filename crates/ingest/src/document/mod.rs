mod pdf;
mod txt;

use async_trait::async_trait;
use thiserror::Error;

pub use pdf::PdfPageTexts;
pub use txt::PlainPageTexts;

/// Page separator in plain-text inputs.
pub(crate) const FORM_FEED: char = '\x0C';

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns a document blob into its ordered page texts.
#[async_trait]
pub trait PageTextProvider: Send + Sync {
    /// Decode `bytes` into one string per page, in reading order.
    ///
    /// `file_name` is a hint (used for type dispatch and log fields only).
    async fn page_texts(&self, file_name: &str, bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// Provider that picks the decoder from the file extension.
#[derive(Debug, Default, Clone)]
pub struct ExtensionPageTexts {
    pdf: PdfPageTexts,
    plain: PlainPageTexts,
}

impl ExtensionPageTexts {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PageTextProvider for ExtensionPageTexts {
    async fn page_texts(&self, file_name: &str, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        let ext = file_name.rsplit('.').next().unwrap_or("").to_lowercase();
        match ext.as_str() {
            "pdf" => self.pdf.page_texts(file_name, bytes).await,
            "txt" | "text" => self.plain.page_texts(file_name, bytes).await,
            other => Err(ExtractionError::UnsupportedType(other.to_string())),
        }
    }
}

/// Split decoded text into pages on form feeds.
///
/// Interior blank pages are kept so page numbers stay aligned with the source;
/// only the fragment after the final separator is dropped when it is blank.
pub(crate) fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text
        .split(FORM_FEED)
        .map(|page| page.trim().to_string())
        .collect();

    if pages.last().is_some_and(|p| p.is_empty()) {
        pages.pop();
    }

    pages
}
