use async_trait::async_trait;

use super::{ExtractionError, PageTextProvider};

/// PDF decoding via `pdf-extract`, run on the blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfPageTexts;

impl PdfPageTexts {
    /// Synchronous decode, one string per page of the page tree.
    ///
    /// Blank pages stay in place so page numbers match the source.
    pub fn extract(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        let pages: Vec<String> = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| ExtractionError::PdfError(e.to_string()))?
            .into_iter()
            .map(|page| page.trim().to_string())
            .collect();

        if pages.iter().all(|p| p.is_empty()) {
            // Scanned/image-only PDFs decode fine but carry no text layer.
            tracing::warn!(pages = pages.len(), "PDF decoded without any text");
        }
        Ok(pages)
    }
}

#[async_trait]
impl PageTextProvider for PdfPageTexts {
    async fn page_texts(&self, file_name: &str, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        let owned = bytes.to_vec();
        let pages = tokio::task::spawn_blocking(move || Self::extract(&owned))
            .await
            .map_err(|e| {
                // The decoder panics on some malformed inputs; surface as a decode failure.
                ExtractionError::PdfError(format!("decoder aborted: {e}"))
            })??;

        tracing::debug!(file = %file_name, pages = pages.len(), "PDF pages extracted");
        Ok(pages)
    }
}
