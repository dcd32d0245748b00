use async_trait::async_trait;

use super::{split_pages, ExtractionError, PageTextProvider};

/// Plain text, one page per form-feed separated block.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainPageTexts;

impl PlainPageTexts {
    pub fn extract(bytes: &[u8]) -> Vec<String> {
        // Try UTF-8 first, fall back to lossy conversion
        let text = String::from_utf8(bytes.to_vec())
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned());
        split_pages(&text)
    }
}

#[async_trait]
impl PageTextProvider for PlainPageTexts {
    async fn page_texts(&self, _file_name: &str, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        Ok(Self::extract(bytes))
    }
}
