use oae_core::ConclusionExtraction;

use super::ScanControl;
use crate::headings::{CONCLUSION_END, CONCLUSION_START};
use crate::metadata::MetadataCollector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConclusionState {
    /// Start heading not seen yet.
    Before,
    /// Accumulating chapter text.
    In,
    /// End heading seen; no further pages are accepted.
    Done,
}

/// Bounded extraction of chapter "IV. CONCLUSÃO", up to "V. AÇÕES RECONSTITUIDORAS".
#[derive(Debug)]
pub struct ConclusionScanner {
    state: ConclusionState,
    text: String,
    metadata: MetadataCollector,
    pages_seen: usize,
}

impl Default for ConclusionScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ConclusionScanner {
    pub fn new() -> Self {
        Self {
            state: ConclusionState::Before,
            text: String::new(),
            metadata: MetadataCollector::new(),
            pages_seen: 0,
        }
    }

    pub fn state(&self) -> ConclusionState {
        self.state
    }

    pub fn pages_seen(&self) -> usize {
        self.pages_seen
    }

    /// Consume the next page. Returns [`ScanControl::Stop`] once the end heading is found.
    pub fn feed(&mut self, page: &str) -> ScanControl {
        if self.state == ConclusionState::Done {
            return ScanControl::Stop;
        }

        self.pages_seen += 1;
        self.metadata.observe(self.pages_seen, page);

        match self.state {
            ConclusionState::Before => {
                // The start page is never checked for the end heading.
                if let Some(start) = CONCLUSION_START.find(page) {
                    self.text.push_str(&page[start..]);
                    self.text.push('\n');
                    self.state = ConclusionState::In;
                    tracing::debug!(page = self.pages_seen, "conclusion chapter starts");
                }
                ScanControl::Continue
            }
            ConclusionState::In => match CONCLUSION_END.find(page) {
                Some(end) => {
                    self.text.push_str(&page[..end]);
                    self.state = ConclusionState::Done;
                    tracing::debug!(page = self.pages_seen, "conclusion chapter ends");
                    ScanControl::Stop
                }
                None => {
                    self.text.push_str(page);
                    self.text.push('\n');
                    ScanControl::Continue
                }
            },
            ConclusionState::Done => ScanControl::Stop,
        }
    }

    pub fn finish(self) -> ConclusionExtraction {
        ConclusionExtraction {
            text: self.text.trim().to_string(),
            metadata: self.metadata.into_candidates(),
        }
    }
}

/// Run a conclusion scan, pulling pages only until the chapter ends.
pub fn extract_conclusion<I, S>(pages: I) -> ConclusionExtraction
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = ConclusionScanner::new();
    for page in pages {
        if scanner.feed(page.as_ref()) == ScanControl::Stop {
            break;
        }
    }
    scanner.finish()
}
