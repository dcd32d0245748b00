use oae_core::{AuditSections, SectionLabel};

use crate::headings::classify_page;
use crate::metadata::MetadataCollector;

/// Sticky multi-section classification for the consistency audit.
///
/// Pages before the first recognised heading are dropped. A heading page is
/// attributed whole to the section it opens.
#[derive(Debug)]
pub struct AuditScanner {
    sections: AuditSections,
    current: Option<SectionLabel>,
    metadata: MetadataCollector,
    pages_seen: usize,
}

impl AuditScanner {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            sections: AuditSections::new(file_name),
            current: None,
            metadata: MetadataCollector::new(),
            pages_seen: 0,
        }
    }

    pub fn current(&self) -> Option<SectionLabel> {
        self.current
    }

    pub fn feed(&mut self, page: &str) {
        self.pages_seen += 1;
        self.metadata.observe(self.pages_seen, page);

        if let Some(label) = classify_page(page) {
            if self.current != Some(label) {
                tracing::debug!(page = self.pages_seen, section = %label, "audit section switch");
            }
            self.current = Some(label);
        }

        if let Some(label) = self.current {
            let section = self.sections.section_mut(label);
            section.push_str(page);
            section.push('\n');
        }
    }

    pub fn finish(mut self) -> AuditSections {
        self.sections.metadata = self.metadata.into_candidates();
        self.sections
    }
}

pub fn extract_audit_sections<I, S>(file_name: &str, pages: I) -> AuditSections
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = AuditScanner::new(file_name);
    for page in pages {
        scanner.feed(page.as_ref());
    }
    scanner.finish()
}
