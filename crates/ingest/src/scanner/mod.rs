//! Page-by-page section scanners.
//!
//! Both scanners are plain state machines owned by a single scan: build one per
//! document, [`feed`](ConclusionScanner::feed) it pages in reading order, then
//! call `finish` to obtain the extraction result. Nothing is shared between
//! documents.

mod audit;
mod conclusion;

pub use audit::{extract_audit_sections, AuditScanner};
pub use conclusion::{extract_conclusion, ConclusionScanner, ConclusionState};

/// Whether the caller should keep feeding pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanControl {
    Continue,
    Stop,
}

#[cfg(test)]
mod tests;
