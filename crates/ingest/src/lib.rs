//! Page-text acquisition and section segmentation for OAE inspection reports.
//!
//! A report arrives as per-page text (see [`document`]). The [`scanner`] walks
//! those pages once, attributing text to logical sections by heading, while
//! [`metadata`] picks the work name and chainage out of the front matter.

pub mod document;
pub mod headings;
pub mod metadata;
pub mod scanner;
pub mod standard;

pub use document::{ExtensionPageTexts, ExtractionError, PageTextProvider, PdfPageTexts, PlainPageTexts};
pub use metadata::{extract_metadata, MetadataCollector};
pub use scanner::{extract_audit_sections, extract_conclusion, AuditScanner, ConclusionScanner, ScanControl};
pub use standard::ReferenceStandard;
