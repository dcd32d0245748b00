//! Sequential batch driver for inspection-report analysis.
//!
//! A [`Batch`] runs one [`DocumentProcessor`] over an ordered list of
//! documents, reporting [`Progress`] before each one and isolating failures
//! into [`ErrorRecord`](oae_core::ErrorRecord)s so a bad file never aborts
//! the rest of the run.

pub mod document;
pub mod error;
pub mod pipeline;
pub mod processors;
pub mod progress;

pub use document::InputDocument;
pub use error::ProcessError;
pub use pipeline::{Batch, BatchKind, BatchSummary, DocumentProcessor};
pub use processors::{AuditProcessor, TherapyProcessor};
pub use progress::{NoProgress, Progress, ProgressSink};
