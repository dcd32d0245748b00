use std::fmt;

use async_trait::async_trait;
use oae_core::ErrorRecord;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::document::InputDocument;
use crate::error::ProcessError;
use crate::progress::{Progress, ProgressSink};

/// Turns one document into one result.
#[async_trait]
pub trait DocumentProcessor<R: Send>: Send + Sync {
    async fn process(&self, doc: &InputDocument) -> Result<R, ProcessError>;
}

/// Which analysis a batch holds. Each kind keeps its own results and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Therapy,
    Audit,
}

impl BatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchKind::Therapy => "therapy",
            BatchKind::Audit => "audit",
        }
    }
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// True when the run stopped early on a cancellation signal.
    pub cancelled: bool,
}

/// Results and errors of the most recent run of one batch category.
#[derive(Debug)]
pub struct Batch<R> {
    kind: BatchKind,
    results: Vec<R>,
    errors: Vec<ErrorRecord>,
}

impl<R: Send> Batch<R> {
    pub fn new(kind: BatchKind) -> Self {
        Self {
            kind,
            results: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn kind(&self) -> BatchKind {
        self.kind
    }

    pub fn results(&self) -> &[R] {
        &self.results
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn into_parts(self) -> (Vec<R>, Vec<ErrorRecord>) {
        (self.results, self.errors)
    }

    /// Process `docs` strictly in order, one at a time.
    ///
    /// Previous results and errors are discarded first. Progress for document
    /// `i` is reported before its processing starts. A cancellation signal is
    /// honoured between documents; the document in flight always completes.
    pub async fn run<P>(
        &mut self,
        docs: &[InputDocument],
        processor: &P,
        progress: &dyn ProgressSink,
        cancel: Option<watch::Receiver<bool>>,
    ) -> BatchSummary
    where
        P: DocumentProcessor<R> + ?Sized,
    {
        self.results.clear();
        self.errors.clear();

        let total = docs.len();
        let mut summary = BatchSummary::default();
        info!(kind = %self.kind, total, "batch started");

        for (i, doc) in docs.iter().enumerate() {
            if cancel.as_ref().is_some_and(|rx| *rx.borrow()) {
                warn!(kind = %self.kind, remaining = total - i, "batch cancelled");
                summary.cancelled = true;
                break;
            }

            progress.report(Progress::new(i + 1, total, doc.file_name.as_str()));
            info!(kind = %self.kind, file = %doc.file_name, current = i + 1, total, "processing document");

            match processor.process(doc).await {
                Ok(result) => {
                    self.results.push(result);
                    summary.succeeded += 1;
                }
                Err(e) => {
                    warn!(kind = %self.kind, file = %doc.file_name, error = %e, "document failed");
                    self.errors.push(e.to_record(&doc.file_name));
                    summary.failed += 1;
                }
            }
            summary.processed += 1;
        }

        info!(
            kind = %self.kind,
            processed = summary.processed,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "batch finished"
        );
        summary
    }
}
