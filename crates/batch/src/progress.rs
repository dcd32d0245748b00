use tokio::sync::{mpsc, watch};

/// Position of the batch: `current` is 1-based and set before the document is processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub current_file_name: String,
}

impl Progress {
    pub fn new(current: usize, total: usize, current_file_name: impl Into<String>) -> Self {
        Self {
            current,
            total,
            current_file_name: current_file_name.into(),
        }
    }
}

/// Receives progress updates from a running batch.
pub trait ProgressSink: Send + Sync {
    fn report(&self, progress: Progress);
}

/// Latest-value observer: a UI only needs the current position.
impl ProgressSink for watch::Sender<Progress> {
    fn report(&self, progress: Progress) {
        self.send_replace(progress);
    }
}

/// Every update, in order.
impl ProgressSink for mpsc::UnboundedSender<Progress> {
    fn report(&self, progress: Progress) {
        // Receiver gone means nobody is watching.
        let _ = self.send(progress);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _progress: Progress) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_keeps_latest() {
        let (tx, rx) = watch::channel(Progress::default());
        tx.report(Progress::new(1, 2, "a.pdf"));
        tx.report(Progress::new(2, 2, "b.pdf"));
        assert_eq!(*rx.borrow(), Progress::new(2, 2, "b.pdf"));
    }

    #[test]
    fn mpsc_ignores_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        tx.report(Progress::new(1, 1, "a.pdf"));
    }
}
