use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// A generic "n out of total, doing X" progress update,
/// usually sent through a `std::sync::mpsc::Sender`
/// and polled by whoever drew the progress bar.
#[derive(Debug, Clone, Default)]
pub struct GenericProgress {
    pub done: usize,
    pub total: usize,
    pub message: Option<String>,
    pub has_finished: bool,
}

impl GenericProgress {
    #[must_use]
    pub fn finished() -> Self {
        Self {
            done: 1,
            total: 1,
            message: None,
            has_finished: true,
        }
    }
}

/// Cooperative cancellation flag for an in-flight operation.
///
/// Clone it, hand one copy to the running task and keep the
/// other; calling [`AbortFlag::abort`] makes the task bail out
/// at its next check point. The task stops writing before it
/// returns, so cleanup that runs once it has returned is safe.
#[derive(Debug, Clone, Default)]
pub struct AbortFlag(Arc<AtomicBool>);

impl AbortFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
