use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::{sync::watch, task::JoinHandle};

/// Only the most recently started fetch may write its result.
///
/// Every fetch takes a ticket from [`FetchGuard::begin`]; starting a new one
/// (or cancelling) invalidates older tickets and aborts the tracked task.
#[derive(Debug, Default)]
pub(crate) struct FetchGuard {
    generation: AtomicU64,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl FetchGuard {
    pub(crate) fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    pub(crate) fn track(&self, handle: JoinHandle<()>) {
        if let Some(previous) = self.task.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Invalidate every outstanding ticket and abort the in-flight task.
    pub(crate) fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
    }

    /// Writes `next` if `ticket` is still current. The check runs under the
    /// watch lock, so a stale result can never overwrite a newer one.
    pub(crate) fn commit<S>(&self, state: &watch::Sender<S>, ticket: u64, next: S) -> bool {
        state.send_if_modified(|slot| {
            if !self.is_current(ticket) {
                return false;
            }
            *slot = next;
            true
        })
    }
}
