use parking_lot::Mutex;
use std::collections::VecDeque;
use tokio::sync::Notify;

/// Queue of one-shot events. Every event is handed out exactly once.
#[derive(Debug)]
pub struct EventQueue<E> {
    pending: Mutex<VecDeque<E>>,
    notify: Notify,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
        }
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: E) {
        self.pending.lock().push_back(event);
        self.notify.notify_one();
    }

    pub fn try_next(&self) -> Option<E> {
        self.pending.lock().pop_front()
    }

    /// Takes everything pending.
    pub fn drain(&self) -> Vec<E> {
        self.pending.lock().drain(..).collect()
    }

    /// Waits for the next event.
    pub async fn next(&self) -> E {
        loop {
            if let Some(event) = self.try_next() {
                return event;
            }
            self.notify.notified().await;
        }
    }

    /// Drops pending events matching `pred`.
    pub fn discard(&self, pred: impl Fn(&E) -> bool) {
        self.pending.lock().retain(|e| !pred(e));
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}
