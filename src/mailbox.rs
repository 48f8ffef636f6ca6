//! One-item handoff between two tasks.
//!
//! A mailbox holds at most one value. Posting while the slot is occupied
//! waits until the receiver takes the current value, which is what keeps the
//! line reader from running ahead of the dispatcher.

use tokio::sync::mpsc;

use crate::error::{DemoError, Result};

pub struct MailboxSender<T> {
    slot: mpsc::Sender<T>,
}

pub struct MailboxReceiver<T> {
    slot: mpsc::Receiver<T>,
}

pub fn mailbox<T>() -> (MailboxSender<T>, MailboxReceiver<T>) {
    let (tx, rx) = mpsc::channel(1);
    (MailboxSender { slot: tx }, MailboxReceiver { slot: rx })
}

impl<T> MailboxSender<T> {
    /// Waits for the slot to free up, then stores `value` in it.
    pub async fn post(&self, value: T) -> Result<()> {
        self.slot.send(value).await.map_err(|_| DemoError::Closed)
    }
}

impl<T> MailboxReceiver<T> {
    /// Waits for the next value. `None` once the sender is dropped and the
    /// slot has been drained.
    ///
    /// Cancel safe: dropping the future before it resolves loses nothing, so
    /// it can sit in one arm of a `select!`.
    pub async fn take(&mut self) -> Option<T> {
        self.slot.recv().await
    }
}
