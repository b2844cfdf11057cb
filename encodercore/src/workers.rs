//! Cancellation and joining of the encoders' background tasks.

use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard},
};

use defmt_or_log::{error, trace};
use tokio::{sync::watch, task::JoinHandle};

/// Shared cancellation signal, observed cooperatively by background tasks.
///
/// Every clone observes the same signal; cancelling is idempotent and can't be undone.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once [Shutdown::cancel] has been called on any clone.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // the sender lives as long as self, so this can only return once cancelled
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of running background tasks, so their owner can wait for all of
/// them to be gone before releasing what they use.
#[derive(Debug, Default)]
pub struct BackgroundWorkers {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

/// Lock, carrying on with the data if a holder panicked.
pub(crate) fn acquire<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl BackgroundWorkers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `future` on the current tokio runtime and register it.
    ///
    /// Panics if called outside of a runtime, like [tokio::spawn].
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        acquire(&self.handles).push(handle);
    }

    /// Number of tasks registered and not yet joined.
    pub fn len(&self) -> usize {
        acquire(&self.handles).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait for every registered task to finish, including tasks registered
    /// while waiting. A panicking task is logged and does not stop the others
    /// from being joined.
    pub async fn wait(&self) {
        loop {
            let handles = std::mem::take(&mut *acquire(&self.handles));
            if handles.is_empty() {
                return;
            }
            trace!("BackgroundWorkers: joining {} tasks", handles.len());
            for handle in handles {
                if let Err(e) = handle.await {
                    error!("BackgroundWorkers: background task failed: {}", e);
                }
            }
        }
    }
}
