//! In-process edge source.
//!
//! [BasicDigitalInterrupt] is the bridge between whatever services the GPIO
//! interrupt (a sysfs/chardev watcher thread, a test, the replay tool) and the
//! encoders: the former calls [BasicDigitalInterrupt::tick] on every
//! transition, the latter subscribe through [DigitalInterrupt::add_callback].

use std::sync::Mutex;

use defmt_or_log::{trace, warn};
use portable_atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::error::TrySendError;

use crate::{DigitalInterrupt, EdgeSender, workers::acquire};

#[derive(Debug)]
pub struct BasicDigitalInterrupt {
    name: String,
    callbacks: Mutex<Vec<EdgeSender>>,
    count: AtomicU64,
    dropped: AtomicU64,
}

impl BasicDigitalInterrupt {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callbacks: Mutex::new(Vec::new()),
            count: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Report a transition of the line to `high`.
    ///
    /// Never waits on a subscriber: a subscriber whose queue is full misses
    /// this event, a subscriber that went away is forgotten.
    pub fn tick(&self, high: bool) {
        self.count.fetch_add(1, Ordering::Relaxed);
        let mut callbacks = acquire(&self.callbacks);
        callbacks.retain(|callback| match callback.try_send(high) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(
                    "interrupt {}: queue for line {:?} full, dropped level {}",
                    self.name,
                    callback.line(),
                    high
                );
                true
            }
            Err(TrySendError::Closed(_)) => {
                trace!("interrupt {}: releasing closed subscriber", self.name);
                false
            }
        });
    }

    /// How many transitions have been reported so far.
    pub fn value(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// How many deliveries were lost to full subscriber queues.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Longest backlog among the subscribers' queues. A queue shared with
    /// other lines counts their edges too.
    pub fn pending(&self) -> usize {
        acquire(&self.callbacks)
            .iter()
            .map(|callback| callback.queued())
            .max()
            .unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        acquire(&self.callbacks).len()
    }

    /// Release every subscriber. Their receivers see the channel close once
    /// they have drained what was already delivered.
    pub fn close(&self) {
        acquire(&self.callbacks).clear();
    }
}

impl DigitalInterrupt for BasicDigitalInterrupt {
    fn add_callback(&self, callback: EdgeSender) {
        acquire(&self.callbacks).push(callback);
    }
}
