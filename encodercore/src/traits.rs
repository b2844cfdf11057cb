use tokio::sync::mpsc::{Sender, error::TrySendError};

use crate::{
    Direction,
    common::Channel,
    workers::{BackgroundWorkers, Shutdown},
};

/// A level change (`true` = the line went high), tagged with its line.
pub type Edge = (Channel, bool);

/// What an edge source pushes levels into.
///
/// Several lines may share the queue behind it, each with its own tag, so the
/// consumer sees edges from all of them in the order they were delivered.
#[derive(Debug, Clone)]
pub struct EdgeSender {
    line: Channel,
    tx: Sender<Edge>,
}

impl EdgeSender {
    pub fn new(line: Channel, tx: Sender<Edge>) -> Self {
        Self { line, tx }
    }

    pub fn line(&self) -> Channel {
        self.line
    }

    /// Never waits for room in the queue.
    pub fn try_send(&self, level: bool) -> Result<(), TrySendError<Edge>> {
        self.tx.try_send((self.line, level))
    }

    /// Edges waiting in the queue, from every line sharing it.
    pub fn queued(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }
}

/// Callback invoked by a background task once it is consuming events.
pub type OnStart = Box<dyn FnOnce() + Send + 'static>;

/// A digital line that reports every level change to its subscribers.
pub trait DigitalInterrupt: Send + Sync {
    /// Register a subscriber. It receives every level change from now on, until
    /// its receiving end is dropped.
    fn add_callback(&self, callback: EdgeSender);
}

/// Read-only view of what direction the owning motor is commanding.
pub trait DirectionProvider: Send + Sync {
    /// Must not block, answers are best-effort fresh.
    fn direction(&self) -> Direction;
}

/// Keeps track of a motor position.
pub trait Encoder: Send + Sync {
    /// Current position in ticks. Starts at 0 and never fails.
    fn position(&self) -> i64;

    /// Start the background task tracking the position.
    ///
    /// The task is registered on `workers`, calls `on_start` before consuming
    /// its first event and runs until `shutdown` is cancelled. Starting the
    /// same encoder twice makes two tasks fight over one counter: don't.
    fn start(&self, shutdown: &Shutdown, workers: &BackgroundWorkers, on_start: OnStart);
}
