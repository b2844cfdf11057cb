//! Shared helpers for the encoder tests.

use std::time::Duration;

use tokio::{sync::oneshot, time::Instant};

use crate::{
    Encoder, OnStart,
    common::Channel::{self, A, B},
};

/// One full cycle turning forward, starting from both lines high.
pub const FORWARD_CYCLE: [(Channel, bool); 4] = [(B, false), (A, false), (B, true), (A, true)];
/// One full cycle turning backward, starting from both lines high.
pub const BACKWARD_CYCLE: [(Channel, bool); 4] = [(A, false), (B, false), (A, true), (B, true)];

const WAIT_LIMIT: Duration = Duration::from_secs(2);

/// An `on_start` callback and the receiver it fires.
pub fn started_signal() -> (OnStart, oneshot::Receiver<()>) {
    let (tx, rx) = oneshot::channel();
    let on_start: OnStart = Box::new(move || {
        let _ = tx.send(());
    });
    (on_start, rx)
}

/// Poll until `condition` holds, panicking with `what` after a while.
pub async fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + WAIT_LIMIT;
    while !condition() {
        if Instant::now() > deadline {
            panic!("timed out waiting for {}", what);
        }
        tokio::time::sleep(Duration::from_micros(100)).await;
    }
}

pub async fn wait_for_position<E: Encoder + ?Sized>(encoder: &E, expected: i64) {
    let deadline = Instant::now() + WAIT_LIMIT;
    loop {
        let position = encoder.position();
        if position == expected {
            return;
        }
        if Instant::now() > deadline {
            panic!("expected position {}, stuck at {}", expected, position);
        }
        tokio::time::sleep(Duration::from_micros(100)).await;
    }
}
