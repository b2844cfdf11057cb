//! The two encoder flavours.
//!
//! Both own a [TickCounter](crate::common::TickCounter) shared with exactly one
//! background task, which is the only writer.

use defmt_or_log::warn;
use portable_atomic::{AtomicBool, Ordering};

mod hall;
pub use hall::*;

mod single;
pub use single::*;

/// Capacity of the queue between an edge source and an encoder task, per line.
pub const EDGE_QUEUE_CAPACITY: usize = 1024;

fn note_start(started: &AtomicBool, kind: &str) {
    if started.swap(true, Ordering::Relaxed) {
        warn!(
            "{} encoder started twice, two tasks will update the same position",
            kind
        );
    }
}
