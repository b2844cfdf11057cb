use portable_atomic::{AtomicI64, Ordering};

/// Signed tick count, written by one background task and read from anywhere.
///
/// Reads are single atomic loads, so a reader always sees a value that was
/// actually stored, possibly one update behind the decoder.
#[derive(Debug, Default)]
pub struct TickCounter {
    ticks: AtomicI64,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            ticks: AtomicI64::new(0),
        }
    }

    pub fn load(&self) -> i64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Wraps on overflow.
    pub fn add(&self, delta: i64) {
        self.ticks.fetch_add(delta, Ordering::Relaxed);
    }
}
