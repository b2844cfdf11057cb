use portable_atomic::{AtomicU8, Ordering};

use crate::{Direction, DirectionProvider};

/// Lock-free cell holding the direction a motor is commanding.
///
/// The motor logic stores into it whenever it issues a command, pulse
/// encoders read it on every pulse.
#[derive(Debug, Default)]
pub struct AtomicDirection {
    value: AtomicU8,
}

const NEUTRAL: u8 = 0;
const FORWARD: u8 = 1;
const BACKWARD: u8 = 2;

impl AtomicDirection {
    pub const fn new() -> Self {
        Self {
            value: AtomicU8::new(NEUTRAL),
        }
    }

    pub fn set(&self, direction: Direction) {
        let v = match direction {
            Direction::Neutral => NEUTRAL,
            Direction::Forward => FORWARD,
            Direction::Backward => BACKWARD,
        };
        self.value.store(v, Ordering::Relaxed);
    }

    pub fn get(&self) -> Direction {
        match self.value.load(Ordering::Relaxed) {
            FORWARD => Direction::Forward,
            BACKWARD => Direction::Backward,
            _ => Direction::Neutral,
        }
    }
}

impl DirectionProvider for AtomicDirection {
    fn direction(&self) -> Direction {
        self.get()
    }
}
