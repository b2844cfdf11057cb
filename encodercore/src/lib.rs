//! Shaft position tracking from GPIO edge events.
//!
//! An [Encoder] subscribes to one or two [DigitalInterrupt]s, runs a single
//! background task that turns the delivered levels into ticks, and exposes the
//! running count through a lock-free [Encoder::position].

pub mod common;
pub mod config;
pub mod encoder;
mod error;
pub mod interrupt;
pub mod workers;

#[cfg(test)]
pub(crate) mod test_harness;

mod traits;
pub use error::*;
pub use traits::*;

pub use definitions::Direction;
