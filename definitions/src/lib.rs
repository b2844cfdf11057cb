mod encoder;
mod motor;
mod trace;

pub use encoder::*;
pub use motor::*;
pub use trace::*;
