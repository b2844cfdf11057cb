mod counter;
pub use counter::*;

mod direction;
pub use direction::*;

mod quadrature;
pub use quadrature::*;
