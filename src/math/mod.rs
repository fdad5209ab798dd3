//! Numeric helpers: price elasticity and output rounding.

pub mod elasticity;
pub mod round;

pub use elasticity::*;
pub use round::*;
