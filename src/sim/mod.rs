//! What-if price analysis.
//!
//! Responsibilities:
//!
//! - generate price factor grids
//! - predict every scenario of a sweep (parallel) and rescale quantities
//! - pick the best scenario by revenue or profit

pub mod grid;
pub mod optimizer;
pub mod simulator;

pub use grid::*;
pub use optimizer::*;
pub use simulator::*;
