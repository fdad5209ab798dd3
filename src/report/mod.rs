//! Reporting utilities: terminal formatting of engine results.

pub mod format;

pub use format::*;
