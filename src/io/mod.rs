//! Input/output helpers for the CLI front-end.
//!
//! - JSON record reading + field-name normalization (`record`)
//! - engine config overrides (`config`)
//! - sweep CSV export (`export`)

pub mod config;
pub mod export;
pub mod record;

pub use config::*;
pub use export::*;
pub use record::*;
