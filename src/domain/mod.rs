//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - loosely typed input records (`RawRecord`, `RawValue`)
//! - the validated record (`ValidatedRecord`)
//! - outputs (`PredictionResult`, `SimulationPoint`)
//! - engine policy configuration (`EngineConfig`)

pub mod config;
pub mod types;

pub use config::*;
pub use types::*;
