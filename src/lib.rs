//! `pricecast` library crate.
//!
//! Revenue/quantity prediction and what-if price analysis on top of a
//! pretrained gradient-boosted regression model.
//!
//! The binary (`pricecast`) is a thin wrapper around this library so that:
//!
//! - the engine is testable without spawning processes
//! - an outer service layer can call `predict` / `simulate` / `optimize`
//!   directly with a `RawRecord`

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod features;
pub mod io;
pub mod math;
pub mod models;
pub mod predict;
pub mod report;
pub mod sim;
pub mod validate;

pub use app::pipeline::{optimize, predict, simulate};
pub use domain::{PredictionResult, RawRecord, RawValue, SimulationPoint};
pub use error::EngineError;
