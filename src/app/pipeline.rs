//! The engine's public call-style operations, bound to the process-wide model.
//!
//! These are what an outer service layer calls: a record in, a result or a
//! tagged error out. The CLI goes through the `*_with` variants so it can pass
//! an overridden `EngineConfig`.
//!
//! Each operation resolves the shared bundle first; a `ModelLoad` error is
//! returned from there before any record is looked at.

use tracing::debug;

use crate::domain::{
    EngineConfig, Objective, PredictionResult, RawRecord, SimulationPoint, SweepConfig,
};
use crate::error::EngineError;
use crate::models::registry;
use crate::predict::Predictor;
use crate::sim::{PriceOptimizer, PriceSimulator};

/// Predict revenue, quantity and profit for one record.
pub fn predict(record: &RawRecord) -> Result<PredictionResult, EngineError> {
    predict_with(record, &EngineConfig::default())
}

/// Sweep `steps` price factors between `min_factor` and `max_factor`.
///
/// Defaults used by callers: `0.5`, `2.0`, `5`.
pub fn simulate(
    record: &RawRecord,
    min_factor: f64,
    max_factor: f64,
    steps: usize,
) -> Result<Vec<SimulationPoint>, EngineError> {
    simulate_with(
        record,
        &SweepConfig::new(min_factor, max_factor, steps),
        &EngineConfig::default(),
    )
}

/// Best scenario by `metric` (`"revenue"` or `"profit"`).
pub fn optimize(
    record: &RawRecord,
    metric: &str,
    min_factor: f64,
    max_factor: f64,
    steps: usize,
) -> Result<Option<SimulationPoint>, EngineError> {
    let objective: Objective = metric.parse()?;
    optimize_with(
        record,
        objective,
        &SweepConfig::new(min_factor, max_factor, steps),
        &EngineConfig::default(),
    )
}

pub fn predict_with(
    record: &RawRecord,
    config: &EngineConfig,
) -> Result<PredictionResult, EngineError> {
    config.validate()?;
    let bundle = registry::bundle()?;
    Predictor::new(bundle, config).predict(record)
}

pub fn simulate_with(
    record: &RawRecord,
    sweep: &SweepConfig,
    config: &EngineConfig,
) -> Result<Vec<SimulationPoint>, EngineError> {
    config.validate()?;
    let bundle = registry::bundle()?;
    let predictor = Predictor::new(bundle, config);
    let points = PriceSimulator::new(&predictor).simulate(record, sweep)?;
    debug!(requested = sweep.steps, produced = points.len(), "simulation finished");
    Ok(points)
}

pub fn optimize_with(
    record: &RawRecord,
    objective: Objective,
    sweep: &SweepConfig,
    config: &EngineConfig,
) -> Result<Option<SimulationPoint>, EngineError> {
    config.validate()?;
    let bundle = registry::bundle()?;
    let predictor = Predictor::new(bundle, config);
    let simulator = PriceSimulator::new(&predictor);
    PriceOptimizer::new(&simulator).optimize(record, objective, sweep)
}
