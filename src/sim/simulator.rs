//! Price sweep simulation.
//!
//! A sweep scales the base record's `UnitPrice` by each factor of an even grid
//! and predicts every scenario independently (in parallel). Failed scenarios
//! are logged and dropped. The simulator borrows an already loaded bundle;
//! a model load failure surfaces earlier, from `registry::bundle()` in
//! `app::pipeline`, and never reaches a sweep.
//!
//! Once all scenarios are collected the sweep is sorted by factor, labelled,
//! and rescaled: if the largest quantity exceeds the configured ceiling, every
//! quantity is multiplied by `ceiling / max`. This keeps chart ranges sane
//! when one extreme price produces an outlier, while preserving the ordering
//! between scenarios. Prices, revenue and profit are left untouched.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::domain::{PredictionResult, RawRecord, SimulationPoint, SweepConfig, fields};
use crate::error::EngineError;
use crate::math::round_money;
use crate::predict::Predictor;
use crate::sim::grid::price_factors;
use crate::validate::coerce_number;

/// Label of the scenario closest to the base price.
pub const CURRENT_PRICE_LABEL: &str = "Current Price";

#[derive(Debug, Clone)]
struct Scenario {
    factor: f64,
    result: PredictionResult,
}

#[derive(Debug, Clone, Copy)]
pub struct PriceSimulator<'a> {
    predictor: &'a Predictor<'a>,
}

impl<'a> PriceSimulator<'a> {
    pub fn new(predictor: &'a Predictor<'a>) -> Self {
        Self { predictor }
    }

    /// Run a sweep around `base`.
    ///
    /// Returns an empty sweep (not an error) when the base record is empty,
    /// its price is unusable, or every scenario fails.
    pub fn simulate(
        &self,
        base: &RawRecord,
        sweep: &SweepConfig,
    ) -> Result<Vec<SimulationPoint>, EngineError> {
        let factors = price_factors(sweep.min_factor, sweep.max_factor, sweep.steps);
        if factors.is_empty() || base.is_empty() {
            return Ok(Vec::new());
        }

        let base_price = match coerce_number(base, fields::UNIT_PRICE) {
            Ok(price) => price,
            Err(err) => {
                warn!(error = %err, "base record has no usable price; nothing to simulate");
                return Ok(Vec::new());
            }
        };

        let outcomes: Vec<(f64, Result<PredictionResult, EngineError>)> = factors
            .par_iter()
            .map(|&factor| {
                let mut record = base.clone();
                record.insert(fields::UNIT_PRICE, round_money(base_price * factor));
                (factor, self.predictor.predict(&record))
            })
            .collect();

        // Barrier: everything below needs the full set of scenarios.
        let mut scenarios = Vec::with_capacity(outcomes.len());
        for (factor, outcome) in outcomes {
            match outcome {
                Ok(result) => scenarios.push(Scenario { factor, result }),
                Err(err) => warn!(factor, error = %err, "skipping simulation point"),
            }
        }
        scenarios.sort_by(|a, b| a.factor.total_cmp(&b.factor));

        let points = label_scenarios(&scenarios);
        Ok(rescale_quantities(
            points,
            self.predictor.config().quantity_ceiling,
        ))
    }
}

fn label_scenarios(scenarios: &[Scenario]) -> Vec<SimulationPoint> {
    let current = scenarios
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (a.factor - 1.0).abs().total_cmp(&(b.factor - 1.0).abs()))
        .map(|(i, _)| i);

    scenarios
        .iter()
        .enumerate()
        .map(|(i, s)| SimulationPoint {
            scenario_label: if Some(i) == current {
                CURRENT_PRICE_LABEL.to_string()
            } else {
                scenario_label(s.factor)
            },
            price_factor: s.factor,
            unit_price: s.result.unit_price,
            predicted_revenue: s.result.predicted_revenue,
            predicted_quantity: s.result.estimated_quantity,
            profit: s.result.profit,
            raw_quantity: s.result.estimated_quantity,
        })
        .collect()
}

/// `"20% Decrease"` / `"25% Increase"` relative to the base price.
pub fn scenario_label(factor: f64) -> String {
    let pct = ((factor - 1.0).abs() * 100.0).round() as i64;
    if factor < 1.0 {
        format!("{pct}% Decrease")
    } else {
        format!("{pct}% Increase")
    }
}

/// Scale every quantity down uniformly if the sweep maximum exceeds `ceiling`.
fn rescale_quantities(mut points: Vec<SimulationPoint>, ceiling: f64) -> Vec<SimulationPoint> {
    let max_quantity = points
        .iter()
        .map(|p| p.raw_quantity)
        .fold(0.0_f64, f64::max);
    if max_quantity <= ceiling {
        return points;
    }

    let scale = ceiling / max_quantity;
    debug!(max_quantity, ceiling, scale, "rescaling sweep quantities");
    for point in &mut points {
        point.predicted_quantity = round_money(point.raw_quantity * scale);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EngineConfig;
    use crate::models::bundle::fixtures;

    fn scenario_record() -> RawRecord {
        RawRecord::new()
            .with("UnitPrice", 100.0)
            .with("UnitCost", 50.0)
            .with("Location", "North")
            .with("ProductID", 1)
            .with("Month", 6)
            .with("Day", 15)
            .with("Weekday", "Friday")
            .with("Year", 2023)
    }

    #[test]
    fn three_step_sweep_has_decreasing_quantity() {
        let bundle = fixtures::price_aware_bundle();
        let config = EngineConfig::default();
        let predictor = Predictor::new(&bundle, &config);
        let points = PriceSimulator::new(&predictor)
            .simulate(&scenario_record(), &SweepConfig::new(0.5, 2.0, 3))
            .unwrap();

        assert_eq!(points.len(), 3);
        let factors: Vec<f64> = points.iter().map(|p| p.price_factor).collect();
        assert_eq!(factors, vec![0.5, 1.25, 2.0]);
        let prices: Vec<f64> = points.iter().map(|p| p.unit_price).collect();
        assert_eq!(prices, vec![50.0, 125.0, 200.0]);
        for w in points.windows(2) {
            assert!(w[1].predicted_quantity < w[0].predicted_quantity);
        }
    }

    #[test]
    fn labels_mark_current_price() {
        let bundle = fixtures::flat_revenue_bundle();
        let config = EngineConfig::default();
        let predictor = Predictor::new(&bundle, &config);
        let points = PriceSimulator::new(&predictor)
            .simulate(&scenario_record(), &SweepConfig::new(0.6, 1.4, 5))
            .unwrap();

        let labels: Vec<&str> = points.iter().map(|p| p.scenario_label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["40% Decrease", "20% Decrease", "Current Price", "20% Increase", "40% Increase"]
        );
    }

    #[test]
    fn single_step_is_the_base_price() {
        let bundle = fixtures::flat_revenue_bundle();
        let config = EngineConfig::default();
        let predictor = Predictor::new(&bundle, &config);
        let points = PriceSimulator::new(&predictor)
            .simulate(&scenario_record(), &SweepConfig::new(0.5, 2.0, 1))
            .unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].price_factor, 1.0);
        assert_eq!(points[0].unit_price, 100.0);
        assert_eq!(points[0].scenario_label, CURRENT_PRICE_LABEL);
    }

    #[test]
    fn failed_points_are_skipped() {
        let bundle = fixtures::flat_revenue_bundle();
        let config = EngineConfig::default();
        let predictor = Predictor::new(&bundle, &config);
        // Cost 80: the 0.5x scenario prices below cost and fails validation.
        let base = scenario_record().with("UnitCost", 80.0);
        let points = PriceSimulator::new(&predictor)
            .simulate(&base, &SweepConfig::new(0.5, 2.0, 3))
            .unwrap();
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.price_factor > 0.5));
    }

    #[test]
    fn zero_base_price_yields_empty_sweep() {
        let bundle = fixtures::flat_revenue_bundle();
        let config = EngineConfig::default();
        let predictor = Predictor::new(&bundle, &config);
        let base = scenario_record().with("UnitPrice", 0.0).with("UnitCost", 0.0);
        let points = PriceSimulator::new(&predictor)
            .simulate(&base, &SweepConfig::default())
            .unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn empty_or_unpriced_base_yields_empty_sweep() {
        let bundle = fixtures::flat_revenue_bundle();
        let config = EngineConfig::default();
        let predictor = Predictor::new(&bundle, &config);
        let simulator = PriceSimulator::new(&predictor);
        assert!(simulator.simulate(&RawRecord::new(), &SweepConfig::default()).unwrap().is_empty());
        let base = scenario_record().with("UnitPrice", "n/a");
        assert!(simulator.simulate(&base, &SweepConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn quantities_are_rescaled_under_ceiling() {
        let bundle = fixtures::flat_revenue_bundle();
        let config = EngineConfig {
            quantity_ceiling: 5.0,
            ..EngineConfig::default()
        };
        let predictor = Predictor::new(&bundle, &config);
        let points = PriceSimulator::new(&predictor)
            .simulate(&scenario_record(), &SweepConfig::new(0.5, 2.0, 4))
            .unwrap();

        assert_eq!(points.len(), 4);
        let max = points.iter().map(|p| p.predicted_quantity).fold(0.0, f64::max);
        assert!(max <= 5.0);
        assert_eq!(points[0].predicted_quantity, 5.0);
        // Ratios between scenarios survive the rescale.
        let scale = 5.0 / points[0].raw_quantity;
        for p in &points {
            assert!((p.predicted_quantity - round_money(p.raw_quantity * scale)).abs() < 1e-9);
            assert!(p.raw_quantity >= p.predicted_quantity);
        }
        for w in points.windows(2) {
            assert!(w[1].predicted_quantity <= w[0].predicted_quantity);
        }
    }

    #[test]
    fn scenario_labels_round_percentages() {
        assert_eq!(scenario_label(0.75), "25% Decrease");
        assert_eq!(scenario_label(1.125), "13% Increase");
        assert_eq!(scenario_label(2.0), "100% Increase");
    }
}
