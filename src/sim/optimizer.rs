//! Price optimization over a simulation sweep.

use crate::domain::{Objective, RawRecord, SimulationPoint, SweepConfig};
use crate::error::EngineError;
use crate::sim::simulator::PriceSimulator;

#[derive(Debug, Clone, Copy)]
pub struct PriceOptimizer<'a> {
    simulator: &'a PriceSimulator<'a>,
}

impl<'a> PriceOptimizer<'a> {
    pub fn new(simulator: &'a PriceSimulator<'a>) -> Self {
        Self { simulator }
    }

    /// Best scenario of the sweep by `objective`, or `None` for an empty sweep.
    pub fn optimize(
        &self,
        base: &RawRecord,
        objective: Objective,
        sweep: &SweepConfig,
    ) -> Result<Option<SimulationPoint>, EngineError> {
        let points = self.simulator.simulate(base, sweep)?;
        Ok(best_point(&points, objective).cloned())
    }
}

/// First point with the maximal objective value, in sweep order.
pub fn best_point(points: &[SimulationPoint], objective: Objective) -> Option<&SimulationPoint> {
    points.iter().fold(None, |best, p| match best {
        Some(b) if objective.score(p) <= objective.score(b) => Some(b),
        _ => Some(p),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EngineConfig;
    use crate::models::bundle::fixtures;
    use crate::predict::Predictor;

    fn point(factor: f64, revenue: f64, profit: f64) -> SimulationPoint {
        SimulationPoint {
            scenario_label: format!("{factor}"),
            price_factor: factor,
            unit_price: 100.0 * factor,
            predicted_revenue: revenue,
            predicted_quantity: 1.0,
            profit,
            raw_quantity: 1.0,
        }
    }

    #[test]
    fn picks_max_by_objective() {
        let points = vec![point(0.5, 10.0, 5.0), point(1.0, 30.0, 2.0), point(1.5, 20.0, 9.0)];
        assert_eq!(best_point(&points, Objective::Revenue).unwrap().price_factor, 1.0);
        assert_eq!(best_point(&points, Objective::Profit).unwrap().price_factor, 1.5);
    }

    #[test]
    fn ties_go_to_the_first_point() {
        let points = vec![point(0.5, 10.0, 7.0), point(1.0, 10.0, 7.0)];
        assert_eq!(best_point(&points, Objective::Revenue).unwrap().price_factor, 0.5);
        assert_eq!(best_point(&points, Objective::Profit).unwrap().price_factor, 0.5);
    }

    #[test]
    fn empty_sweep_has_no_optimum() {
        assert!(best_point(&[], Objective::Profit).is_none());
    }

    #[test]
    fn optimize_agrees_with_simulate() {
        let bundle = fixtures::price_aware_bundle();
        let config = EngineConfig::default();
        let predictor = Predictor::new(&bundle, &config);
        let simulator = PriceSimulator::new(&predictor);
        let optimizer = PriceOptimizer::new(&simulator);

        let base = RawRecord::new()
            .with("UnitPrice", 100.0)
            .with("UnitCost", 40.0)
            .with("Location", "East")
            .with("ProductID", "2")
            .with("Month", 3)
            .with("Day", 9)
            .with("Weekday", "Tuesday")
            .with("Year", 2024);
        let sweep = SweepConfig::new(0.5, 2.0, 7);
        let points = simulator.simulate(&base, &sweep).unwrap();

        for objective in [Objective::Revenue, Objective::Profit] {
            let best = optimizer.optimize(&base, objective, &sweep).unwrap().unwrap();
            let max = points
                .iter()
                .map(|p| objective.score(p))
                .fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(objective.score(&best), max);
        }
    }

    #[test]
    fn optimize_on_empty_sweep_returns_none() {
        let bundle = fixtures::flat_revenue_bundle();
        let config = EngineConfig::default();
        let predictor = Predictor::new(&bundle, &config);
        let simulator = PriceSimulator::new(&predictor);
        let base = RawRecord::new()
            .with("UnitPrice", 0.0)
            .with("UnitCost", 0.0)
            .with("Location", "North")
            .with("ProductID", 1)
            .with("Month", 6)
            .with("Day", 15)
            .with("Weekday", "Friday")
            .with("Year", 2023);
        let best = PriceOptimizer::new(&simulator)
            .optimize(&base, Objective::Revenue, &SweepConfig::default())
            .unwrap();
        assert!(best.is_none());
    }
}
