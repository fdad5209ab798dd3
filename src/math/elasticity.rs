//! Piecewise power-law price elasticity of demand.
//!
//! Quantity is adjusted around an anchor (`reference_price`). With
//! `ratio = price / reference_price`:
//!
//! - `ratio > 1`: multiplier `ratio^-e(ratio)` (demand shrinks)
//! - `ratio < 1`: multiplier `(1/ratio)^e(1/ratio)` (demand grows)
//! - `ratio = 1`: multiplier `1`
//!
//! `e(d)` is tiered by the distance `d >= 1` from the anchor:
//!
//! ```text
//! d <= mild_ratio      -> mild_exponent
//! d <= moderate_ratio  -> moderate_exponent
//! otherwise            -> steep_exponent
//! ```
//!
//! With non-decreasing exponents the multiplier is strictly decreasing in
//! price, which is what keeps "raise price => lower quantity" consistent
//! across a simulation sweep.
//!
//! The tier values are empirical defaults, not physical constants; they are
//! carried in `EngineConfig` so deployments can tune them.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticityCurve {
    pub reference_price: f64,
    pub mild_ratio: f64,
    pub mild_exponent: f64,
    pub moderate_ratio: f64,
    pub moderate_exponent: f64,
    pub steep_exponent: f64,
}

impl Default for ElasticityCurve {
    fn default() -> Self {
        Self {
            reference_price: 100.0,
            mild_ratio: 1.5,
            mild_exponent: 0.6,
            moderate_ratio: 3.0,
            moderate_exponent: 0.9,
            steep_exponent: 1.2,
        }
    }
}

impl ElasticityCurve {
    /// Exponent for a distance `d >= 1` from the reference price.
    pub fn exponent_for(&self, distance: f64) -> f64 {
        if distance <= self.mild_ratio {
            self.mild_exponent
        } else if distance <= self.moderate_ratio {
            self.moderate_exponent
        } else {
            self.steep_exponent
        }
    }

    /// Demand multiplier at `price`.
    ///
    /// Callers must pass a strictly positive, finite price.
    pub fn demand_multiplier(&self, price: f64) -> f64 {
        let ratio = price / self.reference_price;
        if ratio > 1.0 {
            ratio.powf(-self.exponent_for(ratio))
        } else if ratio < 1.0 {
            let inverse = 1.0 / ratio;
            inverse.powf(self.exponent_for(inverse))
        } else {
            1.0
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let finite = [
            self.reference_price,
            self.mild_ratio,
            self.mild_exponent,
            self.moderate_ratio,
            self.moderate_exponent,
            self.steep_exponent,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(EngineError::Configuration(
                "elasticity parameters must be finite".into(),
            ));
        }
        if self.reference_price <= 0.0 {
            return Err(EngineError::Configuration(format!(
                "reference_price must be > 0, got {}",
                self.reference_price
            )));
        }
        if !(self.mild_ratio >= 1.0 && self.moderate_ratio >= self.mild_ratio) {
            return Err(EngineError::Configuration(format!(
                "elasticity tiers must satisfy 1 <= mild_ratio <= moderate_ratio, got {} and {}",
                self.mild_ratio, self.moderate_ratio
            )));
        }
        // Non-decreasing exponents keep the multiplier monotone at tier edges.
        if !(self.mild_exponent >= 0.0
            && self.moderate_exponent >= self.mild_exponent
            && self.steep_exponent >= self.moderate_exponent)
        {
            return Err(EngineError::Configuration(format!(
                "elasticity exponents must be non-negative and non-decreasing, got {} / {} / {}",
                self.mild_exponent, self.moderate_exponent, self.steep_exponent
            )));
        }
        Ok(())
    }
}
