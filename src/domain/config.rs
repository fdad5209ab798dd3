//! Pricing policy constants for the engine.
//!
//! Defaults reproduce the shipped policy. A JSON file with any subset of the
//! fields may override them (see `io::read_engine_config`).

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::math::ElasticityCurve;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Prices above this fail before inference.
    pub max_unit_price: f64,
    pub elasticity: ElasticityCurve,
    /// Largest believable quantity at the reference price. Scaled by the
    /// elasticity multiplier to bound quantity at other prices.
    pub plausible_quantity_at_reference: f64,
    /// Sweep-wide cap on the largest scenario quantity.
    pub quantity_ceiling: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_unit_price: 100_000.0,
            elasticity: ElasticityCurve::default(),
            plausible_quantity_at_reference: 5_000.0,
            quantity_ceiling: 10_000.0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, value) in [
            ("max_unit_price", self.max_unit_price),
            (
                "plausible_quantity_at_reference",
                self.plausible_quantity_at_reference,
            ),
            ("quantity_ceiling", self.quantity_ceiling),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(EngineError::Configuration(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }
        self.elasticity.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_unit_price, 100_000.0);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"quantity_ceiling": 500, "elasticity": {"reference_price": 40}}"#)
                .unwrap();
        assert_eq!(config.quantity_ceiling, 500.0);
        assert_eq!(config.elasticity.reference_price, 40.0);
        assert_eq!(config.elasticity.mild_exponent, 0.6);
        assert_eq!(config.max_unit_price, 100_000.0);
    }

    #[test]
    fn non_positive_ceiling_is_rejected() {
        let config = EngineConfig {
            quantity_ceiling: 0.0,
            ..EngineConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("quantity_ceiling"));
    }
}
