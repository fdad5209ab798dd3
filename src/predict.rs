//! Single-record prediction.
//!
//! Pipeline: validate -> price guard -> encode -> infer -> quantity
//! reconstruction -> cost/profit -> rounding.
//!
//! Quantity is not a model output. It is reconstructed as `revenue / price`
//! at the elasticity curve's reference price, using the revenue the model
//! predicts for the same record priced at the reference, and then carried to
//! the requested price by the demand multiplier. The anchor does not depend
//! on the requested price, so quantity never rises with price whatever shape
//! the regressor has in `UnitPrice`. The anchor is capped at a plausible
//! reference quantity, which stops an extreme revenue from turning into an
//! absurd unit count.

use tracing::debug;

use crate::domain::{EngineConfig, PredictionResult, RawRecord, ValidatedRecord, fields};
use crate::error::EngineError;
use crate::features::encode;
use crate::math::round_money;
use crate::models::ModelBundle;
use crate::validate::validate_record;

/// Quantity estimate before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityEstimate {
    /// `revenue / price` at the reference price.
    pub anchor: f64,
    /// Quantity at the requested price, after elasticity and bounding.
    pub adjusted: f64,
    /// Whether the plausibility bound replaced the anchor.
    pub bounded: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Predictor<'a> {
    bundle: &'a ModelBundle,
    config: &'a EngineConfig,
}

impl<'a> Predictor<'a> {
    pub fn new(bundle: &'a ModelBundle, config: &'a EngineConfig) -> Self {
        Self { bundle, config }
    }

    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    /// Predict revenue, quantity, cost and profit for a raw record.
    pub fn predict(&self, raw: &RawRecord) -> Result<PredictionResult, EngineError> {
        let record = validate_record(raw)?;
        self.predict_validated(&record)
    }

    pub fn predict_validated(&self, record: &ValidatedRecord) -> Result<PredictionResult, EngineError> {
        let price = record.unit_price;
        if price > self.config.max_unit_price {
            return Err(EngineError::PriceTooHigh {
                price,
                max: self.config.max_unit_price,
            });
        }
        if price <= 0.0 {
            return Err(EngineError::validation(
                fields::UNIT_PRICE,
                "must be greater than zero to estimate quantity",
            ));
        }

        let revenue = self.predict_revenue(record)?;
        let reference_revenue = self.reference_revenue(record, revenue)?;
        let quantity = self.estimate_quantity(reference_revenue, price);

        let total_cost = quantity.adjusted * record.unit_cost;
        let profit = revenue - total_cost;
        let margin = if revenue == 0.0 {
            0.0
        } else {
            profit / revenue * 100.0
        };

        debug!(
            price,
            revenue,
            reference_revenue,
            anchor_quantity = quantity.anchor,
            quantity = quantity.adjusted,
            bounded = quantity.bounded,
            "prediction computed"
        );

        Ok(PredictionResult {
            predicted_revenue: round_money(revenue),
            estimated_quantity: round_money(quantity.adjusted),
            unit_cost: round_money(record.unit_cost),
            unit_price: round_money(price),
            total_cost: round_money(total_cost),
            profit: round_money(profit),
            profit_margin_pct: round_money(margin),
        })
    }

    /// Model revenue on the natural scale, clamped at zero.
    fn predict_revenue(&self, record: &ValidatedRecord) -> Result<f64, EngineError> {
        let features = encode(record, self.bundle)?;
        let raw = self.bundle.predict_one(&features)?;
        let revenue = if self.bundle.log_target() {
            raw.exp_m1()
        } else {
            raw
        };
        if !revenue.is_finite() {
            return Err(EngineError::Unexpected(format!(
                "model produced a non-finite revenue ({raw}) for price {}",
                record.unit_price
            )));
        }
        Ok(revenue.max(0.0))
    }

    /// Revenue for `record` repriced at the reference price.
    ///
    /// `revenue` is reused when the record is already at the reference.
    fn reference_revenue(
        &self,
        record: &ValidatedRecord,
        revenue: f64,
    ) -> Result<f64, EngineError> {
        let reference_price = self.config.elasticity.reference_price;
        if record.unit_price == reference_price {
            return Ok(revenue);
        }
        let repriced = ValidatedRecord {
            unit_price: reference_price,
            ..record.clone()
        };
        self.predict_revenue(&repriced)
    }

    /// Quantity at a strictly positive `price`, given the revenue predicted
    /// at the reference price.
    pub fn estimate_quantity(&self, reference_revenue: f64, price: f64) -> QuantityEstimate {
        let curve = &self.config.elasticity;
        let anchor = (reference_revenue / curve.reference_price).max(0.0);
        let multiplier = curve.demand_multiplier(price);

        let plausible = self.config.plausible_quantity_at_reference;
        if anchor > plausible {
            debug!(price, anchor, plausible, "quantity exceeds plausibility bound");
            QuantityEstimate {
                anchor,
                adjusted: plausible * multiplier,
                bounded: true,
            }
        } else {
            QuantityEstimate {
                anchor,
                adjusted: anchor * multiplier,
                bounded: false,
            }
        }
    }
}
