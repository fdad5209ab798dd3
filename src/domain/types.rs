//! Shared domain types.
//!
//! Records come in loosely typed (`RawRecord`) and leave the validator strictly
//! typed (`ValidatedRecord`). Everything downstream of `validate` works on the
//! typed form only. Result types serialize with camelCase keys so callers can
//! hand them straight to JSON consumers.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Canonical field names of a sale record.
pub mod fields {
    pub const UNIT_PRICE: &str = "UnitPrice";
    pub const UNIT_COST: &str = "UnitCost";
    pub const MONTH: &str = "Month";
    pub const DAY: &str = "Day";
    pub const WEEKDAY: &str = "Weekday";
    pub const LOCATION: &str = "Location";
    pub const PRODUCT_ID: &str = "ProductID";
    pub const YEAR: &str = "Year";

    /// Required keys, in the order presence is checked.
    pub const REQUIRED: [&str; 8] = [
        UNIT_PRICE, UNIT_COST, MONTH, DAY, WEEKDAY, LOCATION, PRODUCT_ID, YEAR,
    ];
}

/// A single untrusted field value.
///
/// JSON `null` deserializes to `Absent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Absent,
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// A sale record as supplied by a caller: field name -> untrusted value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(BTreeMap<String, RawValue>);

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Value for `key`, treating `Absent` the same as a missing key.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        match self.0.get(key) {
            Some(RawValue::Absent) | None => None,
            Some(v) => Some(v),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<RawValue> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RawValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, RawValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A sale record that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    pub unit_price: f64,
    pub unit_cost: f64,
    pub month: u32,
    pub day: u32,
    pub weekday: Weekday,
    pub location: String,
    pub product_id: String,
    pub year: i32,
}

impl From<&ValidatedRecord> for RawRecord {
    fn from(record: &ValidatedRecord) -> Self {
        RawRecord::new()
            .with(fields::UNIT_PRICE, record.unit_price)
            .with(fields::UNIT_COST, record.unit_cost)
            .with(fields::MONTH, record.month)
            .with(fields::DAY, record.day)
            .with(fields::WEEKDAY, weekday_name(record.weekday))
            .with(fields::LOCATION, record.location.as_str())
            .with(fields::PRODUCT_ID, record.product_id.as_str())
            .with(fields::YEAR, record.year)
    }
}

/// Full English name for a weekday (`Monday` .. `Sunday`).
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a full English weekday name, ignoring case and surrounding space.
///
/// Abbreviations are rejected on purpose: chrono's own `FromStr` accepts
/// `"mon"`, which is looser than the record schema.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let name = name.trim();
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .find(|d| weekday_name(*d).eq_ignore_ascii_case(name))
}

/// Render a numeric categorical value the way label encoders store it.
///
/// Integral values drop the fractional part (`1.0` -> `"1"`).
pub fn canonical_label(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Output of a single prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub predicted_revenue: f64,
    pub estimated_quantity: f64,
    pub unit_cost: f64,
    pub unit_price: f64,
    pub total_cost: f64,
    pub profit: f64,
    pub profit_margin_pct: f64,
}

/// One scenario of a price sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationPoint {
    pub scenario_label: String,
    pub price_factor: f64,
    pub unit_price: f64,
    pub predicted_revenue: f64,
    pub predicted_quantity: f64,
    pub profit: f64,
    /// Quantity before the sweep-wide plausibility rescale.
    pub raw_quantity: f64,
}

/// Price sweep parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub min_factor: f64,
    pub max_factor: f64,
    pub steps: usize,
}

impl SweepConfig {
    pub fn new(min_factor: f64, max_factor: f64, steps: usize) -> Self {
        Self {
            min_factor,
            max_factor,
            steps,
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::new(0.5, 2.0, 5)
    }
}

/// What the optimizer maximizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    Revenue,
    #[default]
    Profit,
}

impl Objective {
    pub fn as_str(self) -> &'static str {
        match self {
            Objective::Revenue => "revenue",
            Objective::Profit => "profit",
        }
    }

    /// The value this objective reads from a scenario.
    pub fn score(self, point: &SimulationPoint) -> f64 {
        match self {
            Objective::Revenue => point.predicted_revenue,
            Objective::Profit => point.profit,
        }
    }
}

impl FromStr for Objective {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "revenue" => Ok(Objective::Revenue),
            "profit" => Ok(Objective::Profit),
            other => Err(EngineError::InvalidMetric(other.to_string())),
        }
    }
}
