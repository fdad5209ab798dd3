//! Feature encoding: `ValidatedRecord` -> model input vector.
//!
//! Columns are first assembled by name, then laid out in the bundle's
//! `feature_names` order. Names the record does not provide are zero-filled.
//!
//! Categorical handling differs per column:
//!
//! - `Location`, `ProductID`: label-encoded; an unseen value is an error.
//! - `Weekday`: fixed ordinal (`Monday = 0` .. `Sunday = 6`). Validated
//!   records carry a typed weekday, so the code is taken from it directly.
//!   Name-level callers use [`weekday_code`], where an unseen name maps to
//!   [`UNKNOWN_WEEKDAY_CODE`] instead of failing.

use std::collections::HashMap;

use chrono::Weekday;

use crate::domain::{ValidatedRecord, fields};
use crate::error::EngineError;
use crate::models::ModelBundle;

/// Code used for weekday names outside the ordinal table.
pub const UNKNOWN_WEEKDAY_CODE: f64 = -1.0;

const WEEKDAY_CODES: [(&str, f64); 7] = [
    ("Monday", 0.0),
    ("Tuesday", 1.0),
    ("Wednesday", 2.0),
    ("Thursday", 3.0),
    ("Friday", 4.0),
    ("Saturday", 5.0),
    ("Sunday", 6.0),
];

/// Ordinal code for a weekday name.
pub fn weekday_code(name: &str) -> f64 {
    WEEKDAY_CODES
        .iter()
        .find(|(day, _)| *day == name)
        .map(|(_, code)| *code)
        .unwrap_or(UNKNOWN_WEEKDAY_CODE)
}

/// Ordinal code for a typed weekday.
pub fn weekday_ordinal(weekday: Weekday) -> f64 {
    f64::from(weekday.num_days_from_monday())
}

/// Encode a validated record into the bundle's feature layout.
pub fn encode(record: &ValidatedRecord, bundle: &ModelBundle) -> Result<Vec<f64>, EngineError> {
    let names = bundle.feature_names();
    if names.is_empty() {
        return Err(EngineError::Configuration(
            "model bundle exposes no feature names".into(),
        ));
    }

    let assembled = assemble(record, bundle)?;
    Ok(names
        .iter()
        .map(|name| assembled.get(name.as_str()).copied().unwrap_or(0.0))
        .collect())
}

fn assemble(
    record: &ValidatedRecord,
    bundle: &ModelBundle,
) -> Result<HashMap<&'static str, f64>, EngineError> {
    let mut columns = HashMap::from([
        (fields::UNIT_PRICE, record.unit_price),
        (fields::UNIT_COST, record.unit_cost),
        (fields::MONTH, f64::from(record.month)),
        (fields::DAY, f64::from(record.day)),
        (fields::YEAR, f64::from(record.year)),
        (fields::WEEKDAY, weekday_ordinal(record.weekday)),
    ]);

    if let Some(encoder) = bundle.encoder(fields::LOCATION) {
        let code = encoder.transform(&record.location).ok_or_else(|| {
            EngineError::Encoding(format!("Unknown location: {}", record.location))
        })?;
        columns.insert(fields::LOCATION, code as f64);
    }
    if let Some(encoder) = bundle.encoder(fields::PRODUCT_ID) {
        let code = encoder.transform(&record.product_id).ok_or_else(|| {
            EngineError::Encoding(format!("Unknown product id: {}", record.product_id))
        })?;
        columns.insert(fields::PRODUCT_ID, code as f64);
    }

    Ok(columns)
}
