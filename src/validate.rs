//! Input validation: `RawRecord` -> `ValidatedRecord`.
//!
//! This is the only place that inspects `RawValue`. Checks run in a fixed
//! order and stop at the first failure, so a rejected record always carries
//! exactly one reason:
//!
//! 1. presence of every required field
//! 2. numeric coercion (`UnitPrice`, `UnitCost`, `Month`, `Day`, `Year`)
//! 3. month range, day range
//! 4. non-negative price, non-negative cost, cost not above price
//! 5. weekday membership

use crate::domain::{RawRecord, RawValue, ValidatedRecord, canonical_label, fields, parse_weekday};
use crate::error::EngineError;

/// Validate and normalize a raw sale record.
pub fn validate_record(raw: &RawRecord) -> Result<ValidatedRecord, EngineError> {
    for field in fields::REQUIRED {
        if raw.get(field).is_none() {
            return Err(EngineError::validation(field, format!("missing field {field}")));
        }
    }

    let unit_price = coerce_number(raw, fields::UNIT_PRICE)?;
    let unit_cost = coerce_number(raw, fields::UNIT_COST)?;
    let month = coerce_integer(raw, fields::MONTH)?;
    let day = coerce_integer(raw, fields::DAY)?;
    let year = coerce_integer(raw, fields::YEAR)?;

    if !(1..=12).contains(&month) {
        return Err(EngineError::validation(
            fields::MONTH,
            format!("must be between 1 and 12, got {month}"),
        ));
    }
    if !(1..=31).contains(&day) {
        return Err(EngineError::validation(
            fields::DAY,
            format!("must be between 1 and 31, got {day}"),
        ));
    }
    if unit_price < 0.0 {
        return Err(EngineError::validation(
            fields::UNIT_PRICE,
            format!("must be non-negative, got {unit_price}"),
        ));
    }
    if unit_cost < 0.0 {
        return Err(EngineError::validation(
            fields::UNIT_COST,
            format!("must be non-negative, got {unit_cost}"),
        ));
    }
    if unit_cost > unit_price {
        return Err(EngineError::validation(
            fields::UNIT_COST,
            format!("cost {unit_cost} exceeds unit price {unit_price}"),
        ));
    }

    let weekday_text = coerce_text(raw, fields::WEEKDAY)?;
    let weekday = parse_weekday(&weekday_text).ok_or_else(|| {
        EngineError::validation(
            fields::WEEKDAY,
            format!("'{weekday_text}' is not a day of the week (Monday..Sunday)"),
        )
    })?;

    let year = i32::try_from(year).map_err(|_| {
        EngineError::validation(fields::YEAR, format!("invalid numeric value for {}", fields::YEAR))
    })?;

    Ok(ValidatedRecord {
        unit_price,
        unit_cost,
        // Range checks above make these casts lossless.
        month: month as u32,
        day: day as u32,
        weekday,
        location: coerce_text(raw, fields::LOCATION)?,
        product_id: coerce_text(raw, fields::PRODUCT_ID)?,
        year,
    })
}

/// Strictly parse a numeric field.
///
/// Numbers pass through; text must parse as a finite float after trimming.
pub fn coerce_number(raw: &RawRecord, field: &str) -> Result<f64, EngineError> {
    let invalid = || EngineError::validation(field, format!("invalid numeric value for {field}"));
    let value = match raw.get(field) {
        Some(RawValue::Number(v)) => *v,
        Some(RawValue::Text(s)) => s.trim().parse::<f64>().map_err(|_| invalid())?,
        Some(RawValue::Absent) | None => {
            return Err(EngineError::validation(field, format!("missing field {field}")));
        }
    };
    if value.is_finite() { Ok(value) } else { Err(invalid()) }
}

fn coerce_integer(raw: &RawRecord, field: &str) -> Result<i64, EngineError> {
    let value = coerce_number(raw, field)?;
    if value.fract() != 0.0 || value.abs() > i64::MAX as f64 {
        return Err(EngineError::validation(
            field,
            format!("invalid numeric value for {field}"),
        ));
    }
    Ok(value as i64)
}

fn coerce_text(raw: &RawRecord, field: &str) -> Result<String, EngineError> {
    match raw.get(field) {
        Some(RawValue::Text(s)) => Ok(s.trim().to_string()),
        Some(RawValue::Number(v)) => Ok(canonical_label(*v)),
        Some(RawValue::Absent) | None => {
            Err(EngineError::validation(field, format!("missing field {field}")))
        }
    }
}
