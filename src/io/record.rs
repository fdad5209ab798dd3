//! Read sale records from JSON.
//!
//! Callers name fields in many ways (`unitPrice`, `Unit Price`, `unit_price`).
//! The engine only knows the canonical names, so keys are normalized here, at
//! the edge, before a record reaches the validator.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::domain::{RawRecord, fields};
use crate::error::EngineError;

/// Read a record from a JSON file, or stdin when `path` is `-`.
pub fn read_record(path: &Path) -> Result<RawRecord, EngineError> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| EngineError::Io(format!("Failed to read record from stdin: {e}")))?;
        buf
    } else {
        fs::read_to_string(path).map_err(|e| {
            EngineError::Io(format!("Failed to open record '{}': {e}", path.display()))
        })?
    };
    parse_record(&text)
}

/// Parse a JSON object into a record with canonical field names.
pub fn parse_record(json: &str) -> Result<RawRecord, EngineError> {
    let raw: RawRecord = serde_json::from_str(json)
        .map_err(|e| EngineError::Io(format!("Invalid record JSON: {e}")))?;
    Ok(canonicalize_keys(raw))
}

/// Rename known field aliases to their canonical names; other keys pass through.
pub fn canonicalize_keys(raw: RawRecord) -> RawRecord {
    raw.iter()
        .map(|(key, value)| (canonical_field_name(key), value.clone()))
        .collect()
}

fn canonical_field_name(key: &str) -> String {
    let folded = fold(key);
    fields::REQUIRED
        .iter()
        .find(|name| fold(name) == folded)
        .map(|name| name.to_string())
        .unwrap_or_else(|| key.to_string())
}

fn fold(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawValue;
    use std::io::Write;

    #[test]
    fn aliases_map_to_canonical_names() {
        let record = parse_record(
            r#"{"unitPrice": 10, "Unit Cost": "4", "product_id": 3, "weekday": "Monday", "Promo": 1}"#,
        )
        .unwrap();
        assert_eq!(record.get("UnitPrice"), Some(&RawValue::Number(10.0)));
        assert_eq!(record.get("UnitCost"), Some(&RawValue::Text("4".into())));
        assert_eq!(record.get("ProductID"), Some(&RawValue::Number(3.0)));
        assert_eq!(record.get("Weekday"), Some(&RawValue::Text("Monday".into())));
        assert_eq!(record.get("Promo"), Some(&RawValue::Number(1.0)));
    }

    #[test]
    fn non_object_json_is_rejected() {
        let err = parse_record("[1, 2]").unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }

    #[test]
    fn reads_record_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"Location": "North"}"#).unwrap();
        let record = read_record(file.path()).unwrap();
        assert_eq!(record.get("Location"), Some(&RawValue::Text("North".into())));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_record(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open record"));
    }
}
