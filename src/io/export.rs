//! Export simulation sweeps to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts; columns follow the camelCase names of `SimulationPoint`.

use std::fs::File;
use std::path::Path;

use crate::domain::SimulationPoint;
use crate::error::EngineError;

/// Write sweep points to a CSV file, one row per scenario.
pub fn write_sweep_csv(path: &Path, points: &[SimulationPoint]) -> Result<(), EngineError> {
    let file = File::create(path).map_err(|e| {
        EngineError::Io(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;
    write_sweep(file, points)
}

/// Write sweep points as CSV to any writer.
pub fn write_sweep<W: std::io::Write>(writer: W, points: &[SimulationPoint]) -> Result<(), EngineError> {
    let mut csv = csv::Writer::from_writer(writer);
    for point in points {
        csv.serialize(point)
            .map_err(|e| EngineError::Io(format!("Failed to write export CSV row: {e}")))?;
    }
    csv.flush()
        .map_err(|e| EngineError::Io(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
