//! JSON export of simulation reports.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crumb_core::SimulationResult;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("report encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `result` to `path` as pretty-printed JSON.
pub fn write_report(path: &Path, result: &SimulationResult) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, result)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    log::debug!("wrote simulation report to {}", path.display());
    Ok(())
}

/// Read a report written by [`write_report`].
pub fn read_report(path: &Path) -> Result<SimulationResult, ExportError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
