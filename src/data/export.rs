use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::model::{BottleTable, Record};
use crate::error::ExportError;

/// Encode the table as a pretty-printed (2-space) JSON array of row-objects.
pub fn to_json_pretty(table: &BottleTable) -> Result<Vec<u8>, ExportError> {
    let records: Vec<Record<'_>> = table.records().collect();
    serde_json::to_vec_pretty(&records).map_err(|source| ExportError::Serialize { source })
}

/// Write the table to `path`, replacing any existing file, and return the
/// number of records written.
///
/// The document is encoded in memory first so an encoding failure never
/// truncates an existing output file.
pub fn write_json(table: &BottleTable, path: &Path) -> Result<usize, ExportError> {
    let bytes = to_json_pretty(table)?;
    let write_err = |source| ExportError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes).map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(table.len())
}
