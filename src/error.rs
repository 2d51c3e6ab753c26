use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every way an export run can fail. Messages name the failing stage.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("load: cannot read input {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("load: malformed CSV in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("load: row {row} in {} has {found} fields, header has {expected}", .path.display())]
    ExtraFields {
        path: PathBuf,
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("{stage}: missing expected column '{column}'")]
    MissingColumn {
        stage: &'static str,
        column: String,
    },

    #[error("normalize: row {row}: cannot parse time value '{value}'")]
    TimeParse { row: usize, value: String },

    #[error("export: cannot write output {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("export: JSON encoding failed: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}
