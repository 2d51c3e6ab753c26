//! Bottle-sample export: CSV -> filter sentinel oxygen -> fixed columns -> JSON.

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;

pub use config::ExportConfig;
pub use error::ExportError;
pub use pipeline::{run_export, ExportSummary};
