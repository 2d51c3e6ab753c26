use std::path::PathBuf;

/// Source file, relative to the working directory.
pub const INPUT_PATH: &str = "data/bottle data/bottle.csv";
/// Destination file, relative to the working directory.
pub const OUTPUT_PATH: &str = "static_data.json";

pub const TIME_COLUMN: &str = "time";
pub const OXYGEN_COLUMN: &str = "micromoles_of_oxygen_per_unit_mass_in_sea_water";
/// Marker for a missing or invalid oxygen reading.
pub const OXYGEN_SENTINEL: f64 = -999.0;

/// Columns written to the JSON output, in output order.
pub const EXPORT_COLUMNS: [&str; 8] = [
    TIME_COLUMN,
    "depth",
    "Latitude",
    "Longitude",
    OXYGEN_COLUMN,
    "sea_water_density",
    "sea_water_practical_salinity",
    "sea_water_temperature",
];

// ---------------------------------------------------------------------------
// Export settings
// ---------------------------------------------------------------------------

/// Everything one export run needs. The binary always uses [`Default`];
/// nothing is read from the environment or the command line.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub oxygen_column: &'static str,
    pub sentinel: f64,
    pub time_column: &'static str,
    pub columns: Vec<&'static str>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(INPUT_PATH),
            output: PathBuf::from(OUTPUT_PATH),
            oxygen_column: OXYGEN_COLUMN,
            sentinel: OXYGEN_SENTINEL,
            time_column: TIME_COLUMN,
            columns: EXPORT_COLUMNS.to_vec(),
        }
    }
}

impl ExportConfig {
    /// Same settings, different files.
    pub fn with_paths(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ..Self::default()
        }
    }
}
