use std::fmt;
use std::path::PathBuf;

use crate::config::ExportConfig;
use crate::data::{export, filter, loader, project};
use crate::error::ExportError;

/// Counts from a finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub records_written: usize,
    pub output: PathBuf,
}

/// The console line reported after a successful run.
impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully exported {} records to {}",
            self.records_written,
            self.output.display()
        )
    }
}

/// Load → filter → project/normalize → write, once, in that order. The
/// first failure aborts the run.
pub fn run_export(config: &ExportConfig) -> Result<ExportSummary, ExportError> {
    log::info!("loading {}", config.input.display());
    let table = loader::load_csv(&config.input)?;
    let rows_read = table.len();

    let table = filter::drop_sentinel_rows(table, config.oxygen_column, config.sentinel)?;
    let rows_dropped = rows_read - table.len();
    if table.is_empty() {
        log::warn!("no rows left after filtering; output will be an empty array");
    }

    let table = project::project_columns(table, &config.columns)?;
    let table = project::normalize_time(table, config.time_column)?;

    let records_written = export::write_json(&table, &config.output)?;

    let summary = ExportSummary {
        rows_read,
        rows_dropped,
        records_written,
        output: config.output.clone(),
    };
    log::info!(
        "export done: read={} dropped={} written={} -> {}",
        summary.rows_read,
        summary.rows_dropped,
        summary.records_written,
        summary.output.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EXPORT_COLUMNS, OXYGEN_COLUMN};
    use serde_json::Value;
    use std::fs;
    use std::path::Path;

    const HEADER: &str = "time,depth,Latitude,Longitude,\
        micromoles_of_oxygen_per_unit_mass_in_sea_water,sea_water_density,\
        sea_water_practical_salinity,sea_water_temperature,extra_col";

    fn setup(body: &str) -> (tempfile::TempDir, ExportConfig) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bottle.csv");
        fs::write(&input, format!("{HEADER}\n{body}")).unwrap();
        let config = ExportConfig::with_paths(input, dir.path().join("static_data.json"));
        (dir, config)
    }

    fn read_output(path: &Path) -> Vec<Value> {
        let text = fs::read_to_string(path).unwrap();
        serde_json::from_str::<Value>(&text)
            .unwrap()
            .as_array()
            .unwrap()
            .clone()
    }

    fn keys_in_file_order(path: &Path) -> Vec<Vec<String>> {
        // serde_json::Map sorts keys unless preserve_order is on, so read
        // the key order back from the text itself.
        let text = fs::read_to_string(path).unwrap();
        let mut objects = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line == "{" {
                objects.push(Vec::new());
            } else if let Some(rest) = line.strip_prefix('"') {
                let key = rest.split('"').next().unwrap().to_string();
                objects.last_mut().unwrap().push(key);
            }
        }
        objects
    }

    #[test]
    fn summary_line_names_count_and_output() {
        let summary = ExportSummary {
            rows_read: 3,
            rows_dropped: 1,
            records_written: 2,
            output: ExportConfig::default().output,
        };
        assert_eq!(
            summary.to_string(),
            "Successfully exported 2 records to static_data.json"
        );
    }

    #[test]
    fn header_only_input_reports_zero_records() {
        let (_dir, config) = setup("");

        let summary = run_export(&config).unwrap();
        let line = ExportSummary {
            output: "static_data.json".into(),
            ..summary
        }
        .to_string();
        assert_eq!(line, "Successfully exported 0 records to static_data.json");
    }

    #[test]
    fn na_oxygen_keeps_column_numeric_and_sentinel_filtered() {
        let (_dir, config) = setup(
            "2021-05-01 10:00:00,5,36.5,-122.0,250.3,1025.1,33.8,14.2,a\n\
             2021-05-01 11:00:00,10,36.5,NA,-999,1025.2,33.9,14.0,b\n\
             2021-05-01 12:00:00,20,36.5,NA,NA,1025.3,34.0,13.8,c\n",
        );

        let summary = run_export(&config).unwrap();
        assert_eq!(summary.rows_dropped, 1);
        assert_eq!(summary.records_written, 2);

        let rows = read_output(&config.output);
        assert_eq!(rows[0][OXYGEN_COLUMN].as_f64(), Some(250.3));
        assert_eq!(rows[0]["Longitude"].as_f64(), Some(-122.0));
        assert!(rows[1][OXYGEN_COLUMN].is_null());
        assert!(rows[1]["Longitude"].is_null());
        for row in &rows {
            assert!(!row[OXYGEN_COLUMN].is_string());
        }
    }

    #[test]
    fn short_row_exports_with_missing_trailing_field() {
        let (_dir, config) = setup(
            "2021-05-01 10:00:00,5,36.5,-122.0,250.3,1025.1,33.8,14.2,a\n\
             2021-05-01 11:00:00,10,36.5,-122.0,240.1,1025.2,33.9,14.0\n",
        );

        let summary = run_export(&config).unwrap();
        assert_eq!(summary.records_written, 2);
        let rows = read_output(&config.output);
        assert_eq!(rows[1]["sea_water_temperature"].as_f64(), Some(14.0));
    }

    #[test]
    fn exports_reference_row() {
        let (_dir, config) = setup(
            "2021-05-01 10:00:00,5,36.5,-122.0,250.3,1025.1,33.8,14.2,ignored\n",
        );

        let summary = run_export(&config).unwrap();
        assert_eq!(summary.records_written, 1);

        let text = fs::read_to_string(&config.output).unwrap();
        assert_eq!(
            text,
            r#"[
  {
    "time": "2021-05-01T10:00:00",
    "depth": 5,
    "Latitude": 36.5,
    "Longitude": -122.0,
    "micromoles_of_oxygen_per_unit_mass_in_sea_water": 250.3,
    "sea_water_density": 1025.1,
    "sea_water_practical_salinity": 33.8,
    "sea_water_temperature": 14.2
  }
]"#
        );
    }

    #[test]
    fn sentinel_rows_are_absent_and_counted() {
        let (_dir, config) = setup(
            "2021-05-01 10:00:00,5,36.5,-122.0,250.3,1025.1,33.8,14.2,a\n\
             2021-05-01 11:00:00,10,36.5,-122.0,-999,1025.2,33.9,14.0,b\n\
             2021-05-01 12:00:00,20,36.5,-122.0,-999.0,1025.3,34.0,13.8,c\n\
             2021-05-01 13:00:00,30,36.5,-122.0,-999.0000001,1025.4,34.1,13.5,d\n",
        );

        let summary = run_export(&config).unwrap();
        assert_eq!(summary.rows_read, 4);
        assert_eq!(summary.rows_dropped, 2);
        assert_eq!(summary.records_written, 2);

        let rows = read_output(&config.output);
        assert_eq!(rows.len(), summary.rows_read - summary.rows_dropped);
        for row in &rows {
            assert_ne!(row[OXYGEN_COLUMN].as_f64(), Some(-999.0));
        }
        assert_eq!(rows[0]["depth"], 5);
        assert_eq!(rows[1]["depth"], 30);
    }

    #[test]
    fn every_row_has_exactly_the_export_columns_in_order() {
        let (_dir, config) = setup(
            "2021-05-01T10:00:00Z,5,36.5,-122.0,250.3,1025.1,33.8,14.2,x\n\
             2021-05-02T10:00:00Z,15,36.6,-122.1,240.0,1025.6,33.7,12.9,y\n",
        );
        run_export(&config).unwrap();

        let keys = keys_in_file_order(&config.output);
        assert_eq!(keys.len(), 2);
        for row in keys {
            assert_eq!(row, EXPORT_COLUMNS);
        }
    }

    #[test]
    fn header_only_input_exports_empty_array() {
        let (_dir, config) = setup("");

        let summary = run_export(&config).unwrap();
        assert_eq!(summary.records_written, 0);
        assert_eq!(fs::read_to_string(&config.output).unwrap(), "[]");
    }

    #[test]
    fn rerun_is_byte_identical() {
        let (_dir, config) = setup(
            "2021-05-01 10:00:00,5,36.5,-122.0,250.3,1025.1,33.8,14.2,a\n\
             2021-05-01 11:00:00,10,36.5,-122.0,-999,1025.2,33.9,14.0,b\n",
        );

        run_export(&config).unwrap();
        let first = fs::read(&config.output).unwrap();
        run_export(&config).unwrap();
        let second = fs::read(&config.output).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_input_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::with_paths(
            dir.path().join("absent.csv"),
            dir.path().join("static_data.json"),
        );

        let err = run_export(&config).unwrap_err();
        assert!(matches!(err, ExportError::ReadInput { .. }));
        assert!(!config.output.exists());
    }

    #[test]
    fn missing_oxygen_column_names_filter_stage() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bottle.csv");
        fs::write(&input, "time,depth\n2021-05-01 10:00:00,5\n").unwrap();
        let config = ExportConfig::with_paths(input, dir.path().join("out.json"));

        let err = run_export(&config).unwrap_err();
        assert!(err.to_string().starts_with("filter:"), "{err}");
    }

    #[test]
    fn bad_time_in_dropped_row_is_ignored() {
        let (_dir, config) = setup(
            "not a time,10,36.5,-122.0,-999,1025.2,33.9,14.0,b\n\
             2021-05-01 10:00:00,5,36.5,-122.0,250.3,1025.1,33.8,14.2,a\n",
        );

        let summary = run_export(&config).unwrap();
        assert_eq!(summary.records_written, 1);
    }

    #[test]
    fn bad_time_in_kept_row_fails() {
        let (_dir, config) = setup("not a time,10,36.5,-122.0,250.0,1025.2,33.9,14.0,b\n");

        let err = run_export(&config).unwrap_err();
        assert!(matches!(err, ExportError::TimeParse { row: 0, .. }), "{err}");
        assert!(!config.output.exists());
    }
}
