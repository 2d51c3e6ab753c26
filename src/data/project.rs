use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::model::{BottleTable, CellValue, Row};
use crate::error::ExportError;

/// Output layout for normalized timestamps: second precision, no offset.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Keep exactly `columns`, in that order, dropping everything else.
pub fn project_columns(table: BottleTable, columns: &[&str]) -> Result<BottleTable, ExportError> {
    let indices = columns
        .iter()
        .map(|name| {
            table
                .column_index(name)
                .ok_or_else(|| ExportError::MissingColumn {
                    stage: "project",
                    column: name.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rows = table
        .rows
        .into_iter()
        .map(|row| Row {
            values: indices.iter().map(|&i| row.values[i].clone()).collect(),
        })
        .collect();

    Ok(BottleTable::new(
        columns.iter().map(|c| c.to_string()).collect(),
        rows,
    ))
}

/// Rewrite every value of `column` as a `YYYY-MM-DDTHH:MM:SS` string.
pub fn normalize_time(mut table: BottleTable, column: &str) -> Result<BottleTable, ExportError> {
    let idx = table
        .column_index(column)
        .ok_or_else(|| ExportError::MissingColumn {
            stage: "normalize",
            column: column.to_string(),
        })?;

    for (row_no, row) in table.rows.iter_mut().enumerate() {
        let cell = &mut row.values[idx];
        let parsed = cell.as_str().and_then(parse_datetime);
        match parsed {
            Some(dt) => *cell = CellValue::Text(dt.format(TIME_FORMAT).to_string()),
            None => {
                return Err(ExportError::TimeParse {
                    row: row_no,
                    value: cell.to_string(),
                })
            }
        }
    }

    Ok(table)
}

/// Parse the timestamp layouts seen in bottle exports. Offsets are dropped
/// without conversion: the wall-clock components are kept as written.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    static FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
    ];
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
