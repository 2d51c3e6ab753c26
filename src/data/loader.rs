use std::path::Path;

use csv::StringRecord;

use super::model::{BottleTable, CellValue, Row};
use crate::error::ExportError;

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: one header row with column names, then one sample per line.
/// Every column is kept; each gets a single inferred [`ColumnKind`].
pub fn load_csv(path: &Path) -> Result<BottleTable, ExportError> {
    // Short rows are padded with nulls below; long rows are rejected.
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| ExportError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
    let malformed = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let column_names: Vec<String> = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let records = reader
        .records()
        .collect::<Result<Vec<StringRecord>, _>>()
        .map_err(malformed)?;

    if let Some((row, record)) = records
        .iter()
        .enumerate()
        .find(|(_, r)| r.len() > column_names.len())
    {
        return Err(ExportError::ExtraFields {
            path: path.to_path_buf(),
            row,
            found: record.len(),
            expected: column_names.len(),
        });
    }

    let kinds: Vec<ColumnKind> = (0..column_names.len())
        .map(|col| infer_column_kind(records.iter().map(|r| r.get(col).unwrap_or(""))))
        .collect();

    let rows = records
        .iter()
        .map(|record| Row {
            values: kinds
                .iter()
                .enumerate()
                .map(|(col, kind)| kind.parse(record.get(col).unwrap_or("")))
                .collect(),
        })
        .collect::<Vec<_>>();

    log::debug!(
        "loaded {} rows x {} columns from {}",
        rows.len(),
        column_names.len(),
        path.display()
    );

    Ok(BottleTable::new(column_names, rows))
}

// ---------------------------------------------------------------------------
// Column type inference
// ---------------------------------------------------------------------------

/// Cell text read as a missing value, in addition to the empty string. Same
/// list a pandas `read_csv` treats as NaN by default.
pub const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// True for an empty cell or one of [`NA_TOKENS`] (after trimming).
pub fn is_missing(s: &str) -> bool {
    s.is_empty() || NA_TOKENS.contains(&s)
}

/// Dtype shared by every cell of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    fn parse(self, raw: &str) -> CellValue {
        let s = raw.trim();
        if is_missing(s) {
            return CellValue::Null;
        }
        // Inference guarantees the narrower parses succeed; fall back to text otherwise.
        match self {
            ColumnKind::Integer => s
                .parse::<i64>()
                .map(CellValue::Integer)
                .unwrap_or_else(|_| CellValue::Text(s.to_string())),
            ColumnKind::Float => s
                .parse::<f64>()
                .map(CellValue::Float)
                .unwrap_or_else(|_| CellValue::Text(s.to_string())),
            ColumnKind::Bool => parse_bool(s)
                .map(CellValue::Bool)
                .unwrap_or_else(|| CellValue::Text(s.to_string())),
            ColumnKind::Text => CellValue::Text(s.to_string()),
        }
    }
}

/// Pick the narrowest kind that every non-missing cell satisfies. An integer
/// column with gaps is promoted to float, since missing values are not
/// representable as integers.
pub(crate) fn infer_column_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;
    let mut has_empty = false;
    let mut has_value = false;

    for cell in cells {
        let s = cell.trim();
        if is_missing(s) {
            has_empty = true;
            continue;
        }
        has_value = true;
        if all_int && s.parse::<i64>().is_err() {
            all_int = false;
        }
        if all_float && s.parse::<f64>().is_err() {
            all_float = false;
        }
        if all_bool && parse_bool(s).is_none() {
            all_bool = false;
        }
        if !all_int && !all_float && !all_bool {
            return ColumnKind::Text;
        }
    }

    if !has_value {
        // Every cell is missing; they all become Null regardless.
        return ColumnKind::Float;
    }
    if all_int {
        if has_empty {
            ColumnKind::Float
        } else {
            ColumnKind::Integer
        }
    } else if all_float {
        ColumnKind::Float
    } else if all_bool {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}
