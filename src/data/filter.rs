use super::model::{BottleTable, CellValue};
use crate::error::ExportError;

/// True when the cell holds exactly `sentinel`. Only numeric cells can match,
/// with no tolerance: `-999.0000001` is kept.
pub fn is_sentinel(value: &CellValue, sentinel: f64) -> bool {
    value.as_f64() == Some(sentinel)
}

/// Drop every row whose `column` value equals the sentinel marker.
///
/// Remaining rows are untouched and keep their source order.
pub fn drop_sentinel_rows(
    table: BottleTable,
    column: &str,
    sentinel: f64,
) -> Result<BottleTable, ExportError> {
    let idx = table
        .column_index(column)
        .ok_or_else(|| ExportError::MissingColumn {
            stage: "filter",
            column: column.to_string(),
        })?;

    let before = table.len();
    let BottleTable { column_names, rows } = table;
    let rows: Vec<_> = rows
        .into_iter()
        .filter(|row| !row.values.get(idx).is_some_and(|v| is_sentinel(v, sentinel)))
        .collect();

    log::info!(
        "filter: dropped {} of {} rows with {column} == {sentinel}",
        before - rows.len(),
        before
    );

    Ok(BottleTable::new(column_names, rows))
}
