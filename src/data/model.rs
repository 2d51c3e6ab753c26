use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the bottle table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common dataframe dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl CellValue {
    /// Interpret the value as an `f64`; only numeric cells qualify.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

// serde_json writes non-finite floats as `null`, which keeps the output valid JSON.
impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Float(v) => serializer.serialize_f64(*v),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Null => serializer.serialize_unit(),
        }
    }
}

// ---------------------------------------------------------------------------
// Row – one bottle sample
// ---------------------------------------------------------------------------

/// One sample (one line of the source file). Values are positional and line
/// up with [`BottleTable::column_names`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<CellValue>,
}

// ---------------------------------------------------------------------------
// BottleTable – the in-memory dataset
// ---------------------------------------------------------------------------

/// Row-oriented table. Row order is the source file order and is never
/// re-sorted by any stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BottleTable {
    /// Ordered column names, as in the header row.
    pub column_names: Vec<String>,
    /// All rows; every row has `column_names.len()` values.
    pub rows: Vec<Row>,
}

impl BottleTable {
    pub fn new(column_names: Vec<String>, rows: Vec<Row>) -> Self {
        BottleTable { column_names, rows }
    }

    /// Position of a column by exact (case-sensitive) name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == name)
    }

    /// Value of `column` in row `row`, if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.values.get(idx))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow every row as an ordered name → value record.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |row| Record {
            columns: &self.column_names,
            values: &row.values,
        })
    }
}

/// A row-object view: serializes as a JSON object whose keys follow the
/// table's column order.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [CellValue],
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in self.columns.iter().zip(self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
