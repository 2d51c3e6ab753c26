/// Data layer: core types and the four export stages.
///
/// Architecture:
/// ```text
///  bottle.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → BottleTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  drop rows carrying the oxygen sentinel
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  project  │  keep fixed columns, normalize time
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  row-objects → pretty JSON array
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod project;
