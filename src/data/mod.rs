/// Data layer: record parsing, series derivation, file loading.
///
/// Architecture:
/// ```text
///  sensor .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file → text
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  parser   │  text → Vec<SensorRecord> (bad rows dropped)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  series   │  records → DerivedSeries (chart input)
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod parser;
pub mod series;
