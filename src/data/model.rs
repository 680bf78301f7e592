use std::fmt;

// ---------------------------------------------------------------------------
// Source layout
// ---------------------------------------------------------------------------

/// Minimum number of comma-separated fields a data row must have.
pub const MIN_FIELDS: usize = 12;

/// 0-based field positions inside a data row.
pub const TIME_COL: usize = 0;
pub const TEMP1_COL: usize = 1;
pub const TEMP3_COL: usize = 3;
pub const CURRENT_COL: usize = 9;
pub const CHAMBER_COL: usize = 11;

// ---------------------------------------------------------------------------
// SensorRecord – one retained CSV data row
// ---------------------------------------------------------------------------

/// One parsed data row. Every field is finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorRecord {
    /// Elapsed time in minutes.
    pub time: f64,
    pub temp1: f64,
    pub temp3: f64,
    /// Raw current reading, scaled only when building the chart series.
    pub current: f64,
    pub chamber_temp: f64,
}

// ---------------------------------------------------------------------------
// DerivedSeries – chart input, index-aligned with the records
// ---------------------------------------------------------------------------

/// Per-channel sequences derived from the records.
///
/// All five vectors have the same length and index `i` always refers to
/// the same record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedSeries {
    pub labels: Vec<f64>,
    pub temp1: Vec<f64>,
    pub temp3: Vec<f64>,
    pub current: Vec<f64>,
    pub chamber: Vec<f64>,
}

impl DerivedSeries {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there is anything to plot.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ExportRow – table text read back for the spreadsheet
// ---------------------------------------------------------------------------

/// A table row as displayed. Current is not part of the table, so the
/// matching spreadsheet column stays blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub time: String,
    pub temp1: String,
    pub temp3: String,
    pub chamber_temp: String,
}

/// Spreadsheet columns in output order: (header, width).
pub const EXPORT_COLUMNS: [(&str, f64); 5] = [
    ("Time [m]", 10.0),
    ("Temp1", 10.0),
    ("Temp3", 10.0),
    ("Current (A)", 10.0),
    ("Chamber Temperature", 15.0),
];

/// Worksheet name used for the table export.
pub const EXPORT_SHEET: &str = "Graph Data";

// ---------------------------------------------------------------------------
// Cell text
// ---------------------------------------------------------------------------

/// Display wrapper used for table cells: shortest decimal form, `-0` shown as `0`.
pub struct CellValue(pub f64);

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            write!(f, "0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
