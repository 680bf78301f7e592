use std::path::Path;

use anyhow::{Context, Result};

use super::model::SensorRecord;
use super::parser;

/// Load sensor records from a CSV file.
///
/// Only reading the file can fail; bad rows are dropped by the parser.
/// Invalid UTF-8 is replaced rather than rejected.
pub fn load_file(path: &Path) -> Result<Vec<SensorRecord>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("reading sensor file {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(parser::parse(&text))
}
