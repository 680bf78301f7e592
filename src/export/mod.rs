//! File export boundary: pick a destination, then write a chart image or
//! the table contents there.
//!
//! Cancelling the picker is a normal outcome ([`SaveOutcome::Cancelled`]),
//! only a failed write is an [`ExportError`].

pub mod jpeg;
pub mod workbook;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::data::model::ExportRow;

// ---------------------------------------------------------------------------
// Outcome / error types
// ---------------------------------------------------------------------------

/// Result of a save or export the user did not abort with an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Cancelled,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode chart image: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to write workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

// ---------------------------------------------------------------------------
// Destination picking
// ---------------------------------------------------------------------------

/// What is being written; decides the file filter and suggested name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    ChartImage,
    TableData,
}

impl ExportTarget {
    pub fn filter_name(self) -> &'static str {
        match self {
            ExportTarget::ChartImage => "JPEG",
            ExportTarget::TableData => "Excel",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportTarget::ChartImage => "jpeg",
            ExportTarget::TableData => "xlsx",
        }
    }

    pub fn suggested_file_name(self) -> String {
        let stem = match self {
            ExportTarget::ChartImage => "graph",
            ExportTarget::TableData => "graph_data",
        };
        format!("{stem}.{}", self.extension())
    }
}

/// Asks the user where to write. `None` means the user cancelled.
pub trait DestinationPicker {
    fn pick(&self, target: ExportTarget) -> Option<PathBuf>;
}

/// Native save-file dialog.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeDialog;

impl DestinationPicker for NativeDialog {
    fn pick(&self, target: ExportTarget) -> Option<PathBuf> {
        let title = match target {
            ExportTarget::ChartImage => "Save graph",
            ExportTarget::TableData => "Export data",
        };
        rfd::FileDialog::new()
            .set_title(title)
            .add_filter(target.filter_name(), &[target.extension()])
            .set_file_name(target.suggested_file_name())
            .save_file()
    }
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

/// Writes export payloads to a user-chosen path.
pub struct FileExportGateway<P: DestinationPicker = NativeDialog> {
    picker: P,
}

impl Default for FileExportGateway<NativeDialog> {
    fn default() -> Self {
        Self::new(NativeDialog)
    }
}

impl<P: DestinationPicker> FileExportGateway<P> {
    pub fn new(picker: P) -> Self {
        Self { picker }
    }

    /// Save already-encoded JPEG bytes.
    pub fn save_image(&self, jpeg_bytes: &[u8]) -> Result<SaveOutcome, ExportError> {
        let Some(path) = self.picker.pick(ExportTarget::ChartImage) else {
            return Ok(SaveOutcome::Cancelled);
        };
        std::fs::write(&path, jpeg_bytes).map_err(|source| io_error(&path, source))?;
        log::info!("Saved graph image ({} bytes) to {}", jpeg_bytes.len(), path.display());
        Ok(SaveOutcome::Saved(path))
    }

    /// Write the table rows to an `.xlsx` workbook.
    pub fn export_table(&self, rows: &[ExportRow]) -> Result<SaveOutcome, ExportError> {
        let Some(path) = self.picker.pick(ExportTarget::TableData) else {
            return Ok(SaveOutcome::Cancelled);
        };
        workbook::write_workbook(rows, &path)?;
        log::info!("Exported {} rows to {}", rows.len(), path.display());
        Ok(SaveOutcome::Saved(path))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}
