use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::data::model::SensorRecord;
use crate::data::{loader, series};
use crate::export::{jpeg, DestinationPicker, ExportError, FileExportGateway, SaveOutcome};
use crate::ui::chart::ChartRenderer;
use crate::ui::table::TableView;

/// Frames to wait for a requested screenshot before giving up.
pub const CAPTURE_TIMEOUT_FRAMES: u32 = 30;

// ---------------------------------------------------------------------------
// User-visible notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// File the current data came from.
    pub source: Option<PathBuf>,

    /// The single chart instance (replaced on each load).
    pub chart: ChartRenderer,

    /// Table contents as displayed; also the export source.
    pub table: TableView,

    /// Whether the data table panel is visible.
    pub show_data: bool,

    /// Status / error message shown in the top bar.
    pub notice: Option<Notice>,

    /// A chart screenshot has been requested and not yet handled.
    pub capture_pending: bool,

    /// Frames seen since the pending screenshot was requested.
    capture_wait: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            source: None,
            chart: ChartRenderer::default(),
            table: TableView::default(),
            show_data: true,
            notice: None,
            capture_pending: false,
            capture_wait: 0,
        }
    }
}

impl AppState {
    /// Read, parse and display a sensor file. A read failure keeps the
    /// current data and shows an error.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(records) => {
                log::info!("Loaded {} records from {}", records.len(), path.display());
                self.source = Some(path.to_path_buf());
                self.set_records(&records);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.notice = Some(Notice::Error(format!("Error: {e:#}")));
            }
        }
    }

    /// Rebuild table and chart from scratch.
    pub fn set_records(&mut self, records: &[SensorRecord]) {
        if self.capture_pending {
            log::warn!("Dropping pending graph capture, new data loaded");
            self.capture_pending = false;
        }
        self.table.render(records);

        let derived = series::build(records);
        if derived.is_empty() {
            log::error!("No data to process");
            self.notice = Some(Notice::Error("No valid data rows found".to_string()));
        } else {
            self.notice = None;
        }
        self.chart.render(derived);
    }

    /// Save and export are only offered once a chart is showing.
    pub fn can_export(&self) -> bool {
        self.chart.has_chart()
    }

    /// Show or hide the data panel. The chart picks up the new size on
    /// the next frame through [`ChartRenderer::resize`].
    pub fn toggle_data_panel(&mut self) {
        self.show_data = !self.show_data;
    }

    pub fn data_toggle_label(&self) -> &'static str {
        if self.show_data {
            "Hide Data"
        } else {
            "View Data"
        }
    }

    /// Mark a chart capture as requested. Returns `false` when one is
    /// already in flight or there is nothing to capture.
    pub fn begin_capture(&mut self) -> bool {
        if self.capture_pending || !self.can_export() {
            return false;
        }
        self.capture_pending = true;
        self.capture_wait = 0;
        true
    }

    /// Count a frame without the requested screenshot. Abandons the
    /// capture after [`CAPTURE_TIMEOUT_FRAMES`] so "Save Graph" works again.
    pub fn tick_capture(&mut self) {
        if !self.capture_pending {
            return;
        }
        self.capture_wait += 1;
        if self.capture_wait >= CAPTURE_TIMEOUT_FRAMES {
            self.fail_capture("screenshot was not delivered");
        }
    }

    /// Encode the captured chart and hand it to the gateway.
    pub fn save_chart_image<P: DestinationPicker>(
        &mut self,
        gateway: &FileExportGateway<P>,
        capture: &RgbaImage,
    ) {
        self.capture_pending = false;
        log::info!("Saving graph...");
        let result = jpeg::chart_jpeg(capture).and_then(|bytes| gateway.save_image(&bytes));
        self.report(result, "Graph saved to");
    }

    /// Export the displayed table rows.
    pub fn export_table<P: DestinationPicker>(&mut self, gateway: &FileExportGateway<P>) {
        if !self.can_export() {
            return;
        }
        let rows = self.table.export_rows();
        let result = gateway.export_table(&rows);
        self.report(result, "Data exported to");
    }

    /// Abandon a capture that could not be completed.
    pub fn fail_capture(&mut self, reason: &str) {
        self.capture_pending = false;
        log::error!("Error saving graph: {reason}");
        self.notice = Some(Notice::Error(format!("Error: {reason}")));
    }

    fn report(&mut self, result: Result<SaveOutcome, ExportError>, saved_prefix: &str) {
        match result {
            Ok(SaveOutcome::Saved(path)) => {
                self.notice = Some(Notice::Info(format!("{saved_prefix} {}", path.display())));
            }
            Ok(SaveOutcome::Cancelled) => {
                log::warn!("Save was cancelled");
            }
            Err(e) => {
                log::error!("{e}");
                self.notice = Some(Notice::Error(format!("Error: {e}")));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parser;
    use image::Rgba;

    fn loaded(csv: &str) -> AppState {
        let mut state = AppState::default();
        state.set_records(&parser::parse(csv));
        state
    }

    struct FixedPicker(Option<PathBuf>);

    impl DestinationPicker for FixedPicker {
        fn pick(&self, _target: crate::export::ExportTarget) -> Option<PathBuf> {
            self.0.clone()
        }
    }

    const CSV: &str = "time,t1,t2,t3,t4,t5,t6,t7,t8,current,volt,chamber\n\
                       0,20.5,x,21,x,x,x,x,x,35,x,40\n\
                       1,21,x,22,x,x,x,x,x,0.5,x,41\n\
                       2,bad,x,22,x,x,x,x,x,12,x,42\n";

    #[test]
    fn load_builds_table_and_chart() {
        let state = loaded(CSV);

        assert_eq!(state.table.len(), 2);
        assert!(state.can_export());
        let series = state.chart.handle().unwrap().series();
        assert_eq!(series.current, vec![3.0, 0.0]);
        assert_eq!(series.labels, vec![0.0, 1.0]);
    }

    #[test]
    fn header_only_input_disables_export() {
        let mut state = loaded(CSV);
        state.set_records(&parser::parse("time,t1,t2,t3\n"));

        assert!(state.table.is_empty());
        assert!(!state.can_export());
        assert!(matches!(state.notice, Some(Notice::Error(_))));
        assert!(!state.begin_capture());
    }

    #[test]
    fn export_round_trip_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.xlsx");
        let gateway = FileExportGateway::new(FixedPicker(Some(path.clone())));

        let mut state = loaded(CSV);
        state.export_table(&gateway);

        assert!(path.exists());
        assert_eq!(
            state.notice,
            Some(Notice::Info(format!("Data exported to {}", path.display())))
        );
    }

    #[test]
    fn exported_workbook_matches_table_cell_by_cell() {
        use crate::export::workbook::sheet_reader::read_cells;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.xlsx");
        let gateway = FileExportGateway::new(FixedPicker(Some(path.clone())));

        let mut state = loaded(CSV);
        state.export_table(&gateway);

        let cells = read_cells(&path);
        let headers = ["Time [m]", "Temp1", "Temp3", "Current (A)", "Chamber Temperature"];
        for (col, header) in ["A", "B", "C", "D", "E"].iter().zip(headers) {
            assert_eq!(cells[&format!("{col}1")], header);
        }

        let rows = state.table.export_rows();
        assert_eq!(rows.len(), 2);
        for (i, row) in rows.iter().enumerate() {
            let r = i + 2;
            assert_eq!(cells[&format!("A{r}")], row.time);
            assert_eq!(cells[&format!("B{r}")], row.temp1);
            assert_eq!(cells[&format!("C{r}")], row.temp3);
            assert_eq!(cells.get(&format!("D{r}")), None);
            assert_eq!(cells[&format!("E{r}")], row.chamber_temp);
        }
        assert!(!cells.keys().any(|k| k.ends_with('4')));
        assert_eq!(cells["B2"], "20.5");
        assert_eq!(cells["C2"], "21");
    }

    #[test]
    fn cancelled_export_is_not_an_error() {
        let gateway = FileExportGateway::new(FixedPicker(None));
        let mut state = loaded(CSV);
        state.export_table(&gateway);
        assert_eq!(state.notice, None);
    }

    #[test]
    fn export_without_chart_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.xlsx");
        let gateway = FileExportGateway::new(FixedPicker(Some(path.clone())));

        let mut state = AppState::default();
        state.export_table(&gateway);
        assert!(!path.exists());
    }

    #[test]
    fn chart_save_writes_jpeg_and_clears_pending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.jpeg");
        let gateway = FileExportGateway::new(FixedPicker(Some(path.clone())));

        let mut state = loaded(CSV);
        assert!(state.begin_capture());
        assert!(!state.begin_capture());

        let capture = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
        state.save_chart_image(&gateway, &capture);

        assert!(!state.capture_pending);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn failed_write_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("graph.jpeg");
        let gateway = FileExportGateway::new(FixedPicker(Some(path)));

        let mut state = loaded(CSV);
        state.begin_capture();
        state.save_chart_image(&gateway, &RgbaImage::new(4, 4));

        assert!(matches!(state.notice, Some(Notice::Error(_))));
    }

    #[test]
    fn reload_clears_pending_capture() {
        let mut state = loaded(CSV);
        assert!(state.begin_capture());

        state.set_records(&parser::parse(CSV));
        assert!(!state.capture_pending);
        assert!(state.begin_capture());
    }

    #[test]
    fn undelivered_screenshot_times_out() {
        let mut state = loaded(CSV);
        assert!(state.begin_capture());

        for _ in 1..CAPTURE_TIMEOUT_FRAMES {
            state.tick_capture();
        }
        assert!(state.capture_pending);

        state.tick_capture();
        assert!(!state.capture_pending);
        assert!(matches!(state.notice, Some(Notice::Error(_))));
        assert!(state.begin_capture());
    }

    #[test]
    fn toggling_data_panel_flips_label() {
        let mut state = AppState::default();
        assert_eq!(state.data_toggle_label(), "Hide Data");
        state.toggle_data_panel();
        assert!(!state.show_data);
        assert_eq!(state.data_toggle_label(), "View Data");
    }
}
