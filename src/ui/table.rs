use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{CellValue, ExportRow, SensorRecord};

pub const TABLE_HEADERS: [&str; 4] = ["Time [m]", "Temp1", "Temp3", "Chamber Temperature"];

// ---------------------------------------------------------------------------
// Data table
// ---------------------------------------------------------------------------

/// The rendered table. Holds the cell text exactly as displayed, which is
/// also what gets exported.
#[derive(Debug, Default)]
pub struct TableView {
    rows: Vec<[String; 4]>,
}

impl TableView {
    /// Replace every row with the given records. Current is charted but
    /// not shown here.
    pub fn render(&mut self, records: &[SensorRecord]) {
        self.rows = records
            .iter()
            .map(|r| {
                [
                    CellValue(r.time).to_string(),
                    CellValue(r.temp1).to_string(),
                    CellValue(r.temp3).to_string(),
                    CellValue(r.chamber_temp).to_string(),
                ]
            })
            .collect();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Read the displayed rows back for the spreadsheet export.
    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.rows
            .iter()
            .map(|[time, temp1, temp3, chamber]| ExportRow {
                time: time.clone(),
                temp1: temp1.clone(),
                temp3: temp3.clone(),
                chamber_temp: chamber.clone(),
            })
            .collect()
    }

    pub fn show(&self, ui: &mut Ui) {
        if self.is_empty() {
            ui.label("No data loaded.");
            return;
        }

        let row_height = egui::TextStyle::Body.resolve(ui.style()).size + 6.0;
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(60.0), 3)
            .column(Column::remainder())
            .header(row_height + 2.0, |mut header| {
                for title in TABLE_HEADERS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, self.rows.len(), |mut row| {
                    let cells = &self.rows[row.index()];
                    for text in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(text);
                        });
                    }
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time: f64, temp1: f64, chamber: f64) -> SensorRecord {
        SensorRecord {
            time,
            temp1,
            temp3: 30.0,
            current: 250.0,
            chamber_temp: chamber,
        }
    }

    #[test]
    fn render_replaces_previous_rows() {
        let mut table = TableView::default();
        table.render(&[record(0.0, 1.0, 2.0), record(1.0, 1.0, 2.0)]);
        assert_eq!(table.len(), 2);

        table.render(&[record(5.0, 1.0, 2.0)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.export_rows()[0].time, "5");

        table.render(&[]);
        assert!(table.is_empty());
    }

    #[test]
    fn export_rows_match_displayed_text() {
        let mut table = TableView::default();
        let records = [record(0.5, 21.25, 40.0), record(1.0, -0.0, 39.5)];
        table.render(&records);

        let rows = table.export_rows();
        assert_eq!(rows.len(), records.len());
        assert_eq!(
            rows[0],
            ExportRow {
                time: "0.5".into(),
                temp1: "21.25".into(),
                temp3: "30".into(),
                chamber_temp: "40".into(),
            }
        );
        assert_eq!(rows[1].temp1, "0");
        assert_eq!(rows[1].chamber_temp, "39.5");
    }
}
