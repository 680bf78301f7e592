use eframe::egui::{self, Color32, RichText, Ui};

use crate::export::FileExportGateway;
use crate::state::{AppState, Notice};
use crate::ui::chart;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, gateway: &FileExportGateway) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let enabled = state.can_export();
        if ui
            .add_enabled(enabled, egui::Button::new("Save Graph"))
            .on_disabled_hover_text("Load a file with data first")
            .clicked()
            && state.begin_capture()
        {
            chart::request_capture(ui.ctx());
        }
        if ui
            .add_enabled(enabled, egui::Button::new("Export to Excel"))
            .on_disabled_hover_text("Load a file with data first")
            .clicked()
        {
            state.export_table(gateway);
        }

        if ui.button(state.data_toggle_label()).clicked() {
            state.toggle_data_panel();
        }

        ui.separator();

        if let Some(path) = &state.source {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!("{} records loaded from {name}", state.table.len()));
        }

        match &state.notice {
            Some(Notice::Info(msg)) => {
                ui.label(RichText::new(msg).color(Color32::DARK_GREEN));
            }
            Some(Notice::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Right side panel – data table
// ---------------------------------------------------------------------------

pub fn data_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Data");
    ui.separator();
    state.table.show(ui);
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sensor data")
        .add_filter("CSV", &["csv"])
        .add_filter("Text", &["txt"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
