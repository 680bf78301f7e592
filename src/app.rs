use eframe::egui;

use crate::export::FileExportGateway;
use crate::state::AppState;
use crate::ui::{chart, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SensorGraphApp {
    pub state: AppState,
    gateway: FileExportGateway,
}

impl SensorGraphApp {
    /// Finish a pending "Save Graph" once the viewport screenshot arrives.
    fn handle_capture(&mut self, ctx: &egui::Context) {
        if !self.state.capture_pending {
            return;
        }
        let Some(screenshot) = ctx.input(|i| {
            i.events.iter().rev().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        }) else {
            // Keep repainting until the screenshot arrives or the wait times out.
            self.state.tick_capture();
            ctx.request_repaint();
            return;
        };

        let Some(rect) = self.state.chart.plot_rect() else {
            self.state.fail_capture("chart is not visible");
            return;
        };
        match chart::crop_capture(&screenshot, rect, ctx.pixels_per_point()) {
            Some(capture) => self.state.save_chart_image(&self.gateway, &capture),
            None => self.state.fail_capture("could not capture chart area"),
        }
    }
}

impl eframe::App for SensorGraphApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_capture(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &self.gateway);
        });

        // ---- Right side panel: data table ----
        if self.state.show_data {
            egui::SidePanel::right("data_panel")
                .default_width(420.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::data_panel(ui, &self.state);
                });
        }

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            self.state.chart.resize(ui.available_size());
            self.state.chart.show(ui);
        });
    }
}
