mod app;
mod color;
mod data;
mod export;
mod state;
mod ui;

use app::SensorGraphApp;
use eframe::egui;

/// Window setup: opens maximized, falls back to 1400x850 when restored.
fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([700.0, 450.0])
            .with_maximized(true),
        ..Default::default()
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    eframe::run_native(
        "Sensor Graph",
        native_options(),
        Box::new(|_cc| Ok(Box::new(SensorGraphApp::default()))),
    )
}
