use eframe::egui::{self, Color32, ColorImage, Rect, Ui, Vec2};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};
use image::RgbaImage;

use crate::color::Channel;
use crate::data::model::DerivedSeries;

/// Wheel delta (points) → zoom exponent.
const WHEEL_ZOOM_SPEED: f32 = 0.002;
const POINT_RADIUS: f32 = 3.0;

// ---------------------------------------------------------------------------
// Chart lifecycle
// ---------------------------------------------------------------------------

/// One chart instance. A new handle (with a fresh plot id) is created for
/// every load, so pan/zoom state never carries over between files.
#[derive(Debug)]
pub struct ChartHandle {
    id: u64,
    series: DerivedSeries,
    canvas_size: Vec2,
    plot_rect: Option<Rect>,
}

impl ChartHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn series(&self) -> &DerivedSeries {
        &self.series
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }
}

/// Owns the single current chart: none → active → destroyed → active …
#[derive(Debug, Default)]
pub struct ChartRenderer {
    handle: Option<ChartHandle>,
    created: u64,
    canvas_size: Vec2,
}

impl ChartRenderer {
    /// Destroy the current chart (if any) and create a new one.
    ///
    /// Empty series leave the renderer without a chart and return `None`.
    pub fn render(&mut self, series: DerivedSeries) -> Option<&ChartHandle> {
        self.clear();
        if series.is_empty() {
            return None;
        }

        self.created += 1;
        log::debug!("Creating chart #{} with {} samples", self.created, series.len());
        let handle = self.handle.insert(ChartHandle {
            id: self.created,
            series,
            canvas_size: self.canvas_size,
            plot_rect: None,
        });
        Some(&*handle)
    }

    /// Destroy the current chart.
    pub fn clear(&mut self) {
        if let Some(old) = self.handle.take() {
            log::debug!("Destroying chart #{}", old.id);
        }
    }

    /// Whether a chart with data is showing (save / export are allowed).
    pub fn has_chart(&self) -> bool {
        self.handle.is_some()
    }

    #[cfg(test)]
    pub fn handle(&self) -> Option<&ChartHandle> {
        self.handle.as_ref()
    }

    /// Recalculate the canvas size after a layout change. Keeps the chart
    /// and its view; returns whether the size actually changed.
    pub fn resize(&mut self, size: Vec2) -> bool {
        if (self.canvas_size - size).length() < 0.5 {
            return false;
        }
        log::debug!("Resizing chart canvas to {:.0}x{:.0}", size.x, size.y);
        self.canvas_size = size;
        if let Some(handle) = &mut self.handle {
            handle.canvas_size = size;
        }
        true
    }

    /// Screen rectangle of the plot from the last frame.
    pub fn plot_rect(&self) -> Option<Rect> {
        self.handle.as_ref().and_then(|h| h.plot_rect)
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    /// Draw the chart, or a hint when nothing is loaded.
    pub fn show(&mut self, ui: &mut Ui) {
        let Some(handle) = self.handle.as_mut() else {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a sensor CSV to plot it  (File → Open…)");
            });
            return;
        };

        let series = handle.series();
        let size = handle.canvas_size();
        let response = Plot::new(("sensor_chart", handle.id()))
            .legend(Legend::default())
            .x_axis_label("Time [m]")
            .y_axis_label("Temperature")
            .width(size.x)
            .height(size.y)
            .show_grid(true)
            .allow_boxed_zoom(false)
            .allow_drag([true, false])
            .allow_zoom([true, false])
            .allow_scroll(false)
            .allow_double_click_reset(true)
            .show(ui, |plot_ui| {
                for channel in Channel::ALL {
                    let points: Vec<[f64; 2]> = series
                        .labels
                        .iter()
                        .zip(channel_values(series, channel))
                        .map(|(&t, &v)| [t, v])
                        .collect();
                    plot_ui.line(
                        Line::new(PlotPoints::from(points.clone()))
                            .name(channel.label())
                            .color(channel.color())
                            .width(1.5),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from(points))
                            .name(channel.label())
                            .color(channel.color())
                            .shape(MarkerShape::Circle)
                            .radius(POINT_RADIUS)
                            .filled(true),
                    );
                }

                // Mouse wheel zooms the time axis only.
                if plot_ui.response().hovered() {
                    let scroll = plot_ui.ctx().input(|i| i.smooth_scroll_delta.y);
                    if scroll != 0.0 {
                        let factor = (scroll * WHEEL_ZOOM_SPEED).exp();
                        plot_ui.zoom_bounds_around_hovered(Vec2::new(factor, 1.0));
                    }
                }
            });

        handle.plot_rect = Some(response.response.rect);
    }
}

fn channel_values(series: &DerivedSeries, channel: Channel) -> &[f64] {
    match channel {
        Channel::Temp1 => &series.temp1,
        Channel::Temp3 => &series.temp3,
        Channel::Current => &series.current,
        Channel::Chamber => &series.chamber,
    }
}

// ---------------------------------------------------------------------------
// Capture
// ---------------------------------------------------------------------------

/// Cut the plot area out of a viewport screenshot.
pub fn crop_capture(screenshot: &ColorImage, rect: Rect, pixels_per_point: f32) -> Option<RgbaImage> {
    let [w, h] = screenshot.size;
    let bounds = Rect::from_min_size(
        egui::Pos2::ZERO,
        Vec2::new(w as f32, h as f32) / pixels_per_point,
    );
    let rect = rect.intersect(bounds);
    if rect.width() < 1.0 || rect.height() < 1.0 {
        return None;
    }
    let region = screenshot.region(&rect, Some(pixels_per_point));
    let [w, h] = region.size;
    let raw: Vec<u8> = region
        .pixels
        .iter()
        .flat_map(|p: &Color32| p.to_srgba_unmultiplied())
        .collect();
    RgbaImage::from_raw(w as u32, h as u32, raw)
}

/// Ask egui for a screenshot of the viewport; it arrives as an input event.
pub fn request_capture(ctx: &egui::Context) {
    ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> DerivedSeries {
        let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
        DerivedSeries {
            labels: values.clone(),
            temp1: values.clone(),
            temp3: values.clone(),
            current: values.clone(),
            chamber: values,
        }
    }

    #[test]
    fn empty_series_creates_no_chart() {
        let mut chart = ChartRenderer::default();
        assert!(chart.render(series(0)).is_none());
        assert!(!chart.has_chart());
    }

    #[test]
    fn each_render_replaces_the_chart() {
        let mut chart = ChartRenderer::default();
        let first = chart.render(series(3)).map(|h| h.id());
        let second = chart.render(series(5)).map(|h| h.id());
        assert_eq!(first, Some(1));
        assert_eq!(second, Some(2));
        assert_eq!(chart.handle().map(|h| h.series().len()), Some(5));
    }

    #[test]
    fn empty_load_destroys_previous_chart() {
        let mut chart = ChartRenderer::default();
        chart.render(series(3));
        assert!(chart.has_chart());
        chart.render(series(0));
        assert!(!chart.has_chart());
        assert!(chart.plot_rect().is_none());
    }

    #[test]
    fn resize_keeps_chart() {
        let mut chart = ChartRenderer::default();
        chart.render(series(2));
        assert!(chart.resize(Vec2::new(800.0, 600.0)));
        assert!(!chart.resize(Vec2::new(800.0, 600.0)));
        let handle = chart.handle().unwrap();
        assert_eq!(handle.id(), 1);
        assert_eq!(handle.canvas_size(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn new_chart_inherits_current_canvas_size() {
        let mut chart = ChartRenderer::default();
        chart.resize(Vec2::new(640.0, 480.0));
        let size = chart.render(series(1)).map(|h| h.canvas_size());
        assert_eq!(size, Some(Vec2::new(640.0, 480.0)));
    }

    #[test]
    fn crop_takes_plot_region() {
        let mut screenshot = ColorImage::new([10, 10], Color32::WHITE);
        screenshot.pixels[2 * 10 + 3] = Color32::RED;
        let rect = Rect::from_min_max(egui::pos2(3.0, 2.0), egui::pos2(7.0, 5.0));

        let img = crop_capture(&screenshot, rect, 1.0).unwrap();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);
    }
}
