//! Top-level entry point for running the viewer as a native window.

use eframe::egui;
use tracing::info;

use crate::data::simulation::SimulationRun;

use super::viewer::{DriftPlotApp, ViewerOptions};

/// Open the interactive viewer for `run`.
///
/// The initial window size follows the plot style unless `opts.native_options`
/// already sets one. Blocks until the window is closed.
pub fn run_viewer(run: SimulationRun, mut opts: ViewerOptions) -> eframe::Result<()> {
    let mut native = opts
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    if native.viewport.inner_size.is_none() {
        native.viewport = native.viewport.clone().with_inner_size(egui::vec2(
            opts.style.width_px as f32,
            opts.style.height_px as f32 + 120.0,
        ));
    }

    info!(samples = run.len(), title = %opts.title, "opening viewer");
    let app = DriftPlotApp::new(run, opts.style, opts.noise);
    eframe::run_native(
        &opts.title,
        native,
        Box::new(|cc| {
            // Phosphor icon font for the header buttons.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
