//! Interactive viewer for a [`SimulationRun`].
//!
//! [`DriftPlotApp`] implements [`eframe::App`]: a header with the run summary
//! and action buttons, and the velocity/position plots below it.

use eframe::egui;
use egui_phosphor::regular::{ARROWS_CLOCKWISE, FLOPPY_DISK, IMAGE, TABLE};
use tracing::{info, warn};

use crate::data::export::save_run_csv;
use crate::data::noise::NoiseModel;
use crate::data::simulation::{RunSummary, SimulationRun};
use crate::error::Result;
use crate::render::{save_png, save_svg, PlotStyle};

/// Options for [`run_viewer`](super::run_viewer).
#[derive(Clone)]
pub struct ViewerOptions {
    /// Native window title.
    pub title: String,
    pub style: PlotStyle,
    /// Sensor model used when the user re-rolls the noise.
    pub noise: NoiseModel,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            title: "driftplot".to_string(),
            style: PlotStyle::default(),
            noise: NoiseModel::default(),
            native_options: None,
        }
    }
}

/// Standalone viewer window.
pub struct DriftPlotApp {
    pub(super) run: SimulationRun,
    pub(super) summary: RunSummary,
    pub(super) style: PlotStyle,
    noise: NoiseModel,
    /// Status line shown under the summary (last save / error).
    status: Option<String>,
    /// Font sizes and visuals are applied on the first frame.
    style_applied: bool,
}

impl DriftPlotApp {
    pub fn new(run: SimulationRun, style: PlotStyle, noise: NoiseModel) -> Self {
        let summary = run.summary();
        Self {
            run,
            summary,
            style,
            noise,
            status: None,
            style_applied: false,
        }
    }

    pub fn run(&self) -> &SimulationRun {
        &self.run
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Last status message (re-roll seed, saved file or error).
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Draw a new measurement with a random seed. The reference series are kept.
    pub fn reroll_noise(&mut self) -> Result<()> {
        let seed = rand::random::<u64>();
        let noise = NoiseModel {
            seed: Some(seed),
            ..self.noise.clone()
        };
        self.run = self.run.with_fresh_noise(&noise)?;
        self.summary = self.run.summary();
        info!(seed, error = self.summary.final_error, "re-rolled sensor noise");
        self.status = Some(format!("noise seed {seed}"));
        Ok(())
    }

    fn apply_style(&mut self, ctx: &egui::Context) {
        let bg = self.style.background;
        let luminance = 0.299 * bg[0] as f32 + 0.587 * bg[1] as f32 + 0.114 * bg[2] as f32;
        if luminance > 128.0 {
            ctx.set_visuals(egui::Visuals::light());
        } else {
            ctx.set_visuals(egui::Visuals::dark());
        }
        let size = self.style.font_size;
        ctx.style_mut(|s| {
            for (text_style, font_id) in s.text_styles.iter_mut() {
                font_id.size = match text_style {
                    egui::TextStyle::Heading => size * 1.4,
                    egui::TextStyle::Small => size * 0.75,
                    _ => size,
                };
            }
        });
        self.style_applied = true;
    }

    fn default_file_name(ext: &str) -> String {
        format!("driftplot_{}.{ext}", chrono::Local::now().format("%Y%m%d_%H%M%S"))
    }

    fn save_with_dialog(
        &mut self,
        label: &str,
        ext: &str,
        save: impl FnOnce(&std::path::Path, &SimulationRun, &PlotStyle) -> Result<()>,
    ) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(Self::default_file_name(ext))
            .add_filter(label, &[ext])
            .save_file()
        else {
            return;
        };
        match save(&path, &self.run, &self.style) {
            Ok(()) => self.status = Some(format!("saved {}", path.display())),
            Err(e) => {
                warn!(path = %path.display(), "failed to save {label}: {e}");
                self.status = Some(format!("failed to save {label}: {e}"));
            }
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.heading("Numerical integration of a noisy velocity signal");
        ui.label(self.summary.one_line());
        ui.horizontal(|ui| {
            ui.label(format!(
                "dt = {} s  ·  rule = {}  ·  σ = {} m/s{}",
                self.run.dt,
                self.run.rule,
                self.noise.std_dev,
                match self.noise.quantization {
                    Some(q) => format!("  ·  quantization = {q} m/s"),
                    None => String::new(),
                }
            ));
        });
        ui.horizontal(|ui| {
            if ui
                .button(format!("{ARROWS_CLOCKWISE} Re-roll noise"))
                .on_hover_text("Draw a new noisy measurement with a random seed")
                .clicked()
            {
                if let Err(e) = self.reroll_noise() {
                    warn!("failed to re-roll noise: {e}");
                    self.status = Some(e.to_string());
                }
            }
            if ui.button(format!("{IMAGE} Save PNG…")).clicked() {
                self.save_with_dialog("PNG", "png", |p, r, s| save_png(p, r, s));
            }
            if ui.button(format!("{FLOPPY_DISK} Save SVG…")).clicked() {
                self.save_with_dialog("SVG", "svg", |p, r, s| save_svg(p, r, s));
            }
            if ui.button(format!("{TABLE} Save CSV…")).clicked() {
                self.save_with_dialog("CSV", "csv", |p, r, _| save_run_csv(p, r));
            }
            if let Some(status) = &self.status {
                ui.separator();
                ui.weak(status.as_str());
            }
        });
    }
}

impl eframe::App for DriftPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.style_applied {
            self.apply_style(ctx);
        }

        egui::TopBottomPanel::top("driftplot_header").show(ctx, |ui| {
            self.render_header(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_plots(ui);
        });
    }
}
