//! Plot rendering for [`DriftPlotApp`].
//!
//! Two stacked plots share a linked time axis: velocity (truth vs. sensor) on
//! top and position (truth vs. integrated) with the shaded error below.

use egui::Color32;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Polygon};

use super::DriftPlotApp;

const TIME_AXIS_GROUP: &str = "driftplot_time_axis";
const DASHED: LineStyle = LineStyle::Dashed { length: 8.0 };

pub(super) fn color(rgb: [u8; 3], alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(rgb[0], rgb[1], rgb[2], a)
}

/// Pair `xs` with `ys`, dropping non-finite points.
pub(super) fn points(xs: &[f64], ys: &[f64]) -> Vec<[f64; 2]> {
    xs.iter()
        .zip(ys)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| [x, y])
        .collect()
}

/// Convex pieces of the area between two curves sampled on the same grid.
///
/// Each step gives one quad, or two triangles meeting at the crossing point
/// when the curves swap order within the step.
pub(super) fn fill_between_polygons(xs: &[f64], upper: &[f64], lower: &[f64]) -> Vec<Vec<[f64; 2]>> {
    let n = xs.len().min(upper.len()).min(lower.len());
    let mut out = Vec::with_capacity(n.saturating_sub(1));
    for i in 1..n {
        let (x0, x1) = (xs[i - 1], xs[i]);
        let (u0, u1, l0, l1) = (upper[i - 1], upper[i], lower[i - 1], lower[i]);
        if ![x0, x1, u0, u1, l0, l1].iter().all(|v| v.is_finite()) {
            continue;
        }
        let (d0, d1) = (u0 - l0, u1 - l1);
        if d0 * d1 < 0.0 {
            let f = d0 / (d0 - d1);
            let xc = x0 + (x1 - x0) * f;
            let yc = l0 + (l1 - l0) * f;
            out.push(vec![[x0, u0], [xc, yc], [x0, l0]]);
            out.push(vec![[xc, yc], [x1, u1], [x1, l1]]);
        } else {
            out.push(vec![[x0, u0], [x1, u1], [x1, l1], [x0, l0]]);
        }
    }
    out
}

impl DriftPlotApp {
    pub(super) fn render_plots(&mut self, ui: &mut egui::Ui) {
        let spacing = ui.spacing().item_spacing.y;
        let plot_h = ((ui.available_height() - spacing) / 2.0).max(80.0);
        let style = &self.style;
        let run = &self.run;

        ui.label(egui::RichText::new(crate::render::svg::VELOCITY_TITLE).strong());
        Plot::new("velocity_plot")
            .height(plot_h - ui.spacing().interact_size.y)
            .legend(Legend::default())
            .link_axis(TIME_AXIS_GROUP, [true, false])
            .link_cursor(TIME_AXIS_GROUP, [true, false])
            .y_axis_label("Velocity (m/s)")
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new("True Velocity (Ideal)", points(&run.time, &run.true_velocity))
                        .color(color(style.true_color, 1.0))
                        .width(style.line_width)
                        .style(DASHED),
                );
                plot_ui.line(
                    Line::new(
                        "Sensor Reading (Noisy)",
                        points(&run.time, &run.measured_velocity),
                    )
                    .color(color(style.measured_color, style.noisy_alpha))
                    .width((style.line_width * 0.75).max(0.5)),
                );
            });

        ui.label(egui::RichText::new(crate::render::svg::POSITION_TITLE).strong());
        Plot::new("position_plot")
            .height(plot_h - ui.spacing().interact_size.y)
            .legend(Legend::default())
            .link_axis(TIME_AXIS_GROUP, [true, false])
            .link_cursor(TIME_AXIS_GROUP, [true, false])
            .x_axis_label("Time (s)")
            .y_axis_label("Position (m)")
            .show(ui, |plot_ui| {
                let fill = color(style.error_color, style.error_fill_alpha);
                for piece in fill_between_polygons(&run.time, &run.estimated_position, &run.true_position) {
                    plot_ui.polygon(
                        Polygon::new("Integration Error", PlotPoints::from(piece))
                            .fill_color(fill)
                            .stroke(egui::Stroke::NONE),
                    );
                }
                plot_ui.line(
                    Line::new("True Position", points(&run.time, &run.true_position))
                        .color(color(style.true_color, 1.0))
                        .width(style.line_width)
                        .style(DASHED),
                );
                plot_ui.line(
                    Line::new(
                        "Computed Position (Integration)",
                        points(&run.time, &run.estimated_position),
                    )
                    .color(color(style.estimated_color, 1.0))
                    .width(style.line_width),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// All turns go the same way (collinear points allowed).
    fn is_convex(poly: &[[f64; 2]]) -> bool {
        let n = poly.len();
        let mut sign = 0.0_f64;
        for i in 0..n {
            let [ax, ay] = poly[i];
            let [bx, by] = poly[(i + 1) % n];
            let [cx, cy] = poly[(i + 2) % n];
            let cross = (bx - ax) * (cy - by) - (by - ay) * (cx - bx);
            if cross.abs() < 1e-12 {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }

    #[test]
    fn one_quad_per_step_without_crossing() {
        let p = fill_between_polygons(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0]);
        assert_eq!(p.len(), 2);
        assert_eq!(p[1], vec![[1.0, 2.0], [2.0, 3.0], [2.0, 0.0], [1.0, 0.0]]);
    }

    #[test]
    fn crossing_step_splits_into_triangles() {
        let p = fill_between_polygons(&[0.0, 1.0], &[1.0, 0.0], &[0.0, 1.0]);
        assert_eq!(p.len(), 2);
        assert_eq!(p[0], vec![[0.0, 1.0], [0.5, 0.5], [0.0, 0.0]]);
        assert_eq!(p[1], vec![[0.5, 0.5], [1.0, 0.0], [1.0, 1.0]]);
        assert!(p.iter().all(|poly| is_convex(poly)));
    }

    #[test]
    fn noisy_error_fill_is_convex() {
        use crate::data::noise::NoiseModel;
        use crate::data::simulation::{Simulation, SimulationConfig};

        let run = Simulation::new(
            SimulationConfig::default(),
            NoiseModel { std_dev: 1.0, seed: Some(3), ..Default::default() },
        )
        .run()
        .unwrap();
        let p = fill_between_polygons(&run.time, &run.estimated_position, &run.true_position);
        assert!(p.len() >= run.len() - 1);
        for poly in &p {
            assert!(is_convex(poly), "non-convex piece {poly:?}");
        }
    }

    #[test]
    fn pieces_skip_non_finite_steps() {
        let p = fill_between_polygons(&[0.0, 1.0, 2.0], &[1.0, f64::NAN, 3.0], &[0.0, 0.0, 0.0]);
        assert!(p.is_empty());
    }

    #[test]
    fn color_scales_alpha() {
        assert_eq!(color([10, 20, 30], 1.0).a(), 255);
        assert_eq!(color([10, 20, 30], 2.0).a(), 255);
    }
}
