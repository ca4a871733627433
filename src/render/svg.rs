//! Static SVG rendering of a [`SimulationRun`].
//!
//! The figure has two panels sharing the time axis:
//! - top: true velocity (dashed) and the noisy sensor reading
//! - bottom: true position (dashed), computed position and the shaded
//!   integration error between them
//!
//! The output is a self-contained SVG document that can be written as-is or
//! rasterized with [`super::raster`].

use super::style::{hex, PlotStyle};
use crate::data::simulation::SimulationRun;

pub const VELOCITY_TITLE: &str = "Input: Velocity Data (Derivative)";
pub const POSITION_TITLE: &str = "Output: Position (Integral)";

const FONT_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 24.0;
const DASH: &str = "8 5";

/// One drawable series in a panel.
enum Series<'a> {
    Line {
        label: &'a str,
        ys: &'a [f64],
        color: [u8; 3],
        width: f32,
        opacity: f32,
        dashed: bool,
    },
    FillBetween {
        label: &'a str,
        upper: &'a [f64],
        lower: &'a [f64],
        color: [u8; 3],
        opacity: f32,
    },
}

impl Series<'_> {
    fn values(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self {
            Series::Line { ys, .. } => Box::new(ys.iter().copied()),
            Series::FillBetween { upper, lower, .. } => {
                Box::new(upper.iter().chain(lower.iter()).copied())
            }
        }
    }
}

struct Panel<'a> {
    title: &'a str,
    y_label: &'a str,
    x_label: Option<&'a str>,
    series: Vec<Series<'a>>,
}

/// Screen rectangle of a plot area.
#[derive(Clone, Copy)]
struct Frame {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

/// Linear data→screen mapping for one panel.
struct Mapping {
    frame: Frame,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl Mapping {
    fn sx(&self, x: f64) -> f64 {
        let (lo, hi) = self.x_range;
        self.frame.x0 + (x - lo) / (hi - lo) * (self.frame.x1 - self.frame.x0)
    }
    fn sy(&self, y: f64) -> f64 {
        let (lo, hi) = self.y_range;
        self.frame.y1 - (y - lo) / (hi - lo) * (self.frame.y1 - self.frame.y0)
    }
}

/// Render both panels of `run` as an SVG document.
pub fn render_svg(run: &SimulationRun, style: &PlotStyle) -> String {
    let w = style.width_px.max(200) as f64;
    let h = style.height_px.max(200) as f64;
    let font = style.font_size as f64;

    let panels = [
        Panel {
            title: VELOCITY_TITLE,
            y_label: "Velocity (m/s)",
            x_label: None,
            series: vec![
                Series::Line {
                    label: "True Velocity (Ideal)",
                    ys: &run.true_velocity,
                    color: style.true_color,
                    width: style.line_width,
                    opacity: 1.0,
                    dashed: true,
                },
                Series::Line {
                    label: "Sensor Reading (Noisy)",
                    ys: &run.measured_velocity,
                    color: style.measured_color,
                    width: (style.line_width * 0.75).max(0.5),
                    opacity: style.noisy_alpha,
                    dashed: false,
                },
            ],
        },
        Panel {
            title: POSITION_TITLE,
            y_label: "Position (m)",
            x_label: Some("Time (s)"),
            series: vec![
                Series::FillBetween {
                    label: "Integration Error",
                    upper: &run.estimated_position,
                    lower: &run.true_position,
                    color: style.error_color,
                    opacity: style.error_fill_alpha,
                },
                Series::Line {
                    label: "True Position",
                    ys: &run.true_position,
                    color: style.true_color,
                    width: style.line_width,
                    opacity: 1.0,
                    dashed: true,
                },
                Series::Line {
                    label: "Computed Position (Integration)",
                    ys: &run.estimated_position,
                    color: style.estimated_color,
                    width: style.line_width,
                    opacity: 1.0,
                    dashed: false,
                },
            ],
        },
    ];

    let x_range = padded_range(run.time.iter().copied(), 0.0);

    let mut svg = String::with_capacity(16 * 1024 + run.len() * 64);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{FONT_FAMILY}" font-size="{font}">"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
        hex(style.background)
    ));
    svg.push('\n');

    let panel_h = h / panels.len() as f64;
    for (idx, panel) in panels.iter().enumerate() {
        let top = idx as f64 * panel_h;
        let bottom_band = if panel.x_label.is_some() { font * 3.6 } else { font * 2.2 };
        let frame = Frame {
            x0: MARGIN_LEFT,
            y0: top + style.title_size() as f64 * 2.2,
            x1: w - MARGIN_RIGHT,
            y1: top + panel_h - bottom_band,
        };
        let y_range = padded_range(panel.series.iter().flat_map(|s| s.values()), 0.05);
        let map = Mapping { frame, x_range, y_range };
        render_panel(&mut svg, idx, panel, &map, &run.time, style);
    }

    svg.push_str("</svg>\n");
    svg
}

fn render_panel(
    svg: &mut String,
    idx: usize,
    panel: &Panel<'_>,
    map: &Mapping,
    time: &[f64],
    style: &PlotStyle,
) {
    let f = map.frame;
    let fg = hex(style.foreground);
    let font = style.font_size as f64;
    let clip_id = format!("plot-area-{idx}");

    svg.push_str(&format!(
        r#"<clipPath id="{clip_id}"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath>"#,
        f.x0,
        f.y0,
        f.x1 - f.x0,
        f.y1 - f.y0
    ));
    svg.push('\n');

    // Title
    svg.push_str(&format!(
        r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" text-anchor="middle" fill="{fg}">{}</text>"#,
        (f.x0 + f.x1) / 2.0,
        f.y0 - style.title_size() as f64 * 0.7,
        style.title_size(),
        escape_xml(panel.title)
    ));
    svg.push('\n');

    // Grid and tick labels
    let grid = format!(
        r#"stroke="{fg}" stroke-opacity="{:.3}" stroke-width="1""#,
        style.grid_alpha
    );
    let x_ticks = nice_ticks(map.x_range.0, map.x_range.1, 10);
    let x_step = tick_step(&x_ticks);
    for &t in &x_ticks {
        let x = map.sx(t);
        svg.push_str(&format!(
            r#"<line x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}" {grid}/>"#,
            f.y0, f.y1
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{:.2}" text-anchor="middle" fill="{fg}">{}</text>"#,
            f.y1 + font * 1.3,
            format_tick(t, x_step)
        ));
        svg.push('\n');
    }
    let y_ticks = nice_ticks(map.y_range.0, map.y_range.1, 6);
    let y_step = tick_step(&y_ticks);
    for &v in &y_ticks {
        let y = map.sy(v);
        svg.push_str(&format!(
            r#"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" {grid}/>"#,
            f.x0, f.x1
        ));
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end" fill="{fg}">{}</text>"#,
            f.x0 - 6.0,
            y + font * 0.35,
            format_tick(v, y_step)
        ));
        svg.push('\n');
    }

    // Axis labels
    let yl_x = 20.0;
    let yl_y = (f.y0 + f.y1) / 2.0;
    svg.push_str(&format!(
        r#"<text x="{yl_x:.2}" y="{yl_y:.2}" text-anchor="middle" fill="{fg}" transform="rotate(-90 {yl_x:.2} {yl_y:.2})">{}</text>"#,
        escape_xml(panel.y_label)
    ));
    svg.push('\n');
    if let Some(xl) = panel.x_label {
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" fill="{fg}">{}</text>"#,
            (f.x0 + f.x1) / 2.0,
            f.y1 + font * 2.9,
            escape_xml(xl)
        ));
        svg.push('\n');
    }

    // Data
    svg.push_str(&format!(r#"<g clip-path="url(#{clip_id})">"#));
    svg.push('\n');
    for s in &panel.series {
        match s {
            Series::Line { ys, color, width, opacity, dashed, .. } => {
                let points = polyline_points(map, time, ys);
                if points.is_empty() {
                    continue;
                }
                let dash = if *dashed {
                    format!(r#" stroke-dasharray="{DASH}""#)
                } else {
                    String::new()
                };
                svg.push_str(&format!(
                    r#"<polyline points="{points}" fill="none" stroke="{}" stroke-width="{width:.2}" stroke-opacity="{opacity:.3}" stroke-linejoin="round"{dash}/>"#,
                    hex(*color)
                ));
                svg.push('\n');
            }
            Series::FillBetween { upper, lower, color, opacity, .. } => {
                let fwd = polyline_points(map, time, upper);
                let back: Vec<String> = time
                    .iter()
                    .zip(lower.iter())
                    .rev()
                    .filter(|(t, v)| t.is_finite() && v.is_finite())
                    .map(|(&t, &v)| format!("{:.2},{:.2}", map.sx(t), map.sy(v)))
                    .collect();
                if fwd.is_empty() || back.is_empty() {
                    continue;
                }
                svg.push_str(&format!(
                    r#"<polygon points="{fwd} {}" fill="{}" fill-opacity="{opacity:.3}" stroke="none"/>"#,
                    back.join(" "),
                    hex(*color)
                ));
                svg.push('\n');
            }
        }
    }
    svg.push_str("</g>\n");

    // Frame
    svg.push_str(&format!(
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="{fg}" stroke-width="1"/>"#,
        f.x0,
        f.y0,
        f.x1 - f.x0,
        f.y1 - f.y0
    ));
    svg.push('\n');

    render_legend(svg, panel, map, style);
}

fn render_legend(svg: &mut String, panel: &Panel<'_>, map: &Mapping, style: &PlotStyle) {
    let font = style.font_size as f64;
    let row_h = font * 1.5;
    let swatch = font * 2.0;
    let longest = panel
        .series
        .iter()
        .map(|s| match s {
            Series::Line { label, .. } | Series::FillBetween { label, .. } => label.chars().count(),
        })
        .max()
        .unwrap_or(0) as f64;
    let box_w = swatch + 18.0 + longest * font * 0.6;
    let box_h = row_h * panel.series.len() as f64 + font * 0.6;
    let bx = map.frame.x0 + 10.0;
    let by = map.frame.y0 + 10.0;
    let fg = hex(style.foreground);

    svg.push_str(&format!(
        r#"<rect x="{bx:.2}" y="{by:.2}" width="{box_w:.2}" height="{box_h:.2}" fill="{}" fill-opacity="0.8" stroke="{fg}" stroke-opacity="0.3"/>"#,
        hex(style.background)
    ));
    svg.push('\n');
    for (i, s) in panel.series.iter().enumerate() {
        let cy = by + font * 0.3 + row_h * (i as f64 + 0.5);
        let sx0 = bx + 6.0;
        let sx1 = sx0 + swatch;
        match s {
            Series::Line { label, color, width, opacity, dashed, .. } => {
                let dash = if *dashed {
                    format!(r#" stroke-dasharray="{DASH}""#)
                } else {
                    String::new()
                };
                svg.push_str(&format!(
                    r#"<line x1="{sx0:.2}" y1="{cy:.2}" x2="{sx1:.2}" y2="{cy:.2}" stroke="{}" stroke-width="{width:.2}" stroke-opacity="{opacity:.3}"{dash}/>"#,
                    hex(*color)
                ));
                push_legend_label(svg, sx1 + 8.0, cy, label, &fg, font);
            }
            Series::FillBetween { label, color, opacity, .. } => {
                svg.push_str(&format!(
                    r#"<rect x="{sx0:.2}" y="{:.2}" width="{swatch:.2}" height="{:.2}" fill="{}" fill-opacity="{opacity:.3}"/>"#,
                    cy - font * 0.4,
                    font * 0.8,
                    hex(*color)
                ));
                push_legend_label(svg, sx1 + 8.0, cy, label, &fg, font);
            }
        }
    }
}

fn push_legend_label(svg: &mut String, x: f64, cy: f64, label: &str, fg: &str, font: f64) {
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{:.2}" fill="{fg}">{}</text>"#,
        cy + font * 0.35,
        escape_xml(label)
    ));
    svg.push('\n');
}

fn polyline_points(map: &Mapping, time: &[f64], ys: &[f64]) -> String {
    time.iter()
        .zip(ys.iter())
        .filter(|(t, v)| t.is_finite() && v.is_finite())
        .map(|(&t, &v)| format!("{:.2},{:.2}", map.sx(t), map.sy(v)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Min/max of the finite values, widened by `pad` of the span. Degenerate or
/// empty input falls back to a unit-wide range.
fn padded_range(values: impl Iterator<Item = f64>, pad: f64) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < 1e-12 {
        return (lo - 1.0, hi + 1.0);
    }
    let span = hi - lo;
    (lo - span * pad, hi + span * pad)
}

/// Round tick positions covering `[lo, hi]` with a 1/2/5 step.
fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !(hi > lo) || target == 0 {
        return Vec::new();
    }
    let raw = (hi - lo) / target as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let unit = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = unit * mag;
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    let first = (lo / step).ceil();
    let last = (hi / step).floor();
    // large offsets with a narrow span lose the step to rounding
    if !(first.is_finite() && last.is_finite()) || last - first > (10 * target) as f64 {
        return Vec::new();
    }
    (first as i64..=last as i64).map(|k| k as f64 * step).collect()
}

fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => b - a,
        _ => 1.0,
    }
}

fn format_tick(v: f64, step: f64) -> String {
    let decimals = if step > 0.0 {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    // avoid "-0.0"
    let v = if v.abs() < step.abs() * 1e-9 { 0.0 } else { v };
    format!("{:.*}", decimals, v)
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
