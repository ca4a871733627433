//! Plot styling shared by the static renderer and the interactive viewer.
//!
//! A [`PlotStyle`] is passed explicitly to every renderer; nothing here is
//! global, so two figures in one process can use different styles.

use serde::{Deserialize, Serialize};

/// Visual parameters of the two-panel velocity/position figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    /// Figure width in pixels (static export and initial window width).
    pub width_px: u32,
    /// Figure height in pixels.
    pub height_px: u32,
    /// Base font size in pixels. Titles are drawn 20% larger.
    pub font_size: f32,
    pub line_width: f32,
    /// Opacity of the grid lines (0..=1).
    pub grid_alpha: f32,
    /// Opacity of the noisy velocity trace.
    pub noisy_alpha: f32,
    /// Opacity of the shaded region between true and computed position.
    pub error_fill_alpha: f32,
    pub true_color: [u8; 3],
    pub measured_color: [u8; 3],
    pub estimated_color: [u8; 3],
    pub error_color: [u8; 3],
    pub background: [u8; 3],
    pub foreground: [u8; 3],
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width_px: 1000,
            height_px: 800,
            font_size: 14.0,
            line_width: 2.0,
            grid_alpha: 0.3,
            noisy_alpha: 0.6,
            error_fill_alpha: 0.8,
            true_color: [0, 128, 0],
            measured_color: [255, 0, 0],
            estimated_color: [0, 0, 255],
            error_color: [255, 0, 0],
            background: [255, 255, 255],
            foreground: [0, 0, 0],
        }
    }
}

impl PlotStyle {
    pub fn title_size(&self) -> f32 {
        self.font_size * 1.2
    }
}

/// `#rrggbb` for an RGB triple.
pub fn hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}
