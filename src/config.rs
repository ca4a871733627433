//! Configuration for a complete run: simulation, sensor, plot style, outputs, logging.
//!
//! Every section uses `#[serde(default)]`, so a config file only needs the keys it
//! changes. Files ending in `.yaml`/`.yml` are read as YAML, everything else as JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::noise::NoiseModel;
use crate::error::{Error, Result};
use crate::logging::LogConfig;
use crate::render::style::PlotStyle;

pub use crate::data::simulation::SimulationConfig;

/// Where results go after the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Open the interactive viewer after writing files.
    pub show_window: bool,
    pub png: Option<PathBuf>,
    pub svg: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_window: true,
            png: None,
            svg: None,
            csv: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DemoConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field        | Purpose |
/// |--------------|---------|
/// | `simulation` | Time base, velocity profile, integration rule |
/// | `noise`      | Sensor noise, quantization, RNG seed |
/// | `plot`       | Figure size, fonts, colours (static export and viewer) |
/// | `output`     | Files to write and whether to open the window |
/// | `logging`    | Log level and format |
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub simulation: SimulationConfig,
    pub noise: NoiseModel,
    pub plot: PlotStyle,
    pub output: OutputConfig,
    pub logging: LogConfig,
}

impl DemoConfig {
    /// Load from a JSON or YAML file (chosen by extension).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let txt = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        if is_yaml(path) {
            Self::from_yaml(&txt)
        } else {
            Self::from_json(&txt)
        }
    }

    pub fn from_json(txt: &str) -> Result<Self> {
        Ok(serde_json::from_str(txt)?)
    }

    pub fn from_yaml(txt: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(txt)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Save to a JSON or YAML file (chosen by extension).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let txt = if is_yaml(path) { self.to_yaml()? } else { self.to_json()? };
        std::fs::write(path, txt).map_err(|e| Error::io(path, e))
    }

    /// Check every numeric parameter before anything runs.
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.noise.validate()?;
        let p = &self.plot;
        if !(p.font_size.is_finite() && p.font_size > 0.0) {
            return Err(Error::invalid("font_size", format!("must be > 0, got {}", p.font_size)));
        }
        if !(p.line_width.is_finite() && p.line_width > 0.0) {
            return Err(Error::invalid("line_width", format!("must be > 0, got {}", p.line_width)));
        }
        if p.width_px == 0 || p.height_px == 0 {
            return Err(Error::invalid(
                "width_px/height_px",
                format!("must be non-zero, got {}x{}", p.width_px, p.height_px),
            ));
        }
        for (name, a) in [
            ("grid_alpha", p.grid_alpha),
            ("noisy_alpha", p.noisy_alpha),
            ("error_fill_alpha", p.error_fill_alpha),
        ] {
            if !(0.0..=1.0).contains(&a) {
                return Err(Error::invalid(name, format!("must be within 0..=1, got {a}")));
            }
        }
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref(),
        Some("yaml") | Some("yml")
    )
}
