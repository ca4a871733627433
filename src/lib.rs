//! driftplot crate root: re-exports and module wiring.
//!
//! Integrates a noisy velocity signal into position with a cumulative Riemann
//! sum and shows how sensor noise turns into position drift.
//!
//! - `data`: integrator, synthetic signal, sensor noise, simulation, CSV export
//! - `render`: static two-panel figure as SVG/PNG
//! - `app`: interactive egui/eframe viewer
//! - `config`: serde configuration for a full run
//! - `logging`: `tracing` subscriber setup

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod render;

// Public re-exports for a compact external API
pub use app::{run_viewer, DriftPlotApp, ViewerOptions};
pub use config::{DemoConfig, OutputConfig, SimulationConfig};
pub use data::integrate::{integrate, riemann_sum, IntegrationRule};
pub use data::noise::NoiseModel;
pub use data::signal::{time_grid, VelocityProfile};
pub use data::simulation::{RunSummary, Simulation, SimulationRun};
pub use error::{Error, Result};
pub use render::PlotStyle;
