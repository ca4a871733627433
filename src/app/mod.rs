//! Interactive egui/eframe viewer.

mod plot;
mod run;
mod viewer;

pub use run::run_viewer;
pub use viewer::{DriftPlotApp, ViewerOptions};
