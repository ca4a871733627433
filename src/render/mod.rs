//! Static figure rendering (SVG, PNG).

pub mod raster;
pub mod style;
pub mod svg;

pub use raster::{rasterize_svg, save_png, save_svg};
pub use style::PlotStyle;
pub use svg::render_svg;
