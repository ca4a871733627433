//! Rasterize the SVG figure and write figures to disk.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use tracing::info;

use super::style::PlotStyle;
use super::svg::render_svg;
use crate::data::simulation::SimulationRun;
use crate::error::{Error, Result};

/// Parse and render an SVG document into an RGBA image (straight alpha).
pub fn rasterize_svg(svg: &str) -> Result<RgbaImage> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return Err(Error::Render("SVG has zero size".to_string()));
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| Error::Render(format!("cannot allocate {}x{} pixmap", size.width(), size.height())))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let mut out = RgbaImage::new(size.width(), size.height());
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(out)
}

/// Render `run` and save it as a PNG image.
pub fn save_png<P: AsRef<Path>>(path: P, run: &SimulationRun, style: &PlotStyle) -> Result<()> {
    let path = path.as_ref();
    let img = rasterize_svg(&render_svg(run, style))?;
    img.save_with_format(path, ImageFormat::Png)?;
    info!(path = %path.display(), width = img.width(), height = img.height(), "saved PNG figure");
    Ok(())
}

/// Render `run` and save the SVG document.
pub fn save_svg<P: AsRef<Path>>(path: P, run: &SimulationRun, style: &PlotStyle) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, render_svg(run, style)).map_err(|e| Error::io(path, e))?;
    info!(path = %path.display(), "saved SVG figure");
    Ok(())
}
