#![doc = include_str!("../README.md")]

// Public modules
pub mod config;
pub mod diagnostics;
pub mod edges;
pub mod error;
pub mod image;
pub mod render;

// Building blocks used by the edge methods.
pub mod filters;

// --- High-level re-exports -------------------------------------------------

// Main entry points: one computation, one render step.
pub use crate::edges::{
    compute_edge_map, EdgeMap, EdgeMapComputer, EdgeMethod, EdgeOptions, Normalization,
};
pub use crate::error::{ConfigError, EdgeError, ImageIoError, RenderError};
pub use crate::image::PlanarImage;
pub use crate::render::{Colormap, Panel, PngRenderer, Renderer};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use xray_edges::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let image = load_image(std::path::Path::new("xray.png"))?;
/// let map = compute_edge_map(&image, EdgeMethod::SobelHypot)?;
///
/// let mut renderer = PngRenderer::new("out/sobel.png");
/// renderer.render(&[
///     Panel::new(&image, Colormap::Gray, "Original"),
///     Panel::new(map.grid(), Colormap::CmrMap, "Sobel (edges)"),
/// ])?;
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::io::load_image;
    pub use crate::image::PlanarImage;
    pub use crate::{
        compute_edge_map, Colormap, EdgeMap, EdgeMapComputer, EdgeMethod, EdgeOptions, Panel,
        PngRenderer, Renderer,
    };
}
