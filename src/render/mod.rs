//! Side-by-side panel rendering.
//!
//! A panel is a borrowed grid, a colormap and a title. [`compose_panels`]
//! lays panels out left to right on a white canvas:
//!
//! - single-channel grids are min/max autoscaled to `[0, 1]` and passed
//!   through the panel's colormap (a constant grid maps to the colormap's low
//!   end);
//! - three-channel grids are shown as RGB, autoscaled over all channels, and
//!   the colormap is ignored.
//!
//! When a [`TitleFont`] is given, a strip of [`TITLE_STRIP`] pixels is
//! reserved above the panels and each title is drawn left-aligned over its
//! panel, cut to the panel width.
//!
//! [`PngRenderer`] is the file-backed [`Renderer`]: it writes the composite
//! PNG plus a JSON manifest with per-panel placement and value range.

pub mod colormap;
pub mod title;

pub use colormap::Colormap;
pub use title::{TitleFont, TITLE_STRIP};

use crate::error::RenderError;
use crate::image::io::{save_rgb, write_json_file};
use crate::image::{ImageView, PlanarImage};
use image::{Rgb, RgbImage};
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Gap between panels in pixels.
pub const DEFAULT_GUTTER: u32 = 8;

/// One grid to show, borrowed from its owner.
#[derive(Clone, Copy, Debug)]
pub struct Panel<'a> {
    pub grid: &'a PlanarImage,
    pub colormap: Colormap,
    pub title: &'a str,
}

impl<'a> Panel<'a> {
    pub fn new(grid: &'a PlanarImage, colormap: Colormap, title: &'a str) -> Self {
        Self {
            grid,
            colormap,
            title,
        }
    }
}

/// Display sink for an ordered sequence of panels.
pub trait Renderer {
    fn render(&mut self, panels: &[Panel<'_>]) -> Result<(), RenderError>;
}

/// Placement and value range of one panel inside a composite.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelLayout {
    pub title: String,
    pub colormap: Colormap,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub min: f32,
    pub max: f32,
}

/// Manifest written next to the composite image.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigureManifest {
    pub width: u32,
    pub height: u32,
    pub gutter: u32,
    /// Rows above the panels holding titles; 0 when titles were not drawn.
    pub title_height: u32,
    pub panels: Vec<PanelLayout>,
}

/// Composite image and its manifest.
#[derive(Clone, Debug)]
pub struct Figure {
    pub image: RgbImage,
    pub manifest: FigureManifest,
}

#[inline]
fn unit(v: f32, lo: f32, span: f32) -> f32 {
    if span > 0.0 {
        (v - lo) / span
    } else {
        0.0
    }
}

fn paint_panel(
    canvas: &mut RgbImage,
    x0: u32,
    y0: u32,
    panel: &Panel<'_>,
) -> Result<(f32, f32), RenderError> {
    let grid = panel.grid;
    let (lo, hi) = grid.min_max();
    let span = hi - lo;
    match grid.channels() {
        1 => {
            for (y, row) in grid.plane(0).rows().enumerate() {
                for (x, &v) in row.iter().enumerate() {
                    let rgb = panel.colormap.rgb(unit(v, lo, span));
                    canvas.put_pixel(x0 + x as u32, y0 + y as u32, Rgb(rgb));
                }
            }
        }
        3 => {
            let (r, g, b) = (grid.plane(0), grid.plane(1), grid.plane(2));
            for y in 0..grid.height() {
                for x in 0..grid.width() {
                    let px = [r.get(x, y), g.get(x, y), b.get(x, y)]
                        .map(|v| (unit(v, lo, span).clamp(0.0, 1.0) * 255.0).round() as u8);
                    canvas.put_pixel(x0 + x as u32, y0 + y as u32, Rgb(px));
                }
            }
        }
        channels => {
            return Err(RenderError::UnsupportedChannels {
                title: panel.title.to_string(),
                channels,
            })
        }
    }
    Ok((lo, hi))
}

/// Lay `panels` out left to right with `gutter` pixels between them, titled
/// with `titles` when a font is available.
pub fn compose_panels(
    panels: &[Panel<'_>],
    gutter: u32,
    titles: Option<&TitleFont>,
) -> Result<Figure, RenderError> {
    if panels.is_empty() {
        return Err(RenderError::NoPanels);
    }
    if let Some(p) = panels
        .iter()
        .find(|p| p.grid.width() == 0 || p.grid.height() == 0)
    {
        return Err(RenderError::EmptyPanel {
            title: p.title.to_string(),
        });
    }

    let width = panels.iter().map(|p| p.grid.width() as u32).sum::<u32>()
        + gutter * (panels.len() as u32 - 1);
    let title_height = if titles.is_some() { TITLE_STRIP } else { 0 };
    let height = title_height
        + panels
            .iter()
            .map(|p| p.grid.height() as u32)
            .max()
            .unwrap_or(0);
    let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

    let mut layouts = Vec::with_capacity(panels.len());
    let mut x0 = 0u32;
    for panel in panels {
        let (min, max) = paint_panel(&mut canvas, x0, title_height, panel)?;
        let w = panel.grid.width() as u32;
        if let Some(font) = titles {
            font.draw(&mut canvas, x0 + 2, 4, w.saturating_sub(4), panel.title);
        }
        layouts.push(PanelLayout {
            title: panel.title.to_string(),
            colormap: panel.colormap,
            x: x0,
            y: title_height,
            width: w,
            height: panel.grid.height() as u32,
            min,
            max,
        });
        x0 += w + gutter;
    }

    Ok(Figure {
        image: canvas,
        manifest: FigureManifest {
            width,
            height,
            gutter,
            title_height,
            panels: layouts,
        },
    })
}

/// Renderer that saves each figure as `<stem>.png` + `<stem>.json`.
#[derive(Clone, Debug)]
pub struct PngRenderer {
    image_path: PathBuf,
    manifest_path: Option<PathBuf>,
    gutter: u32,
    titles: Option<Arc<TitleFont>>,
}

impl PngRenderer {
    /// Write the composite to `image_path` and the manifest next to it with a
    /// `.json` extension. Titles use the system font when one is found.
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        let image_path = image_path.into();
        let manifest_path = Some(image_path.with_extension("json"));
        Self {
            image_path,
            manifest_path,
            gutter: DEFAULT_GUTTER,
            titles: TitleFont::system(),
        }
    }

    /// Panels only, no title strip.
    pub fn without_titles(mut self) -> Self {
        self.titles = None;
        self
    }

    pub fn with_title_font(mut self, font: Arc<TitleFont>) -> Self {
        self.titles = Some(font);
        self
    }

    pub fn without_manifest(mut self) -> Self {
        self.manifest_path = None;
        self
    }

    pub fn with_gutter(mut self, gutter: u32) -> Self {
        self.gutter = gutter;
        self
    }
}

impl Renderer for PngRenderer {
    fn render(&mut self, panels: &[Panel<'_>]) -> Result<(), RenderError> {
        let figure = compose_panels(panels, self.gutter, self.titles.as_deref())?;
        save_rgb(&figure.image, &self.image_path)?;
        if let Some(path) = &self.manifest_path {
            write_json_file(path, &figure.manifest)?;
        }
        info!(
            "rendered {} panel(s) {}x{} -> {}",
            panels.len(),
            figure.manifest.width,
            figure.manifest.height,
            self.image_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageF32;

    fn gray(w: usize, h: usize, f: impl FnMut(usize, usize) -> f32) -> PlanarImage {
        PlanarImage::from_plane(ImageF32::from_fn(w, h, f)).unwrap()
    }

    #[test]
    fn width_is_sum_of_panels_plus_gutters() {
        let a = gray(5, 4, |x, _| x as f32);
        let b = gray(3, 6, |_, y| y as f32);
        let fig = compose_panels(
            &[
                Panel::new(&a, Colormap::Gray, "a"),
                Panel::new(&b, Colormap::Terrain, "b"),
            ],
            2,
            None,
        )
        .unwrap();
        assert_eq!(fig.image.dimensions(), (10, 6));
        assert_eq!(fig.manifest.panels[1].x, 7);
        // gutter and the area below the shorter panel stay white
        assert_eq!(fig.image.get_pixel(5, 0), &Rgb([255, 255, 255]));
        assert_eq!(fig.image.get_pixel(0, 5), &Rgb([255, 255, 255]));
    }

    #[test]
    fn single_channel_panels_autoscale_through_colormap() {
        let ramp = gray(3, 1, |x, _| 10.0 + 5.0 * x as f32);
        let fig = compose_panels(&[Panel::new(&ramp, Colormap::Gray, "ramp")], 0, None).unwrap();
        assert_eq!(fig.image.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(fig.image.get_pixel(2, 0), &Rgb([255, 255, 255]));
        assert_eq!((fig.manifest.panels[0].min, fig.manifest.panels[0].max), (10.0, 20.0));
    }

    #[test]
    fn constant_panel_maps_to_colormap_low_end() {
        let zeros = gray(2, 2, |_, _| 0.0);
        let fig = compose_panels(&[Panel::new(&zeros, Colormap::Terrain, "flat")], 0, None).unwrap();
        assert_eq!(fig.image.get_pixel(1, 1), &Rgb(Colormap::Terrain.rgb(0.0)));
    }

    #[test]
    fn rgb_panels_ignore_colormap() {
        let data = vec![0.0, 0.0, 255.0, 255.0, 0.0, 0.0];
        let rgb = PlanarImage::from_shape_vec(&[1, 2, 3], data).unwrap();
        let fig = compose_panels(&[Panel::new(&rgb, Colormap::Prism, "rgb")], 0, None).unwrap();
        assert_eq!(fig.image.get_pixel(0, 0), &Rgb([0, 0, 255]));
        assert_eq!(fig.image.get_pixel(1, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn empty_panel_list_and_odd_channel_counts_fail() {
        assert!(matches!(compose_panels(&[], 4, None), Err(RenderError::NoPanels)));
        let two = PlanarImage::from_shape_vec(&[1, 1, 2], vec![0.0, 1.0]).unwrap();
        assert!(matches!(
            compose_panels(&[Panel::new(&two, Colormap::Gray, "two")], 0, None),
            Err(RenderError::UnsupportedChannels { channels: 2, .. })
        ));
    }

    #[test]
    fn titles_occupy_a_strip_above_the_panels() {
        let Some(font) = TitleFont::system() else {
            return;
        };
        let a = gray(40, 10, |_, _| 1.0);
        let b = gray(40, 10, |_, _| 1.0);
        let fig = compose_panels(
            &[
                Panel::new(&a, Colormap::Gray, "Original"),
                Panel::new(&b, Colormap::Gray, "Sobel"),
            ],
            4,
            Some(&*font),
        )
        .unwrap();
        assert_eq!(fig.image.dimensions(), (84, TITLE_STRIP + 10));
        assert_eq!(fig.manifest.title_height, TITLE_STRIP);
        assert!(fig.manifest.panels.iter().all(|p| p.y == TITLE_STRIP));
        // panel pixels start below the strip; a constant grid is the gray low end
        assert_eq!(fig.image.get_pixel(0, TITLE_STRIP), &Rgb([0, 0, 0]));
        for layout in &fig.manifest.panels {
            let inked = (layout.x..layout.x + layout.width)
                .flat_map(|x| (0..TITLE_STRIP).map(move |y| (x, y)))
                .any(|(x, y)| fig.image.get_pixel(x, y) != &Rgb([255, 255, 255]));
            assert!(inked, "no title drawn over {}", layout.title);
        }
        // gutters stay clear of title ink
        for y in 0..TITLE_STRIP {
            for x in 40..44 {
                assert_eq!(fig.image.get_pixel(x, y), &Rgb([255, 255, 255]));
            }
        }
    }

    #[test]
    fn untitled_figures_have_no_strip() {
        let a = gray(3, 2, |x, _| x as f32);
        let fig = compose_panels(&[Panel::new(&a, Colormap::Gray, "a")], 0, None).unwrap();
        assert_eq!(fig.image.dimensions(), (3, 2));
        assert_eq!(fig.manifest.title_height, 0);
        assert_eq!(fig.manifest.panels[0].y, 0);
    }

    #[test]
    fn png_renderer_writes_image_and_manifest() {
        let dir = std::env::temp_dir().join(format!("xray_edges_render_{}", std::process::id()));
        let path = dir.join("figure.png");
        let img = gray(4, 4, |x, y| (x + y) as f32);
        PngRenderer::new(&path)
            .render(&[Panel::new(&img, Colormap::CmrMap, "Original")])
            .unwrap();
        assert!(path.exists());
        let manifest = std::fs::read_to_string(path.with_extension("json")).unwrap();
        assert!(manifest.contains("\"colormap\": \"CMRmap\""));
        let _ = std::fs::remove_dir_all(dir);
    }
}
