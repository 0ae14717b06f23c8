//! One-shot edge-map computation over a borrowed image.
use super::gaussian::{gaussian_gradient_magnitude, gaussian_laplace};
use super::grad::{image_gradients, GradientKernel};
use super::method::EdgeMethod;
use super::normalize::{rescale_to_max, DISPLAY_MAX};
use crate::error::EdgeError;
use crate::filters::kernels::check_positive;
use crate::filters::{fourier_gaussian, BoundaryMode};
use crate::image::{ImageF32, PlanarImage};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Knobs shared by every method.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeOptions {
    /// Border handling for the spatial filters.
    pub boundary: BoundaryMode,
    /// Gaussian kernels stop at `truncate · sigma`.
    pub truncate: f64,
    /// Also rescale the Gaussian gradient magnitude to `0..=255`.
    pub normalize_gaussian_gradient: bool,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            boundary: BoundaryMode::Reflect,
            truncate: 4.0,
            normalize_gaussian_gradient: false,
        }
    }
}

/// What happened to the raw response before it was handed out.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Normalization {
    /// Raw filter response.
    Raw,
    /// Multiplied by `scale` so the maximum is 255.
    Rescaled { scale: f32, max_before: f32 },
    /// Rescale requested but the response was all zero; left as is.
    Degenerate,
}

/// Edge response with the same shape as the image it came from.
#[derive(Clone, Debug)]
pub struct EdgeMap {
    pub method: EdgeMethod,
    pub normalization: Normalization,
    grid: PlanarImage,
}

impl EdgeMap {
    pub fn grid(&self) -> &PlanarImage {
        &self.grid
    }

    pub fn shape(&self) -> Vec<usize> {
        self.grid.shape()
    }

    /// Smallest and largest sample over all channels.
    pub fn value_range(&self) -> (f32, f32) {
        self.grid.min_max()
    }
}

/// Stateless edge-map computer configured by [`EdgeOptions`].
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeMapComputer {
    options: EdgeOptions,
}

impl EdgeMapComputer {
    pub fn new(options: EdgeOptions) -> Self {
        Self { options }
    }

    /// Compute the edge map of `image` with `method`.
    ///
    /// Parameters are validated before any pixel is touched. Each channel is
    /// filtered independently along the two spatial axes.
    pub fn compute(&self, image: &PlanarImage, method: EdgeMethod) -> Result<EdgeMap, EdgeError> {
        method.validate()?;
        check_positive("truncate", self.options.truncate)?;
        image.ensure_finite()?;

        let start = Instant::now();
        let opts = self.options;
        let mut grid = image.map_planes(|plane| self.filter_plane(plane, method))?;
        if let Some((x, y, c, v)) = grid.first_non_finite() {
            return Err(EdgeError::NonFiniteResponse {
                method: method.to_string(),
                detail: format!("{v} at (x={x}, y={y}, c={c})"),
            });
        }

        let rescale = method.always_rescaled()
            || (opts.normalize_gaussian_gradient
                && matches!(method, EdgeMethod::GaussianGradientMagnitude { .. }));
        let normalization = if rescale {
            let (_, max_before) = grid.min_max();
            match rescale_to_max(&mut grid, DISPLAY_MAX) {
                Ok(scale) => Normalization::Rescaled { scale, max_before },
                Err(EdgeError::DegenerateNormalization { max }) => {
                    debug!("EdgeMapComputer::compute {method}: flat response (max={max}), rescale skipped");
                    Normalization::Degenerate
                }
                Err(e) => return Err(e),
            }
        } else {
            Normalization::Raw
        };

        let (lo, hi) = grid.min_max();
        debug!(
            "EdgeMapComputer::compute {method} shape={:?} range=[{lo:.3}, {hi:.3}] {:?} in {:.3} ms",
            grid.shape(),
            normalization,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(EdgeMap {
            method,
            normalization,
            grid,
        })
    }

    fn filter_plane(&self, plane: &ImageF32, method: EdgeMethod) -> Result<ImageF32, EdgeError> {
        let EdgeOptions {
            boundary, truncate, ..
        } = self.options;
        match method {
            EdgeMethod::PrewittHypot { presmooth_sigma } => {
                let smoothed;
                let source = match presmooth_sigma {
                    Some(sigma) => {
                        smoothed = fourier_gaussian(plane, sigma)?;
                        &smoothed
                    }
                    None => plane,
                };
                Ok(image_gradients(source, GradientKernel::Prewitt, boundary).mag)
            }
            EdgeMethod::SobelHypot => Ok(image_gradients(plane, GradientKernel::Sobel, boundary).mag),
            EdgeMethod::GaussianGradientMagnitude { sigma } => {
                gaussian_gradient_magnitude(plane, sigma, truncate, boundary)
            }
            EdgeMethod::LaplacianOfGaussian { sigma } => {
                gaussian_laplace(plane, sigma, truncate, boundary)
            }
        }
    }
}

/// Compute an edge map with default options.
pub fn compute_edge_map(image: &PlanarImage, method: EdgeMethod) -> Result<EdgeMap, EdgeError> {
    EdgeMapComputer::default().compute(image, method)
}
