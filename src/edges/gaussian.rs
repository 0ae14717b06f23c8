//! Gaussian-derivative edge responses: gradient magnitude and Laplacian.
//!
//! Both are sums over the two axes of a Gaussian filter that differentiates
//! along one axis and smooths along the other:
//!
//! - gradient magnitude: `sqrt(Σ_axis (G'_axis * I)^2)`, non-negative;
//! - Laplacian of Gaussian: `Σ_axis G''_axis * I`, signed (edges sit on zero
//!   crossings).
use crate::error::EdgeError;
use crate::filters::{gaussian_filter, Axis, BoundaryMode};
use crate::image::ImageF32;

fn orders_for(axis: Axis, order: usize) -> [usize; 2] {
    match axis {
        Axis::Y => [order, 0],
        Axis::X => [0, order],
    }
}

/// Gradient magnitude of `plane` smoothed at scale `sigma`.
pub fn gaussian_gradient_magnitude(
    plane: &ImageF32,
    sigma: f64,
    truncate: f64,
    boundary: BoundaryMode,
) -> Result<ImageF32, EdgeError> {
    let gy = gaussian_filter(plane, sigma, orders_for(Axis::Y, 1), truncate, boundary)?;
    let gx = gaussian_filter(plane, sigma, orders_for(Axis::X, 1), truncate, boundary)?;
    Ok(gx.zip_map(&gy, f32::hypot))
}

/// Laplacian of `plane` smoothed at scale `sigma`.
pub fn gaussian_laplace(
    plane: &ImageF32,
    sigma: f64,
    truncate: f64,
    boundary: BoundaryMode,
) -> Result<ImageF32, EdgeError> {
    let dyy = gaussian_filter(plane, sigma, orders_for(Axis::Y, 2), truncate, boundary)?;
    let dxx = gaussian_filter(plane, sigma, orders_for(Axis::X, 2), truncate, boundary)?;
    Ok(dxx.zip_map(&dyy, |a, b| a + b))
}
