//! Two-axis separable filters: Prewitt, Sobel and Gaussian (with derivatives).
use super::kernels::gaussian_kernel_1d;
use super::{
    correlate1d, Axis, BoundaryMode, SeparableFilter, CENTRAL_DIFFERENCE, PREWITT_SMOOTH,
    SOBEL_SMOOTH,
};
use crate::error::EdgeError;
use crate::image::ImageF32;

fn derivative_with_smoothing(
    plane: &ImageF32,
    axis: Axis,
    smooth: &dyn SeparableFilter,
    boundary: BoundaryMode,
) -> ImageF32 {
    let d = correlate1d(plane, &CENTRAL_DIFFERENCE, axis, boundary);
    correlate1d(&d, smooth, axis.other(), boundary)
}

/// Prewitt derivative along `axis`: `[-1, 0, 1]` along it, `[1, 1, 1]`
/// across it.
pub fn prewitt(plane: &ImageF32, axis: Axis, boundary: BoundaryMode) -> ImageF32 {
    derivative_with_smoothing(plane, axis, &PREWITT_SMOOTH, boundary)
}

/// Sobel-Feldman derivative along `axis`: `[-1, 0, 1]` along it, `[1, 2, 1]`
/// across it.
pub fn sobel(plane: &ImageF32, axis: Axis, boundary: BoundaryMode) -> ImageF32 {
    derivative_with_smoothing(plane, axis, &SOBEL_SMOOTH, boundary)
}

/// Gaussian filter of scale `sigma` with a derivative order per axis
/// (`orders[0]` for axis Y, `orders[1]` for axis X).
pub fn gaussian_filter(
    plane: &ImageF32,
    sigma: f64,
    orders: [usize; 2],
    truncate: f64,
    boundary: BoundaryMode,
) -> Result<ImageF32, EdgeError> {
    let ky = gaussian_kernel_1d(sigma, orders[0], truncate)?;
    let kx = if orders[1] == orders[0] {
        ky.clone()
    } else {
        gaussian_kernel_1d(sigma, orders[1], truncate)?
    };
    let tmp = correlate1d(plane, &ky, Axis::Y, boundary);
    Ok(correlate1d(&tmp, &kx, Axis::X, boundary))
}
