//! Gaussian smoothing defined in the frequency domain.
//!
//! The transfer function `H(f) = exp(-2π²σ²f²)` (f in cycles per sample,
//! sampled at the DFT frequencies of each axis) is separable, so the 2-D
//! multiply-by-`H` equals one circular 1-D filter per axis. The spatial taps
//! of each 1-D filter are the inverse DFT of `H`, which is real and even; taps
//! below a relative tolerance are dropped. Periodic boundaries come from
//! correlating with [`BoundaryMode::Wrap`].
use super::kernels::check_positive;
use super::{correlate1d, Axis, BoundaryMode, Kernel1D};
use crate::error::EdgeError;
use crate::image::ImageF32;
use std::f64::consts::PI;

/// Taps with `|h[m]| <= TAP_TOLERANCE · h[0]` are discarded.
const TAP_TOLERANCE: f64 = 1e-6;

/// Circular kernel realizing the Gaussian transfer function on a line of
/// `n` samples.
pub fn fourier_gaussian_kernel(n: usize, sigma: f64) -> Result<Kernel1D, EdgeError> {
    check_positive("sigma", sigma)?;
    if n == 0 {
        return Ok(Kernel1D::new(vec![1.0]));
    }

    let transfer: Vec<f64> = (0..n)
        .map(|k| {
            // numpy-style fftfreq ordering
            let f = if 2 * k < n { k as f64 } else { k as f64 - n as f64 } / n as f64;
            (-2.0 * PI * PI * sigma * sigma * f * f).exp()
        })
        .collect();

    let half = n / 2;
    let h: Vec<f64> = (0..=half)
        .map(|m| {
            let sum: f64 = transfer
                .iter()
                .enumerate()
                .map(|(k, &hk)| hk * (2.0 * PI * (k * m % n) as f64 / n as f64).cos())
                .sum();
            sum / n as f64
        })
        .collect();

    let keep = h
        .iter()
        .rposition(|v| v.abs() > TAP_TOLERANCE * h[0].abs())
        .unwrap_or(0);

    // For even n the offset n/2 is its own mirror image; split it over both
    // sides so the circular sum counts it once.
    let radius = keep;
    let mut taps = vec![0f32; 2 * radius + 1];
    for m in 0..=radius {
        let v = if n % 2 == 0 && m == half && m > 0 {
            h[m] / 2.0
        } else {
            h[m]
        };
        taps[radius + m] = v as f32;
        taps[radius - m] = v as f32;
    }
    Ok(Kernel1D::new(taps))
}

/// Smooth `plane` by multiplying its 2-D spectrum with a Gaussian of spatial
/// standard deviation `sigma`.
pub fn fourier_gaussian(plane: &ImageF32, sigma: f64) -> Result<ImageF32, EdgeError> {
    let ky = fourier_gaussian_kernel(plane.h, sigma)?;
    let kx = fourier_gaussian_kernel(plane.w, sigma)?;
    let tmp = correlate1d(plane, &ky, Axis::Y, BoundaryMode::Wrap);
    Ok(correlate1d(&tmp, &kx, Axis::X, BoundaryMode::Wrap))
}
