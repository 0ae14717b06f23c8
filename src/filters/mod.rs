//! Separable filtering primitives on single-channel float planes.
//!
//! Every filter in the crate is built from one operation, [`correlate1d`]:
//! slide a centered, odd-length tap vector along one axis, synthesizing
//! out-of-range samples with a [`BoundaryMode`]. Two-axis filters (Prewitt,
//! Sobel, Gaussian and its derivatives) run one 1-D pass per axis.
//!
//! Axis numbering follows row-major arrays: axis 0 walks down a column
//! (`Axis::Y`), axis 1 walks along a row (`Axis::X`).

pub mod boundary;
pub mod fourier;
pub mod kernels;
pub mod separable;

pub use boundary::BoundaryMode;
pub use fourier::fourier_gaussian;
pub use kernels::{gaussian_kernel_1d, Kernel1D};
pub use separable::{gaussian_filter, prewitt, sobel};

use crate::image::{ImageF32, ImageView};

/// Trait implemented by 1-D filters applied along one axis.
pub trait SeparableFilter {
    /// Return the taps in left-to-right order; the centre tap sits at
    /// `taps().len() / 2`. Lengths are odd.
    fn taps(&self) -> &[f32];
}

/// Wrapper around a static filter kernel.
#[derive(Clone, Copy, Debug)]
pub struct StaticSeparableFilter {
    taps: &'static [f32],
}

impl StaticSeparableFilter {
    pub const fn new(taps: &'static [f32]) -> Self {
        Self { taps }
    }
}

impl SeparableFilter for StaticSeparableFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        self.taps
    }
}

/// Central difference `[-1, 0, 1]`.
pub const CENTRAL_DIFFERENCE: StaticSeparableFilter =
    StaticSeparableFilter::new(&[-1.0, 0.0, 1.0]);
/// Prewitt cross-axis smoothing `[1, 1, 1]`.
pub const PREWITT_SMOOTH: StaticSeparableFilter = StaticSeparableFilter::new(&[1.0, 1.0, 1.0]);
/// Sobel cross-axis smoothing `[1, 2, 1]`.
pub const SOBEL_SMOOTH: StaticSeparableFilter = StaticSeparableFilter::new(&[1.0, 2.0, 1.0]);

/// Spatial axis of a plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Axis 0: down a column.
    Y,
    /// Axis 1: along a row.
    X,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::Y => Axis::X,
            Axis::X => Axis::Y,
        }
    }
}

/// Correlate `input` with `filter` along `axis`.
///
/// `out[i] = Σ_j taps[j] · in[i + j - r]` with `r = taps.len() / 2`, where
/// indices outside the line are mapped by `boundary`. Sums accumulate in
/// `f64`. Output shape equals input shape.
pub fn correlate1d<F>(input: &ImageF32, filter: &F, axis: Axis, boundary: BoundaryMode) -> ImageF32
where
    F: SeparableFilter + ?Sized,
{
    let taps = filter.taps();
    debug_assert!(taps.len() % 2 == 1, "correlate1d expects odd-length taps");
    let (w, h) = (input.w, input.h);
    let mut out = ImageF32::new(w, h);
    if input.is_empty() || taps.is_empty() {
        return out;
    }

    let radius = taps.len() / 2;
    let line_len = match axis {
        Axis::X => w,
        Axis::Y => h,
    };
    let mut ext = vec![0f64; line_len + 2 * radius];
    let mut line = vec![0f32; line_len];

    let lines = match axis {
        Axis::X => h,
        Axis::Y => w,
    };
    for l in 0..lines {
        match axis {
            Axis::X => line.copy_from_slice(input.row(l)),
            Axis::Y => {
                for (y, v) in line.iter_mut().enumerate() {
                    *v = input.data[y * input.stride + l];
                }
            }
        }
        extend_line(&line, radius, boundary, &mut ext);

        for i in 0..line_len {
            let window = &ext[i..i + taps.len()];
            let acc: f64 = window
                .iter()
                .zip(taps)
                .map(|(&s, &t)| s * t as f64)
                .sum();
            match axis {
                Axis::X => out.data[l * w + i] = acc as f32,
                Axis::Y => out.data[i * w + l] = acc as f32,
            }
        }
    }
    out
}

fn extend_line(line: &[f32], radius: usize, boundary: BoundaryMode, ext: &mut [f64]) {
    let n = line.len();
    for (k, slot) in ext.iter_mut().enumerate() {
        let i = k as isize - radius as isize;
        *slot = match boundary.resolve(i, n) {
            Some(idx) => line[idx] as f64,
            None => boundary.fill() as f64,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn central_difference_along_each_axis() {
        // value = 10 * y + x
        let img = ImageF32::from_fn(4, 3, |x, y| (10 * y + x) as f32);
        let dx = correlate1d(&img, &CENTRAL_DIFFERENCE, Axis::X, BoundaryMode::Reflect);
        let dy = correlate1d(&img, &CENTRAL_DIFFERENCE, Axis::Y, BoundaryMode::Reflect);
        // interior: in[i+1] - in[i-1]
        assert_eq!(dx.get(1, 1), 2.0);
        assert_eq!(dy.get(2, 1), 20.0);
        // reflect at the left edge: in[1] - in[0]
        assert_eq!(dx.get(0, 0), 1.0);
        assert_eq!(dy.get(0, 2), 10.0);
    }

    #[test]
    fn constant_boundary_uses_fill_value() {
        let img = ImageF32::filled(3, 1, 1.0);
        let sum = correlate1d(&img, &PREWITT_SMOOTH, Axis::X, BoundaryMode::Constant(5.0));
        assert_eq!(sum.data, vec![7.0, 3.0, 7.0]);
    }

    #[test]
    fn single_tap_identity_preserves_plane() {
        let img = ImageF32::from_fn(5, 2, |x, y| (x * y) as f32 + 0.5);
        let one = StaticSeparableFilter::new(&[1.0]);
        assert_eq!(correlate1d(&img, &one, Axis::Y, BoundaryMode::Wrap), img);
    }
}
