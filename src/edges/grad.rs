//! Directional derivatives (Prewitt/Sobel) and their Euclidean magnitude.
//!
//! - Runs a separable derivative kernel along axis Y and axis X.
//! - Outputs per-pixel `gy`, `gx` and `mag = sqrt(gx^2 + gy^2)`, all with the
//!   input's shape.
//!
//! Complexity: O(W·H) per pass; memory: three float buffers.
use crate::filters::{prewitt, sobel, Axis, BoundaryMode};
use crate::image::ImageF32;

/// Which 3×3 derivative operator to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradientKernel {
    Prewitt,
    Sobel,
}

/// Per-pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Derivative along axis X (across columns)
    pub gx: ImageF32,
    /// Derivative along axis Y (across rows)
    pub gy: ImageF32,
    /// Euclidean magnitude per pixel: `sqrt(gx^2 + gy^2)`
    pub mag: ImageF32,
}

/// Compute both directional derivatives and their magnitude.
pub fn image_gradients(l: &ImageF32, kernel: GradientKernel, boundary: BoundaryMode) -> Grad {
    let derivative = match kernel {
        GradientKernel::Prewitt => prewitt,
        GradientKernel::Sobel => sobel,
    };
    let gy = derivative(l, Axis::Y, boundary);
    let gx = derivative(l, Axis::X, boundary);
    let mag = gx.zip_map(&gy, f32::hypot);
    Grad { gx, gy, mag }
}
