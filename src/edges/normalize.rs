//! Display rescaling of magnitude grids.
use crate::error::EdgeError;
use crate::image::{ImageViewMut, PlanarImage};

/// Value the largest magnitude maps to after rescaling.
pub const DISPLAY_MAX: f32 = 255.0;

/// Rescale every sample so the grid's maximum becomes `target`.
///
/// Samples map as `v / max · target`, so the maximum lands on `target`
/// exactly and nothing exceeds it. Returns the effective scale
/// `target / max`. A maximum that is zero, negative or not finite leaves the
/// grid untouched and reports [`EdgeError::DegenerateNormalization`].
pub fn rescale_to_max(grid: &mut PlanarImage, target: f32) -> Result<f32, EdgeError> {
    let (_, max) = grid.min_max();
    if !(max.is_finite() && max > 0.0) {
        return Err(EdgeError::DegenerateNormalization { max });
    }
    for plane in grid.planes_mut() {
        for y in 0..plane.h {
            for v in plane.row_mut(y) {
                *v = *v / max * target;
            }
        }
    }
    Ok(target / max)
}
