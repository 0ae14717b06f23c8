//! Sampled Gaussian kernels and their derivatives.
//!
//! Taps are laid out for [`correlate1d`](super::correlate1d), i.e. already
//! mirrored, so an order-1 kernel yields `+∂/∂axis` (positive on a rising
//! ramp).
use super::SeparableFilter;
use crate::error::EdgeError;

/// Largest supported derivative order.
pub const MAX_GAUSSIAN_ORDER: usize = 3;

/// Largest kernel radius (`truncate · sigma`) accepted, in samples.
pub const MAX_GAUSSIAN_RADIUS: usize = 1 << 16;

/// Owned 1-D kernel.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel1D {
    taps: Vec<f32>,
}

impl Kernel1D {
    /// Wrap explicit taps; the length must be odd.
    pub fn new(taps: Vec<f32>) -> Self {
        debug_assert!(taps.len() % 2 == 1);
        Self { taps }
    }

    pub fn radius(&self) -> usize {
        self.taps.len() / 2
    }
}

impl SeparableFilter for Kernel1D {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), EdgeError> {
    if !value.is_finite() {
        return Err(EdgeError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(EdgeError::InvalidParameter {
            name,
            value,
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

/// Gaussian of standard deviation `sigma` (order 0) or its `order`-th
/// derivative, truncated at `truncate` standard deviations.
///
/// Radius is `⌊truncate·σ + 0.5⌋`; the order-0 taps sum to one. Derivative
/// taps are `q(x)·φ(x)` with `φ` the normalized Gaussian and `q` the
/// polynomial obtained by differentiating `φ` `order` times
/// (`q₁ = -x/σ²`, `q₂ = x²/σ⁴ - 1/σ²`, ...).
pub fn gaussian_kernel_1d(sigma: f64, order: usize, truncate: f64) -> Result<Kernel1D, EdgeError> {
    check_positive("sigma", sigma)?;
    check_positive("truncate", truncate)?;
    if order > MAX_GAUSSIAN_ORDER {
        return Err(EdgeError::InvalidParameter {
            name: "order",
            value: order as f64,
            reason: "Gaussian derivative order must be 0-3",
        });
    }

    let radius_f = (truncate * sigma + 0.5).floor();
    if radius_f > MAX_GAUSSIAN_RADIUS as f64 {
        return Err(EdgeError::InvalidParameter {
            name: "sigma",
            value: sigma,
            reason: "kernel radius truncate * sigma exceeds 65536 samples",
        });
    }
    let radius = radius_f as usize;
    let sigma2 = sigma * sigma;
    let positions: Vec<f64> = (0..=2 * radius)
        .map(|k| k as f64 - radius as f64)
        .collect();

    let mut phi: Vec<f64> = positions
        .iter()
        .map(|&x| (-0.5 * x * x / sigma2).exp())
        .collect();
    let total: f64 = phi.iter().sum();
    phi.iter_mut().for_each(|p| *p /= total);

    // Coefficients of q, lowest power first. Differentiating q·φ gives
    // (q' - x q / σ²)·φ.
    let mut q = vec![0f64; order + 1];
    q[0] = 1.0;
    for _ in 0..order {
        let mut next = vec![0f64; order + 1];
        for (i, slot) in next.iter_mut().enumerate() {
            let deriv = if i < order { (i + 1) as f64 * q[i + 1] } else { 0.0 };
            let shift = if i > 0 { -q[i - 1] / sigma2 } else { 0.0 };
            *slot = deriv + shift;
        }
        q = next;
    }

    // Mirror so correlation applies the derivative with a positive sign.
    let taps = positions
        .iter()
        .zip(&phi)
        .rev()
        .map(|(&x, &p)| {
            let poly: f64 = q.iter().rev().fold(0.0, |acc, &c| acc * x + c);
            (poly * p) as f32
        })
        .collect();
    Ok(Kernel1D::new(taps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_follows_truncate_rule() {
        assert_eq!(gaussian_kernel_1d(1.0, 0, 4.0).unwrap().radius(), 4);
        assert_eq!(gaussian_kernel_1d(2.0, 0, 4.0).unwrap().radius(), 8);
        // tiny sigma collapses to a single tap
        let k = gaussian_kernel_1d(0.05, 0, 4.0).unwrap();
        assert_eq!(k.taps(), &[1.0]);
    }

    #[test]
    fn smoothing_kernel_is_normalized_and_symmetric() {
        let k = gaussian_kernel_1d(1.5, 0, 4.0).unwrap();
        let taps = k.taps();
        let sum: f32 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6, "sum = {sum}");
        for (a, b) in taps.iter().zip(taps.iter().rev()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn first_derivative_is_antisymmetric_and_rising() {
        let k = gaussian_kernel_1d(1.0, 1, 4.0).unwrap();
        let taps = k.taps();
        let r = k.radius();
        assert_eq!(taps[r], 0.0);
        for d in 1..=r {
            assert!((taps[r + d] + taps[r - d]).abs() < 1e-7);
        }
        // right-hand taps positive: correlating a ramp gives a positive slope
        assert!(taps[r + 1] > 0.0);
        let slope: f64 = taps
            .iter()
            .enumerate()
            .map(|(k, &t)| t as f64 * (k as f64 - r as f64))
            .sum();
        assert!((slope - 1.0).abs() < 1e-3, "slope = {slope}");
    }

    #[test]
    fn second_derivative_sums_to_zero_with_negative_centre() {
        let k = gaussian_kernel_1d(1.0, 2, 4.0).unwrap();
        let sum: f32 = k.taps().iter().sum();
        assert!(sum.abs() < 1e-3, "sum = {sum}");
        assert!(k.taps()[k.radius()] < 0.0);
    }

    #[test]
    fn oversized_kernels_are_rejected_without_allocating() {
        for (sigma, truncate) in [(1e300, 4.0), (1e6, 4.0), (f64::MAX, f64::MAX)] {
            assert!(matches!(
                gaussian_kernel_1d(sigma, 2, truncate),
                Err(EdgeError::InvalidParameter { name: "sigma", .. })
            ));
        }
        let widest = MAX_GAUSSIAN_RADIUS as f64 / 4.0;
        assert_eq!(
            gaussian_kernel_1d(widest, 0, 4.0).unwrap().radius(),
            MAX_GAUSSIAN_RADIUS
        );
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        for sigma in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                gaussian_kernel_1d(sigma, 0, 4.0),
                Err(EdgeError::InvalidParameter { name: "sigma", .. })
            ));
        }
        assert!(matches!(
            gaussian_kernel_1d(1.0, 0, 0.0),
            Err(EdgeError::InvalidParameter { name: "truncate", .. })
        ));
        assert!(matches!(
            gaussian_kernel_1d(1.0, 4, 4.0),
            Err(EdgeError::InvalidParameter { name: "order", .. })
        ));
    }
}
