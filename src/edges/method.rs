use crate::error::EdgeError;
use crate::filters::kernels::check_positive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Edge filter selection, each variant carrying its own parameters.
///
/// Serialized with a `method` tag, e.g.
/// `{"method": "gaussian_gradient_magnitude", "sigma": 2.0}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum EdgeMethod {
    /// Prewitt gradient magnitude, optionally after frequency-domain Gaussian
    /// pre-smoothing. No non-maximum suppression or hysteresis.
    PrewittHypot {
        #[serde(default)]
        presmooth_sigma: Option<f64>,
    },
    /// Gradient magnitude of the Gaussian-smoothed image.
    GaussianGradientMagnitude { sigma: f64 },
    /// Laplacian of the Gaussian-smoothed image (signed).
    LaplacianOfGaussian { sigma: f64 },
    /// Sobel-Feldman gradient magnitude.
    SobelHypot,
}

impl EdgeMethod {
    /// Check the smoothing scales without touching any pixels.
    pub fn validate(&self) -> Result<(), EdgeError> {
        match *self {
            EdgeMethod::PrewittHypot {
                presmooth_sigma: Some(sigma),
            } => check_positive("presmooth_sigma", sigma),
            EdgeMethod::GaussianGradientMagnitude { sigma }
            | EdgeMethod::LaplacianOfGaussian { sigma } => check_positive("sigma", sigma),
            EdgeMethod::PrewittHypot {
                presmooth_sigma: None,
            }
            | EdgeMethod::SobelHypot => Ok(()),
        }
    }

    /// Only the Laplacian can produce negative samples.
    pub fn is_signed(&self) -> bool {
        matches!(self, EdgeMethod::LaplacianOfGaussian { .. })
    }

    /// The hypot-combined methods are always rescaled for display.
    pub fn always_rescaled(&self) -> bool {
        matches!(
            self,
            EdgeMethod::PrewittHypot { .. } | EdgeMethod::SobelHypot
        )
    }

    /// Short human-readable name for panel titles and logs.
    pub fn label(&self) -> &'static str {
        match self {
            EdgeMethod::PrewittHypot {
                presmooth_sigma: Some(_),
            } => "Prewitt gradient (Gaussian pre-smoothed)",
            EdgeMethod::PrewittHypot {
                presmooth_sigma: None,
            } => "Prewitt gradient",
            EdgeMethod::GaussianGradientMagnitude { .. } => "Gaussian gradient",
            EdgeMethod::LaplacianOfGaussian { .. } => "Laplacian-Gaussian",
            EdgeMethod::SobelHypot => "Sobel",
        }
    }
}

impl fmt::Display for EdgeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeMethod::PrewittHypot {
                presmooth_sigma: Some(s),
            } => write!(f, "prewitt_hypot(presmooth_sigma={s})"),
            EdgeMethod::PrewittHypot {
                presmooth_sigma: None,
            } => write!(f, "prewitt_hypot"),
            EdgeMethod::GaussianGradientMagnitude { sigma } => {
                write!(f, "gaussian_gradient_magnitude(sigma={sigma})")
            }
            EdgeMethod::LaplacianOfGaussian { sigma } => {
                write!(f, "laplacian_of_gaussian(sigma={sigma})")
            }
            EdgeMethod::SobelHypot => write!(f, "sobel_hypot"),
        }
    }
}
