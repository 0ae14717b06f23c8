//! Edge maps: directional-derivative magnitudes and Gaussian-derivative
//! responses over a [`PlanarImage`](crate::image::PlanarImage).
//!
//! - [`grad`]: Prewitt/Sobel derivatives along both axes combined with
//!   `hypot`.
//! - [`gaussian`]: Gaussian gradient magnitude and Laplacian of Gaussian.
//! - [`normalize`]: rescale a magnitude grid so its maximum is 255.
//! - [`computer`]: the tagged [`EdgeMethod`] dispatch, parameter validation
//!   and the zero-maximum policy (a flat response stays all zero).
//!
//! Every method is a pure function of the image and its parameters; output
//! shape always equals input shape.

pub mod computer;
pub mod gaussian;
pub mod grad;
pub mod method;
pub mod normalize;

pub use computer::{compute_edge_map, EdgeMap, EdgeMapComputer, EdgeOptions, Normalization};
pub use grad::{image_gradients, Grad, GradientKernel};
pub use method::EdgeMethod;
pub use normalize::{rescale_to_max, DISPLAY_MAX};
