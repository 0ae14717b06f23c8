//! Boundary extension rules for 1-D correlation.
use serde::{Deserialize, Serialize};

/// How samples outside the grid are synthesized.
///
/// The index rules match the conventions used by common n-d image libraries,
/// with `Reflect` as the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// `d c b a | a b c d | d c b a` (half-sample symmetric)
    #[default]
    Reflect,
    /// `a a a a | a b c d | d d d d`
    Nearest,
    /// `d c b | a b c d | c b a` (whole-sample symmetric)
    Mirror,
    /// `a b c d | a b c d | a b c d` (periodic)
    Wrap,
    /// `k k k k | a b c d | k k k k`
    Constant(f32),
}

impl BoundaryMode {
    /// Map a possibly out-of-range index onto `0..n`. `None` means "use the
    /// constant fill value".
    #[inline]
    pub fn resolve(self, i: isize, n: usize) -> Option<usize> {
        debug_assert!(n > 0);
        let n_i = n as isize;
        if (0..n_i).contains(&i) {
            return Some(i as usize);
        }
        let idx = match self {
            BoundaryMode::Constant(_) => return None,
            BoundaryMode::Nearest => i.clamp(0, n_i - 1),
            BoundaryMode::Wrap => i.rem_euclid(n_i),
            BoundaryMode::Reflect => {
                let m = i.rem_euclid(2 * n_i);
                if m < n_i {
                    m
                } else {
                    2 * n_i - 1 - m
                }
            }
            BoundaryMode::Mirror => {
                if n == 1 {
                    0
                } else {
                    let period = 2 * n_i - 2;
                    let m = i.rem_euclid(period);
                    if m < n_i {
                        m
                    } else {
                        period - m
                    }
                }
            }
        };
        Some(idx as usize)
    }

    /// Fill value used where `resolve` yields `None`.
    #[inline]
    pub fn fill(self) -> f32 {
        match self {
            BoundaryMode::Constant(k) => k,
            _ => 0.0,
        }
    }
}
