//! Multi-channel image stored as one `ImageF32` plane per channel.
//!
//! A `PlanarImage` is the grid every edge method consumes and produces. It
//! remembers whether it was built from a 2-D `(H, W)` or a 3-D `(H, W, C)`
//! shape so results report the same shape they were given.
use super::{ImageF32, ImageU8, ImageView};
use crate::error::EdgeError;

#[derive(Clone, Debug, PartialEq)]
pub struct PlanarImage {
    w: usize,
    h: usize,
    stacked: bool,
    planes: Vec<ImageF32>,
}

/// Check a plane's stride and storage; returns it repacked with `stride == w`.
fn packed(plane: ImageF32) -> Result<ImageF32, EdgeError> {
    let (w, h, stride) = (plane.w, plane.h, plane.stride);
    if w == 0 || h == 0 {
        return Err(EdgeError::InvalidInput(format!("image is empty ({w}x{h})")));
    }
    if stride < w {
        return Err(EdgeError::InvalidInput(format!(
            "row stride {stride} is smaller than width {w}"
        )));
    }
    let needed = stride
        .checked_mul(h - 1)
        .and_then(|n| n.checked_add(w))
        .ok_or_else(|| EdgeError::InvalidInput(format!("{w}x{h} plane overflows usize")))?;
    if plane.data.len() < needed {
        return Err(EdgeError::InvalidInput(format!(
            "{w}x{h} plane with stride {stride} needs {needed} samples, got {}",
            plane.data.len()
        )));
    }
    if stride == w && plane.data.len() == needed {
        return Ok(plane);
    }
    Ok(ImageF32::from_fn(w, h, |x, y| plane.data[y * stride + x]))
}

impl PlanarImage {
    /// Single-channel image from one plane.
    pub fn from_plane(plane: ImageF32) -> Result<Self, EdgeError> {
        let plane = packed(plane)?;
        Ok(Self {
            w: plane.w,
            h: plane.h,
            stacked: false,
            planes: vec![plane],
        })
    }

    /// Channel-stacked image; every plane must share the same non-empty shape.
    pub fn from_planes(planes: Vec<ImageF32>) -> Result<Self, EdgeError> {
        let planes = planes
            .into_iter()
            .map(packed)
            .collect::<Result<Vec<_>, _>>()?;
        let first = planes
            .first()
            .ok_or_else(|| EdgeError::InvalidInput("image has no channels".to_string()))?;
        let (w, h) = (first.w, first.h);
        if let Some(bad) = planes.iter().find(|p| p.w != w || p.h != h) {
            return Err(EdgeError::InvalidInput(format!(
                "channel planes disagree in shape: {w}x{h} vs {}x{}",
                bad.w, bad.h
            )));
        }
        Ok(Self {
            w,
            h,
            stacked: true,
            planes,
        })
    }

    /// Build from row-major data shaped `(H, W)` or `(H, W, C)` with channels
    /// interleaved, the layout decoders and array libraries hand out.
    pub fn from_shape_vec(shape: &[usize], data: Vec<f32>) -> Result<Self, EdgeError> {
        let (h, w, c) = match *shape {
            [h, w] => (h, w, 1),
            [h, w, c] => (h, w, c),
            _ if shape.len() < 2 => {
                return Err(EdgeError::InvalidInput(format!(
                    "image needs at least 2 dimensions, got {}",
                    shape.len()
                )))
            }
            _ => {
                return Err(EdgeError::InvalidInput(format!(
                    "image has {} dimensions; at most 3 (H, W, C) are supported",
                    shape.len()
                )))
            }
        };
        if h == 0 || w == 0 || c == 0 {
            return Err(EdgeError::InvalidInput(format!(
                "image is empty (shape {shape:?})"
            )));
        }
        let expected = h * w * c;
        if data.len() != expected {
            return Err(EdgeError::InvalidInput(format!(
                "shape {shape:?} needs {expected} samples, got {}",
                data.len()
            )));
        }

        if shape.len() == 2 {
            let plane = ImageF32 {
                w,
                h,
                stride: w,
                data,
            };
            return Self::from_plane(plane);
        }

        let mut planes: Vec<ImageF32> = (0..c).map(|_| ImageF32::new(w, h)).collect();
        for (i, px) in data.chunks_exact(c).enumerate() {
            for (plane, &v) in planes.iter_mut().zip(px) {
                plane.data[i] = v;
            }
        }
        Self::from_planes(planes)
    }

    /// Single-channel image from an 8-bit grayscale view (values stay 0..=255).
    pub fn from_gray_u8(gray: ImageU8<'_>) -> Result<Self, EdgeError> {
        Self::from_plane(gray.to_f32())
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn channels(&self) -> usize {
        self.planes.len()
    }

    /// `[H, W]` for 2-D images, `[H, W, C]` for channel-stacked ones.
    pub fn shape(&self) -> Vec<usize> {
        if self.stacked {
            vec![self.h, self.w, self.planes.len()]
        } else {
            vec![self.h, self.w]
        }
    }

    pub fn plane(&self, channel: usize) -> &ImageF32 {
        &self.planes[channel]
    }

    pub fn planes(&self) -> &[ImageF32] {
        &self.planes
    }

    pub(crate) fn planes_mut(&mut self) -> &mut [ImageF32] {
        &mut self.planes
    }

    /// First NaN or infinite sample as `(x, y, channel, value)`.
    pub fn first_non_finite(&self) -> Option<(usize, usize, usize, f32)> {
        for (c, plane) in self.planes.iter().enumerate() {
            for (y, row) in plane.rows().enumerate() {
                if let Some(x) = row.iter().position(|v| !v.is_finite()) {
                    return Some((x, y, c, row[x]));
                }
            }
        }
        None
    }

    /// Reject grids holding NaN or infinite samples.
    pub fn ensure_finite(&self) -> Result<(), EdgeError> {
        match self.first_non_finite() {
            Some((x, y, c, v)) => Err(EdgeError::InvalidInput(format!(
                "non-finite sample {v} at (x={x}, y={y}, c={c})"
            ))),
            None => Ok(()),
        }
    }

    /// Apply `f` to every channel plane, keeping this image's shape.
    pub fn map_planes<F>(&self, f: F) -> Result<PlanarImage, EdgeError>
    where
        F: Fn(&ImageF32) -> Result<ImageF32, EdgeError>,
    {
        let planes = self
            .planes
            .iter()
            .map(|p| f(p).and_then(packed))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(bad) = planes.iter().find(|p| p.w != self.w || p.h != self.h) {
            return Err(EdgeError::InvalidInput(format!(
                "filter changed plane shape from {}x{} to {}x{}",
                self.w, self.h, bad.w, bad.h
            )));
        }
        Ok(PlanarImage {
            w: self.w,
            h: self.h,
            stacked: self.stacked,
            planes,
        })
    }

    /// Smallest and largest sample over all channels.
    pub fn min_max(&self) -> (f32, f32) {
        self.planes
            .iter()
            .filter_map(ImageF32::min_max)
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), (a, b)| {
                (lo.min(a), hi.max(b))
            })
    }
}
