//! I/O helpers for images and JSON.
//!
//! - `load_image`: decode a PNG/JPEG/TIFF/BMP into a `PlanarImage`, keeping the
//!   native intensity scale (one plane for grayscale, three for color).
//! - `save_rgb`: write an interleaved RGB8 buffer to PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::PlanarImage;
use crate::error::ImageIoError;
use image::{DynamicImage, RgbImage};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

fn open(path: &Path) -> Result<DynamicImage, ImageIoError> {
    image::open(path).map_err(|source| ImageIoError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Load an image from disk into float planes without rescaling intensities.
///
/// Grayscale formats (with or without alpha) give one plane, everything else
/// gives three RGB planes. Alpha is dropped.
pub fn load_image(path: &Path) -> Result<PlanarImage, ImageIoError> {
    let img = open(path)?;
    let (w, h) = (img.width() as usize, img.height() as usize);
    debug!(
        "load_image: {} {}x{} color={:?}",
        path.display(),
        w,
        h,
        img.color()
    );

    let decoded = match &img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageLumaA8(_) => {
            let data = img.to_luma8().into_raw().into_iter().map(f32::from).collect();
            PlanarImage::from_shape_vec(&[h, w], data)
        }
        DynamicImage::ImageLuma16(_) | DynamicImage::ImageLumaA16(_) => {
            let data = img.to_luma16().into_raw().into_iter().map(f32::from).collect();
            PlanarImage::from_shape_vec(&[h, w], data)
        }
        DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgba16(_) => {
            let data = img.to_rgb16().into_raw().into_iter().map(f32::from).collect();
            PlanarImage::from_shape_vec(&[h, w, 3], data)
        }
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            let data = img.to_rgb32f().into_raw();
            PlanarImage::from_shape_vec(&[h, w, 3], data)
        }
        _ => {
            let data = img.to_rgb8().into_raw().into_iter().map(f32::from).collect();
            PlanarImage::from_shape_vec(&[h, w, 3], data)
        }
    };

    // A decoder that hands back a 0x0 image is treated as corrupt input.
    decoded.map_err(|e| ImageIoError::Decode {
        path: path.to_path_buf(),
        source: image::ImageError::Decoding(image::error::DecodingError::new(
            image::error::ImageFormatHint::Unknown,
            e.to_string(),
        )),
    })
}

/// Save an RGB8 buffer to a PNG.
pub fn save_rgb(image: &RgbImage, path: &Path) -> Result<(), ImageIoError> {
    ensure_parent_dir(path)?;
    image.save(path).map_err(|source| ImageIoError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), ImageIoError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| ImageIoError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| ImageIoError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<(), ImageIoError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ImageIoError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
