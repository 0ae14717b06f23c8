use xray_edges::image::ImageF32;
use xray_edges::PlanarImage;

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            img[y * width + x] = if sum & 1 == 0 { 32 } else { 220 };
        }
    }
    img
}

/// Grayscale checkerboard as a single-plane float image (0..=255 scale).
pub fn checkerboard_image(width: usize, height: usize, cell: usize) -> PlanarImage {
    let data = checkerboard_u8(width, height, cell)
        .into_iter()
        .map(f32::from)
        .collect();
    PlanarImage::from_shape_vec(&[height, width], data).expect("valid checkerboard shape")
}

/// Dark left half, bright right half: one vertical edge at `width / 2`.
pub fn vertical_step(width: usize, height: usize, lo: f32, hi: f32) -> PlanarImage {
    let plane = ImageF32::from_fn(width, height, |x, _| if x < width / 2 { lo } else { hi });
    PlanarImage::from_plane(plane).expect("non-empty step image")
}

pub fn constant(width: usize, height: usize, value: f32) -> PlanarImage {
    PlanarImage::from_plane(ImageF32::filled(width, height, value)).expect("non-empty image")
}
