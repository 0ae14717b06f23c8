use xray_edges::image::ImageU8;
use xray_edges::{compute_edge_map, EdgeMethod, PlanarImage};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Demo: a synthetic 8-bit checkerboard through every edge method
    let (w, h, cell) = (256usize, 192usize, 32usize);
    let gray: Vec<u8> = (0..w * h)
        .map(|i| {
            let (x, y) = (i % w, i / w);
            if (x / cell + y / cell) % 2 == 0 {
                32
            } else {
                220
            }
        })
        .collect();
    let view = ImageU8 {
        w,
        h,
        stride: w,
        data: &gray,
    };
    let image = PlanarImage::from_gray_u8(view)?;

    let methods = [
        EdgeMethod::PrewittHypot {
            presmooth_sigma: Some(0.05),
        },
        EdgeMethod::GaussianGradientMagnitude { sigma: 2.0 },
        EdgeMethod::LaplacianOfGaussian { sigma: 1.0 },
        EdgeMethod::SobelHypot,
    ];
    for method in methods {
        let map = compute_edge_map(&image, method)?;
        let (lo, hi) = map.value_range();
        println!(
            "{:<42} shape={:?} min={lo:.3} max={hi:.3} normalization={:?}",
            method.label(),
            map.shape(),
            map.normalization
        );
    }
    Ok(())
}
