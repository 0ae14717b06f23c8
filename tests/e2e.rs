mod common;

use common::synthetic_image::{checkerboard_image, checkerboard_u8, constant, vertical_step};
use xray_edges::filters::BoundaryMode;
use xray_edges::image::io::load_image;
use xray_edges::image::{ImageF32, ImageU8, ImageView};
use xray_edges::prelude::*;
use xray_edges::render::TITLE_STRIP;
use xray_edges::{EdgeError, Normalization};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn all_methods() -> [EdgeMethod; 4] {
    [
        EdgeMethod::PrewittHypot {
            presmooth_sigma: Some(0.05),
        },
        EdgeMethod::GaussianGradientMagnitude { sigma: 2.0 },
        EdgeMethod::LaplacianOfGaussian { sigma: 1.0 },
        EdgeMethod::SobelHypot,
    ]
}

fn samples(image: &PlanarImage) -> Vec<f32> {
    image
        .planes()
        .iter()
        .flat_map(|p| p.rows().flatten().copied().collect::<Vec<_>>())
        .collect()
}

#[test]
fn every_method_preserves_shape() {
    init_logger();
    let image = checkerboard_image(64, 48, 8);
    for method in all_methods() {
        let map = compute_edge_map(&image, method).unwrap();
        assert_eq!(map.shape(), vec![48, 64], "{method}");
        assert_eq!(map.method, method);
    }
}

#[test]
fn hypot_methods_span_zero_to_exactly_255() {
    init_logger();
    let image = checkerboard_image(64, 48, 8);
    for method in [
        EdgeMethod::PrewittHypot {
            presmooth_sigma: Some(0.05),
        },
        EdgeMethod::PrewittHypot {
            presmooth_sigma: None,
        },
        EdgeMethod::SobelHypot,
    ] {
        let map = compute_edge_map(&image, method).unwrap();
        let (lo, hi) = map.value_range();
        assert!(lo >= 0.0, "{method}: min {lo}");
        assert_eq!(hi, 255.0, "{method}");
        assert!(matches!(map.normalization, Normalization::Rescaled { .. }));
    }
}

#[test]
fn sobel_on_vertical_step_marks_the_two_boundary_columns() {
    init_logger();
    let image = vertical_step(16, 8, 10.0, 90.0);
    let map = compute_edge_map(&image, EdgeMethod::SobelHypot).unwrap();
    let plane = map.grid().plane(0);
    for y in 0..8 {
        for x in 0..16 {
            let expected = if x == 7 || x == 8 { 255.0 } else { 0.0 };
            assert!(
                (plane.get(x, y) - expected).abs() < 1e-3,
                "({x}, {y}) = {}",
                plane.get(x, y)
            );
        }
    }
}

#[test]
fn only_laplacian_of_gaussian_goes_negative() {
    init_logger();
    let image = vertical_step(32, 16, 0.0, 200.0);

    let log = compute_edge_map(&image, EdgeMethod::LaplacianOfGaussian { sigma: 1.0 }).unwrap();
    let (lo, hi) = log.value_range();
    assert!(lo < 0.0 && hi > 0.0, "LoG range [{lo}, {hi}]");
    assert_eq!(log.normalization, Normalization::Raw);

    let ggm = compute_edge_map(&image, EdgeMethod::GaussianGradientMagnitude { sigma: 2.0 })
        .unwrap();
    assert!(ggm.value_range().0 >= 0.0);
    assert_eq!(ggm.normalization, Normalization::Raw);
}

#[test]
fn gaussian_gradient_rescales_only_when_asked() {
    init_logger();
    let image = vertical_step(32, 16, 0.0, 200.0);
    let computer = EdgeMapComputer::new(EdgeOptions {
        normalize_gaussian_gradient: true,
        ..Default::default()
    });
    let map = computer
        .compute(&image, EdgeMethod::GaussianGradientMagnitude { sigma: 2.0 })
        .unwrap();
    assert_eq!(map.value_range().1, 255.0);

    // LoG ignores the switch
    let log = computer
        .compute(&image, EdgeMethod::LaplacianOfGaussian { sigma: 1.0 })
        .unwrap();
    assert_eq!(log.normalization, Normalization::Raw);
}

#[test]
fn flat_image_gives_all_zero_sobel_without_error() {
    init_logger();
    let image = constant(4, 4, 100.0);
    let map = compute_edge_map(&image, EdgeMethod::SobelHypot).unwrap();
    assert_eq!(map.shape(), vec![4, 4]);
    assert!(samples(map.grid()).iter().all(|&v| v == 0.0));
    assert_eq!(map.normalization, Normalization::Degenerate);
}

#[test]
fn non_positive_sigmas_are_rejected() {
    init_logger();
    let image = checkerboard_image(16, 16, 4);
    for method in [
        EdgeMethod::GaussianGradientMagnitude { sigma: 0.0 },
        EdgeMethod::GaussianGradientMagnitude { sigma: -1.0 },
        EdgeMethod::LaplacianOfGaussian { sigma: 0.0 },
        EdgeMethod::LaplacianOfGaussian { sigma: f64::NAN },
        EdgeMethod::PrewittHypot {
            presmooth_sigma: Some(0.0),
        },
    ] {
        let err = compute_edge_map(&image, method).unwrap_err();
        assert!(
            matches!(err, EdgeError::InvalidParameter { .. }),
            "{method:?}: {err}"
        );
    }

    let bad_truncate = EdgeMapComputer::new(EdgeOptions {
        truncate: 0.0,
        ..Default::default()
    });
    assert!(matches!(
        bad_truncate.compute(&image, EdgeMethod::SobelHypot),
        Err(EdgeError::InvalidParameter { .. })
    ));
}

#[test]
fn huge_sigma_is_a_parameter_error_not_a_panic() {
    init_logger();
    let image = constant(4, 4, 1.0);
    for method in [
        EdgeMethod::LaplacianOfGaussian { sigma: 1e300 },
        EdgeMethod::GaussianGradientMagnitude { sigma: 1e9 },
    ] {
        assert!(matches!(
            compute_edge_map(&image, method),
            Err(EdgeError::InvalidParameter { name: "sigma", .. })
        ));
    }
}

#[test]
fn malformed_grids_are_invalid_input() {
    init_logger();
    assert!(matches!(
        PlanarImage::from_shape_vec(&[5], vec![0.0; 5]),
        Err(EdgeError::InvalidInput(_))
    ));
    let hollow = ImageF32 {
        w: 4,
        h: 4,
        stride: 4,
        data: vec![],
    };
    assert!(matches!(
        PlanarImage::from_plane(hollow),
        Err(EdgeError::InvalidInput(_))
    ));
    let nan = PlanarImage::from_shape_vec(&[2, 2], vec![1.0, f32::NAN, 0.0, 0.0]).unwrap();
    assert!(matches!(
        compute_edge_map(&nan, EdgeMethod::SobelHypot),
        Err(EdgeError::InvalidInput(_))
    ));
}

#[test]
fn channels_are_filtered_independently_and_share_one_scale() {
    init_logger();
    let (w, h) = (12usize, 6usize);
    let mut data = Vec::with_capacity(w * h * 3);
    for _y in 0..h {
        for x in 0..w {
            let step = if x < w / 2 { 0.0 } else { 1.0 };
            data.extend_from_slice(&[50.0 * step, 100.0 * step, 0.0]);
        }
    }
    let image = PlanarImage::from_shape_vec(&[h, w, 3], data).unwrap();
    let map = compute_edge_map(&image, EdgeMethod::SobelHypot).unwrap();
    assert_eq!(map.shape(), vec![h, w, 3]);

    let max_of = |c: usize| map.grid().plane(c).min_max().unwrap().1;
    assert_eq!(max_of(1), 255.0);
    assert!((max_of(0) - 127.5).abs() < 1e-3);
    assert_eq!(max_of(2), 0.0);
}

#[test]
fn boundary_mode_changes_border_response() {
    init_logger();
    // Bright column at the left border only.
    let image = PlanarImage::from_shape_vec(
        &[3, 4],
        vec![
            9.0, 0.0, 0.0, 0.0, //
            9.0, 0.0, 0.0, 0.0, //
            9.0, 0.0, 0.0, 0.0,
        ],
    )
    .unwrap();
    let reflect = compute_edge_map(&image, EdgeMethod::SobelHypot).unwrap();
    let constant = EdgeMapComputer::new(EdgeOptions {
        boundary: BoundaryMode::Constant(0.0),
        ..Default::default()
    })
    .compute(&image, EdgeMethod::SobelHypot)
    .unwrap();
    // Reflect repeats the bright column, so the border sample sees the drop
    // to its right; a zero pad on the left makes the central difference flat.
    assert!(reflect.grid().plane(0).get(0, 1) > 0.0);
    assert_eq!(constant.grid().plane(0).get(0, 1), 0.0);
}

#[test]
fn gray_u8_view_feeds_the_computer() {
    init_logger();
    let (w, h) = (40usize, 30usize);
    let buffer = checkerboard_u8(w, h, 10);
    let view = ImageU8 {
        w,
        h,
        stride: w,
        data: &buffer,
    };
    let image = PlanarImage::from_gray_u8(view).unwrap();
    assert_eq!(image.plane(0).get(0, 0), 32.0);
    assert_eq!(image.plane(0).get(10, 0), 220.0);
    let map = compute_edge_map(&image, EdgeMethod::LaplacianOfGaussian { sigma: 1.0 }).unwrap();
    assert_eq!(map.shape(), vec![h, w]);
}

#[test]
fn figure_renders_to_png_with_manifest_and_reloads() {
    init_logger();
    let dir = std::env::temp_dir().join(format!("xray_edges_e2e_{}", std::process::id()));
    let path = dir.join("sobel.png");
    let image = checkerboard_image(32, 24, 8);
    let map = compute_edge_map(&image, EdgeMethod::SobelHypot).unwrap();

    let mut renderer = PngRenderer::new(&path).with_gutter(4);
    renderer
        .render(&[
            Panel::new(&image, Colormap::Gray, "Original"),
            Panel::new(map.grid(), Colormap::Gray, "Sobel (edges) - gray"),
            Panel::new(map.grid(), Colormap::CmrMap, "Sobel (edges) - CMRmap"),
        ])
        .unwrap();

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path.with_extension("json")).unwrap())
            .unwrap();
    // the title strip exists only when the host has a usable font
    let strip = manifest["titleHeight"].as_u64().unwrap() as usize;
    assert!(strip == 0 || strip == TITLE_STRIP as usize);

    let composite = load_image(&path).unwrap();
    assert_eq!(composite.shape(), vec![strip + 24, 32 * 3 + 4 * 2, 3]);

    let panels = manifest["panels"].as_array().unwrap();
    assert_eq!(panels.len(), 3);
    assert_eq!(panels[2]["colormap"], "CMRmap");
    assert_eq!(panels[1]["x"], 36);
    assert_eq!(panels[1]["y"], strip);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn untitled_figure_is_exactly_the_panels() {
    let dir = std::env::temp_dir().join(format!("xray_edges_e2e_plain_{}", std::process::id()));
    let path = dir.join("plain.png");
    let image = checkerboard_image(16, 12, 4);
    PngRenderer::new(&path)
        .without_titles()
        .without_manifest()
        .with_gutter(2)
        .render(&[
            Panel::new(&image, Colormap::Gray, "Original"),
            Panel::new(&image, Colormap::Terrain, "Original - terrain"),
        ])
        .unwrap();
    assert_eq!(load_image(&path).unwrap().shape(), vec![12, 34, 3]);
    assert!(!path.with_extension("json").exists());
    let _ = std::fs::remove_dir_all(dir);
}
