//! Colormaps for single-channel panels.
//!
//! Piecewise-linear maps are given as anchor tables `(position, value)` per
//! channel; `prism` is defined by sinusoids. Inputs are scalars in `[0, 1]`
//! (clamped).
use serde::{Deserialize, Serialize};
use std::fmt;

type Anchors = &'static [(f32, f32)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Colormap {
    #[serde(rename = "gray")]
    Gray,
    #[serde(rename = "prism")]
    Prism,
    #[serde(rename = "nipy_spectral")]
    NipySpectral,
    #[serde(rename = "terrain")]
    Terrain,
    #[serde(rename = "CMRmap")]
    CmrMap,
}

const NIPY_RED: Anchors = &[
    (0.00, 0.0),
    (0.05, 0.4667),
    (0.10, 0.5333),
    (0.15, 0.0),
    (0.60, 0.0),
    (0.65, 0.7333),
    (0.70, 0.9333),
    (0.75, 1.0),
    (0.85, 1.0),
    (0.90, 0.8667),
    (0.95, 0.80),
    (1.00, 0.80),
];
const NIPY_GREEN: Anchors = &[
    (0.00, 0.0),
    (0.20, 0.0),
    (0.25, 0.4667),
    (0.30, 0.6),
    (0.35, 0.6667),
    (0.40, 0.6667),
    (0.45, 0.6),
    (0.50, 0.7333),
    (0.55, 0.8667),
    (0.60, 1.0),
    (0.65, 1.0),
    (0.70, 0.9333),
    (0.75, 0.8),
    (0.80, 0.6),
    (0.85, 0.0),
    (0.95, 0.0),
    (1.00, 0.80),
];
const NIPY_BLUE: Anchors = &[
    (0.00, 0.0),
    (0.05, 0.5333),
    (0.10, 0.6),
    (0.15, 0.6667),
    (0.20, 0.8667),
    (0.30, 0.8667),
    (0.35, 0.6667),
    (0.40, 0.5333),
    (0.45, 0.0),
    (0.95, 0.0),
    (1.00, 0.80),
];

const TERRAIN_RED: Anchors = &[
    (0.00, 0.2),
    (0.15, 0.0),
    (0.25, 0.0),
    (0.50, 1.0),
    (0.75, 0.5),
    (1.00, 1.0),
];
const TERRAIN_GREEN: Anchors = &[
    (0.00, 0.2),
    (0.15, 0.6),
    (0.25, 0.8),
    (0.50, 1.0),
    (0.75, 0.36),
    (1.00, 1.0),
];
const TERRAIN_BLUE: Anchors = &[
    (0.00, 0.6),
    (0.15, 1.0),
    (0.25, 0.4),
    (0.50, 0.6),
    (0.75, 0.33),
    (1.00, 1.0),
];

const CMR_RED: Anchors = &[
    (0.000, 0.00),
    (0.125, 0.15),
    (0.250, 0.30),
    (0.375, 0.60),
    (0.500, 1.00),
    (0.625, 0.90),
    (0.750, 0.90),
    (0.875, 0.90),
    (1.000, 1.00),
];
const CMR_GREEN: Anchors = &[
    (0.000, 0.00),
    (0.125, 0.15),
    (0.250, 0.15),
    (0.375, 0.20),
    (0.500, 0.25),
    (0.625, 0.50),
    (0.750, 0.75),
    (0.875, 0.90),
    (1.000, 1.00),
];
const CMR_BLUE: Anchors = &[
    (0.000, 0.00),
    (0.125, 0.50),
    (0.250, 0.75),
    (0.375, 0.50),
    (0.500, 0.15),
    (0.625, 0.00),
    (0.750, 0.10),
    (0.875, 0.50),
    (1.000, 1.00),
];

fn interpolate(anchors: Anchors, t: f32) -> f32 {
    let i = anchors.partition_point(|&(x, _)| x <= t);
    if i == 0 {
        return anchors[0].1;
    }
    if i >= anchors.len() {
        return anchors[anchors.len() - 1].1;
    }
    let (x0, y0) = anchors[i - 1];
    let (x1, y1) = anchors[i];
    y0 + (y1 - y0) * (t - x0) / (x1 - x0)
}

fn prism(t: f32) -> [f32; 3] {
    use std::f32::consts::PI;
    let p = t * 20.9;
    [
        0.75 * ((p + 0.25) * PI).sin() + 0.67,
        0.75 * ((p - 0.25) * PI).sin() + 0.33,
        -1.1 * (p * PI).sin(),
    ]
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Colormap {
    pub const ALL: [Colormap; 5] = [
        Colormap::Gray,
        Colormap::Prism,
        Colormap::NipySpectral,
        Colormap::Terrain,
        Colormap::CmrMap,
    ];

    /// Name as used in configs and panel titles.
    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Gray => "gray",
            Colormap::Prism => "prism",
            Colormap::NipySpectral => "nipy_spectral",
            Colormap::Terrain => "terrain",
            Colormap::CmrMap => "CMRmap",
        }
    }

    /// RGB color for a scalar in `[0, 1]`.
    pub fn rgb(&self, t: f32) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let [r, g, b] = match self {
            Colormap::Gray => [t, t, t],
            Colormap::Prism => prism(t),
            Colormap::NipySpectral => [
                interpolate(NIPY_RED, t),
                interpolate(NIPY_GREEN, t),
                interpolate(NIPY_BLUE, t),
            ],
            Colormap::Terrain => [
                interpolate(TERRAIN_RED, t),
                interpolate(TERRAIN_GREEN, t),
                interpolate(TERRAIN_BLUE, t),
            ],
            Colormap::CmrMap => [
                interpolate(CMR_RED, t),
                interpolate(CMR_GREEN, t),
                interpolate(CMR_BLUE, t),
            ],
        };
        [to_u8(r), to_u8(g), to_u8(b)]
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
