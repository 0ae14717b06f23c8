//! Serializable summaries of edge-map runs for tooling.
//!
//! Reports carry shape, value range and normalization of each computed map
//! plus stage timings, and are written as JSON by the CLI.

pub mod timing;

pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};

use crate::edges::{EdgeMap, EdgeMethod, Normalization};
use serde::Serialize;

/// Summary of one computed edge map.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeMapReport {
    pub method: EdgeMethod,
    pub label: &'static str,
    /// Whether negative samples are meaningful (zero crossings mark edges).
    pub signed: bool,
    pub shape: Vec<usize>,
    pub min: f32,
    pub max: f32,
    pub normalization: Normalization,
    pub elapsed_ms: f64,
}

impl EdgeMapReport {
    pub fn new(map: &EdgeMap, elapsed_ms: f64) -> Self {
        let (min, max) = map.value_range();
        Self {
            method: map.method,
            label: map.method.label(),
            signed: map.method.is_signed(),
            shape: map.shape(),
            min,
            max,
            normalization: map.normalization,
            elapsed_ms,
        }
    }
}

/// Summary of one rendered figure.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigureReport {
    pub name: String,
    pub image_path: String,
    pub edge_map: Option<EdgeMapReport>,
    pub panel_titles: Vec<String>,
}

/// Summary of a whole tool run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub input: String,
    pub input_shape: Vec<usize>,
    pub figures: Vec<FigureReport>,
    pub timing: TimingBreakdown,
}
