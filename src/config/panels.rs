//! Config for the `edge_panels` tool: one input image, several figures.
//!
//! Without a `figures` list the tool renders the classic X-ray set: the
//! original alone, Prewitt magnitude (pre-smoothed) in three colormaps,
//! Gaussian gradient, Laplacian of Gaussian, and Sobel in two colormaps.
use super::load_json;
use crate::edges::{EdgeMethod, EdgeOptions};
use crate::error::ConfigError;
use crate::render::{Colormap, DEFAULT_GUTTER};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct PanelToolConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default = "default_figures")]
    pub figures: Vec<FigureConfig>,
    #[serde(default)]
    pub options: EdgeOptions,
    #[serde(default = "default_gutter")]
    pub gutter: u32,
    /// Where to write the run report; defaults to `<output_dir>/report.json`.
    #[serde(default)]
    pub report: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FigureConfig {
    /// File stem for `<name>.png` / `<name>.json`.
    pub name: String,
    /// `None` shows the original image only.
    #[serde(default)]
    pub method: Option<EdgeMethod>,
    #[serde(default = "default_colormaps")]
    pub colormaps: Vec<Colormap>,
    #[serde(default = "default_true")]
    pub show_original: bool,
    /// Base title of the edge panels; defaults to `"<method label> (edges)"`.
    #[serde(default)]
    pub title: Option<String>,
}

/// Where a panel's pixels come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelSource {
    Original,
    EdgeMap,
}

/// Resolved description of one panel of a figure.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelSpec {
    pub source: PanelSource,
    pub colormap: Colormap,
    pub title: String,
}

fn default_true() -> bool {
    true
}

fn default_gutter() -> u32 {
    DEFAULT_GUTTER
}

fn default_colormaps() -> Vec<Colormap> {
    vec![Colormap::Gray]
}

fn figure(name: &str, method: Option<EdgeMethod>, colormaps: &[Colormap]) -> FigureConfig {
    FigureConfig {
        name: name.to_string(),
        method,
        colormaps: colormaps.to_vec(),
        show_original: true,
        title: None,
    }
}

/// The five figures of the classic X-ray edge walkthrough.
pub fn default_figures() -> Vec<FigureConfig> {
    vec![
        figure("xray", None, &[Colormap::Gray]),
        figure(
            "prewitt",
            Some(EdgeMethod::PrewittHypot {
                presmooth_sigma: Some(0.05),
            }),
            &[Colormap::Prism, Colormap::NipySpectral, Colormap::Terrain],
        ),
        figure(
            "gaussian_gradient",
            Some(EdgeMethod::GaussianGradientMagnitude { sigma: 2.0 }),
            &[Colormap::Gray],
        ),
        figure(
            "laplacian_gaussian",
            Some(EdgeMethod::LaplacianOfGaussian { sigma: 1.0 }),
            &[Colormap::Gray],
        ),
        figure(
            "sobel",
            Some(EdgeMethod::SobelHypot),
            &[Colormap::Gray, Colormap::CmrMap],
        ),
    ]
}

impl FigureConfig {
    /// Panels in display order: the original first (if shown), then one edge
    /// panel per colormap.
    pub fn panel_specs(&self) -> Vec<PanelSpec> {
        let mut specs = Vec::new();
        if self.show_original || self.method.is_none() {
            specs.push(PanelSpec {
                source: PanelSource::Original,
                colormap: Colormap::Gray,
                title: "Original".to_string(),
            });
        }
        let Some(method) = self.method else {
            return specs;
        };
        let base = self
            .title
            .clone()
            .unwrap_or_else(|| format!("{} (edges)", method.label()));
        let many = self.colormaps.len() > 1;
        for &colormap in &self.colormaps {
            let title = if many {
                format!("{base} - {colormap}")
            } else {
                base.clone()
            };
            specs.push(PanelSpec {
                source: PanelSource::EdgeMap,
                colormap,
                title,
            });
        }
        specs
    }
}

impl PanelToolConfig {
    pub fn report_path(&self) -> PathBuf {
        self.report
            .clone()
            .unwrap_or_else(|| self.output_dir.join("report.json"))
    }

    pub fn figure_path(&self, figure: &FigureConfig) -> PathBuf {
        self.output_dir.join(format!("{}.png", figure.name))
    }

    /// Structural checks plus parameter validation of every method, so a bad
    /// figure fails before the image is even loaded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.figures.is_empty() {
            return Err(ConfigError::Invalid("no figures configured".to_string()));
        }
        if !(self.options.truncate.is_finite() && self.options.truncate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "options.truncate must be positive, got {}",
                self.options.truncate
            )));
        }
        let mut seen = HashSet::new();
        for fig in &self.figures {
            let name_ok = !fig.name.is_empty()
                && fig
                    .name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if !name_ok {
                return Err(ConfigError::Invalid(format!(
                    "figure name {:?} must be non-empty and use [A-Za-z0-9_-]",
                    fig.name
                )));
            }
            if !seen.insert(fig.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate figure name {:?}",
                    fig.name
                )));
            }
            if let Some(method) = &fig.method {
                method
                    .validate()
                    .map_err(|e| ConfigError::Invalid(format!("figure {:?}: {e}", fig.name)))?;
                if fig.colormaps.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "figure {:?} has a method but no colormaps",
                        fig.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Load and validate a panel tool config.
pub fn load_config(path: &Path) -> Result<PanelToolConfig, ConfigError> {
    let config: PanelToolConfig = load_json(path)?;
    config.validate()?;
    Ok(config)
}
