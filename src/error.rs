//! Error types, one enum per concern.
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the edge-map computation itself.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EdgeError {
    /// Empty grid, unsupported dimensionality, shape/data mismatch or
    /// non-finite samples.
    #[error("invalid input image: {0}")]
    InvalidInput(String),
    /// A smoothing scale or truncation that is zero, negative or not finite.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// Rescaling a magnitude grid whose maximum is zero (or not finite).
    #[error("cannot rescale magnitude grid with maximum {max}")]
    DegenerateNormalization { max: f32 },
    /// The filter response left the `f32` range (input magnitudes too large).
    #[error("{method} produced a non-finite response: {detail}")]
    NonFiniteResponse { method: String, detail: String },
}

/// Decoding, encoding and filesystem failures at the I/O boundary.
#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize JSON for {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while composing or presenting panels.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("nothing to render: panel list is empty")]
    NoPanels,
    #[error("panel `{title}` has an empty grid")]
    EmptyPanel { title: String },
    #[error("panel `{title}` has {channels} channels; expected 1 or 3")]
    UnsupportedChannels { title: String, channels: usize },
    #[error(transparent)]
    Save(#[from] ImageIoError),
}

/// Failures while loading a tool configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}
