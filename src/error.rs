//! Error types for scene construction and configuration.
//!
//! Only construction can fail. Tracing a ray never returns an error: misses,
//! grazing hits and lights parallel to a surface are ordinary outcomes.

use thiserror::Error;

/// Degenerate geometry detected while building a shape, ray or camera.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A vector that must have a direction has zero length.
    #[error("zero-length vector is not allowed")]
    ZeroVector,

    /// Two points that must be distinct coincide.
    #[error("points coincide")]
    CoincidentPoints,

    /// Three points that must span a plane lie on one line.
    #[error("points are collinear")]
    CollinearPoints,

    /// A size that must be strictly positive is not.
    #[error("{what} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending quantity
        what: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Camera direction vectors are not perpendicular.
    #[error("camera direction vectors must be orthogonal")]
    NotOrthogonal,
}

/// Error raised while loading or validating a scene description.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field was not supplied.
    #[error("missing rendering data: {class} {field}")]
    Missing {
        /// The object being configured
        class: &'static str,
        /// The absent field
        field: &'static str,
    },

    /// A configured object is geometrically degenerate.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The scene file could not be read.
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    /// The scene file is not valid TOML for a scene description.
    #[error("failed to parse scene file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Error raised while writing a rendered image.
#[derive(Debug, Error)]
pub enum OutputError {
    /// PNG encoding or file I/O failed.
    #[error("failed to save image: {0}")]
    Image(#[from] image::ImageError),

    /// EXR encoding or file I/O failed.
    #[error("failed to save EXR image: {0}")]
    Exr(#[from] exr::error::Error),

    /// The output path has an extension no encoder handles.
    #[error("unsupported output format '{0}' (expected .png or .exr)")]
    UnsupportedFormat(String),
}
