//! Error types for scene construction and image output.

use glint_math::Vec3;
use thiserror::Error;

/// Invalid settings rejected before any ray is traced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Sphere center must be finite, got {0}")]
    InvalidCenter(Vec3),

    #[error("Image must be at least 2x2 pixels, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Image of {width}x{height} pixels is too large")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Max depth must be at least 1")]
    ZeroDepth,

    #[error("Camera look_from and look_at must differ")]
    DegenerateView,

    #[error("Camera up vector is parallel to the view direction")]
    ParallelUp,

    #[error("Vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFov(f32),

    #[error("Aperture must be non-negative, got {0}")]
    InvalidAperture(f32),

    #[error("Focus distance must be positive, got {0}")]
    InvalidFocusDistance(f32),

    #[error("Aspect ratio must be positive, got {0}")]
    InvalidAspectRatio(f32),

    #[error("Index of refraction must be positive and finite, got {0}")]
    InvalidIor(f32),

    #[error("Albedo components must be finite and non-negative, got {0}")]
    InvalidAlbedo(Vec3),
}

/// Errors that can occur while loading a scene or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Scene parse error: {0}")]
    SceneParse(#[from] serde_json::Error),

    #[error("Sphere {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },
}

/// Result type for scene loading and output.
pub type RenderResult<T> = Result<T, RenderError>;
