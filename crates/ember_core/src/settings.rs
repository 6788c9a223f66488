//! Render settings: the plain configuration structure a camera is built from.
//!
//! Settings deserialize from JSON with every field optional; missing fields
//! take the defaults below. Validation runs before a render starts so that
//! bad input is reported up front instead of surfacing mid-render.

use std::path::Path;

use ember_math::{Color, Point3, Vec3};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors reported while loading or validating render settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("image width must be at least 1 pixel")]
    ZeroWidth,

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("aspect ratio must be finite and positive, got {0}")]
    InvalidAspectRatio(f32),

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("focus distance must be finite and positive, got {0}")]
    InvalidFocusDistance(f32),

    #[error("defocus angle must be in [0, 180) degrees, got {0}")]
    InvalidDefocusAngle(f32),

    #[error("look_from and look_at must be different points")]
    DegenerateView,

    #[error("up vector is parallel to the view direction")]
    DegenerateUpVector,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("settings must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Camera, sampling and background parameters for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    /// Ratio of image width over height
    pub aspect_ratio: f32,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Count of random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into the scene
    pub max_depth: u32,
    /// Vertical view angle (field of view) in degrees
    pub vfov: f32,
    /// Point the camera is looking from
    pub look_from: Point3,
    /// Point the camera is looking at
    pub look_at: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,
    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f32,
    /// Distance from the camera to the plane of perfect focus
    pub focus_dist: f32,
    /// Scene background color
    pub background: Color,
    /// Base seed for the per-bucket random streams
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            background: Color::ZERO,
            seed: 0,
        }
    }
}

impl RenderSettings {
    /// Parse settings from a JSON string. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let fields = parse_object(json)?;
        Ok(serde_json::from_value(Value::Object(fields))?)
    }

    /// Read settings from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Apply the fields present in a JSON object on top of these settings.
    ///
    /// Unlike [`RenderSettings::from_json_str`], absent fields keep the
    /// values of `self` rather than the global defaults.
    pub fn overlay_json_str(&self, json: &str) -> ConfigResult<Self> {
        let overrides = parse_object(json)?;
        let mut merged = serde_json::to_value(self)?;

        if let Some(base) = merged.as_object_mut() {
            base.extend(overrides);
        }

        Ok(serde_json::from_value(merged)?)
    }

    /// Read a JSON file and apply it on top of these settings.
    pub fn overlay_json_file(&self, path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        self.overlay_json_str(&text)
    }

    /// Image height derived from width and aspect ratio, at least 1.
    pub fn image_height(&self) -> u32 {
        let height = (self.image_width as f32 / self.aspect_ratio) as u32;
        height.max(1)
    }

    /// Check every precondition the camera relies on.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.image_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(ConfigError::InvalidFieldOfView(self.vfov));
        }
        if !self.focus_dist.is_finite() || self.focus_dist <= 0.0 {
            return Err(ConfigError::InvalidFocusDistance(self.focus_dist));
        }
        if !(self.defocus_angle >= 0.0 && self.defocus_angle < 180.0) {
            return Err(ConfigError::InvalidDefocusAngle(self.defocus_angle));
        }

        let view = self.look_from - self.look_at;
        if view.length_squared() < 1e-12 {
            return Err(ConfigError::DegenerateView);
        }
        if self.vup.cross(view).length_squared() < 1e-12 {
            return Err(ConfigError::DegenerateUpVector);
        }

        Ok(())
    }
}

/// Parse `json` and require a top-level object.
///
/// Derived struct deserializers also accept arrays, mapping elements onto
/// fields by position, so the shape is checked before serde sees it.
fn parse_object(json: &str) -> ConfigResult<Map<String, Value>> {
    match serde_json::from_str(json)? {
        Value::Object(fields) => Ok(fields),
        Value::Array(_) => Err(ConfigError::NotAnObject("an array")),
        Value::String(_) => Err(ConfigError::NotAnObject("a string")),
        Value::Number(_) => Err(ConfigError::NotAnObject("a number")),
        Value::Bool(_) => Err(ConfigError::NotAnObject("a boolean")),
        Value::Null => Err(ConfigError::NotAnObject("null")),
    }
}
