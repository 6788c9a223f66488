//! Ember Core - settings and resources shared by the renderer and its callers.
//!
//! This crate provides:
//!
//! - **Render settings**: `RenderSettings`, the plain configuration structure
//!   the camera is built from, with up-front validation
//! - **Image data**: decoded, linear RGB buffers for image textures, plus a
//!   cache that shares them across textures
//!
//! # Example
//!
//! ```ignore
//! use ember_core::RenderSettings;
//!
//! let settings = RenderSettings::from_json_file("scene.json")?;
//! settings.validate()?;
//! println!("{}x{}", settings.image_width, settings.image_height());
//! ```

pub mod image_data;
pub mod settings;

// Re-export commonly used types
pub use image_data::{ImageCache, ImageData, ImageError, ImageResult};
pub use settings::{ConfigError, ConfigResult, RenderSettings};
