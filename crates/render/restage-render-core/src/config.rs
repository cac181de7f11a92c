//! Render session configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use restage_api_core::ImageFormat;

/// Everything a render session needs up front. Engine and device arrive as
/// host spellings (e.g. `"CYCLES"`, `"OPTIX"`) so configs written for the
/// host batch scripts keep working; validation happens when the session
/// starts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Render engine name; invalid names fail the session.
    pub engine: String,
    /// Compute device kind for the path tracer; invalid names fall back to
    /// the default with a warning.
    pub device: String,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    /// Path-tracer sample count; ignored (with a warning) on other engines.
    #[serde(default)]
    pub samples: Option<u32>,
    /// Explicit frame range override. When absent, the source animation's
    /// frame extent is used; when that is also absent, the scene range is
    /// left untouched.
    #[serde(default)]
    pub frame_range: Option<(i32, i32)>,
    /// Root under which dated output folders are created.
    pub output_base: PathBuf,
    /// Optional folder between the date and the render number.
    #[serde(default)]
    pub prefix: String,
    /// Collection whose cameras are rendered.
    pub camera_collection: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            engine: "CYCLES".to_string(),
            device: "CUDA".to_string(),
            format: ImageFormat::Png,
            width: 1920,
            height: 1080,
            samples: None,
            frame_range: None,
            output_base: PathBuf::from("out"),
            prefix: String::new(),
            camera_collection: "Cameras".to_string(),
        }
    }
}
