//! Render and import configuration vocabulary shared with the host.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Recognized animated-asset kinds, each handled by a distinct host import
/// routine.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Gltf,
    Fbx,
}

impl AssetKind {
    /// Map a file path to an asset kind by extension (case-insensitive).
    /// `None` means the format is not supported.
    pub fn from_path(path: &Path) -> Option<AssetKind> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "glb" | "gltf" => Some(AssetKind::Gltf),
            "fbx" => Some(AssetKind::Fbx),
            _ => None,
        }
    }
}

/// The host's render engines.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RenderEngine {
    /// Physically-based path tracer; the only engine with device
    /// acceleration and sample-count configuration.
    Cycles,
    Eevee,
    Workbench,
}

impl RenderEngine {
    pub fn is_path_traced(self) -> bool {
        matches!(self, RenderEngine::Cycles)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RenderEngine::Cycles => "CYCLES",
            RenderEngine::Eevee => "BLENDER_EEVEE",
            RenderEngine::Workbench => "BLENDER_WORKBENCH",
        }
    }
}

impl FromStr for RenderEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CYCLES" => Ok(RenderEngine::Cycles),
            "EEVEE" | "BLENDER_EEVEE" => Ok(RenderEngine::Eevee),
            "WORKBENCH" | "BLENDER_WORKBENCH" => Ok(RenderEngine::Workbench),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for RenderEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute device kinds for the path-traced engine.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    Cuda,
    Optix,
    Cpu,
}

impl DeviceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceKind::Cuda => "CUDA",
            DeviceKind::Optix => "OPTIX",
            DeviceKind::Cpu => "CPU",
        }
    }
}

impl FromStr for DeviceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CUDA" => Ok(DeviceKind::Cuda),
            "OPTIX" => Ok(DeviceKind::Optix),
            "CPU" | "NONE" => Ok(DeviceKind::Cpu),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scene-level compute backend selector.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ComputeBackend {
    Cpu,
    Gpu,
}

/// Output image formats the orchestrator can request.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    OpenExr,
    Tiff,
}

impl ImageFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::OpenExr => "OPEN_EXR",
            ImageFormat::Tiff => "TIFF",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::OpenExr => "exr",
            ImageFormat::Tiff => "tif",
        }
    }
}
