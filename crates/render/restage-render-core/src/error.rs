//! Render orchestration errors.

use serde::{Deserialize, Serialize};

use restage_api_core::SceneError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RenderError {
    /// The requested engine is not one of the host's engines. Fatal, where
    /// an invalid device is instead recovered via fallback.
    #[error("invalid render engine '{requested}'")]
    InvalidEngine { requested: String },

    #[error("output directory allocation failed: {reason}")]
    OutputAllocation { reason: String },

    #[error("io error: {reason}")]
    Io { reason: String },

    #[error(transparent)]
    Scene(#[from] SceneError),
}

impl RenderError {
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidEngine { .. } => "config",
            Self::OutputAllocation { .. } => "output",
            Self::Io { .. } => "io",
            Self::Scene(_) => "host",
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            reason: err.to_string(),
        }
    }
}
