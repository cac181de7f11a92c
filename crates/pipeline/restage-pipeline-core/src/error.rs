//! Pipeline-level errors: the union of the stages plus the thin scene ops.

use serde::{Deserialize, Serialize};

use restage_api_core::SceneError;
use restage_render_core::RenderError;
use restage_retarget_core::RetargetError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PipelineError {
    #[error(transparent)]
    Retarget(#[from] RetargetError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("unsupported background asset format: '{path}'")]
    UnsupportedBackground { path: String },

    #[error("invalid hex color '{value}'")]
    InvalidColor { value: String },
}

impl PipelineError {
    pub fn category(&self) -> &'static str {
        match self {
            Self::Retarget(err) => err.category(),
            Self::Render(err) => err.category(),
            Self::Scene(_) => "host",
            Self::UnsupportedBackground { .. } => "format",
            Self::InvalidColor { .. } => "config",
        }
    }
}
