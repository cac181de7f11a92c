//! Errors reported by a scene-graph host.

use serde::{Deserialize, Serialize};

use crate::ids::{ActionId, CollectionId, ObjectId};

/// Failure surface of the [`SceneGraph`](crate::SceneGraph) trait. These are
/// host faults (dangling ids, failed imports, failed renders), distinct from
/// the pipeline-level errors each component defines for its own contract.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SceneError {
    #[error("unknown object id {id:?}")]
    UnknownObject { id: ObjectId },

    #[error("unknown collection id {id:?}")]
    UnknownCollection { id: CollectionId },

    #[error("unknown action id {id:?}")]
    UnknownAction { id: ActionId },

    #[error("rig {rig:?} has no bone named '{bone}'")]
    UnknownBone { rig: ObjectId, bone: String },

    #[error("object {object:?} has no shape-key block")]
    NoShapeKeys { object: ObjectId },

    #[error("import of '{path}' failed: {reason}")]
    ImportFailed { path: String, reason: String },

    #[error("render failed: {reason}")]
    RenderFailed { reason: String },

    #[error("io error: {reason}")]
    Io { reason: String },
}

impl SceneError {
    /// Coarse category for logging and batch reports.
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnknownObject { .. }
            | Self::UnknownCollection { .. }
            | Self::UnknownAction { .. }
            | Self::UnknownBone { .. }
            | Self::NoShapeKeys { .. } => "identity",
            Self::ImportFailed { .. } => "import",
            Self::RenderFailed { .. } => "render",
            Self::Io { .. } => "io",
        }
    }
}

impl From<std::io::Error> for SceneError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            reason: err.to_string(),
        }
    }
}
