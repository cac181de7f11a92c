//! Retargeting error taxonomy.

use serde::{Deserialize, Serialize};

use restage_api_core::SceneError;

/// Errors raised while importing a source asset or transferring its
/// animation. Every variant aborts the current asset; none of them should
/// abort a multi-asset batch (that policy belongs to the launcher driving
/// one process per asset).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RetargetError {
    /// The file extension does not map to a recognized asset kind.
    #[error("unsupported asset format: '{path}'")]
    UnsupportedFormat { path: String },

    /// A source rig exists but carries no action; a retarget with no source
    /// motion is meaningless.
    #[error("no action found on source rig '{rig}'")]
    NoActionFound { rig: String },

    #[error("target collection '{collection}' contains no armature")]
    NoTargetRig { collection: String },

    #[error("target collection '{collection}' contains no mesh with shape keys")]
    NoTargetMesh { collection: String },

    /// Source channels with no counterpart on the target, raised only under
    /// [`MismatchPolicy::Error`](crate::MismatchPolicy::Error).
    #[error("{context}: {} source channel(s) have no target counterpart", unmatched.len())]
    UnmatchedChannels {
        context: String,
        unmatched: Vec<String>,
    },

    #[error(transparent)]
    Scene(#[from] SceneError),
}

impl RetargetError {
    /// Coarse category for logging and batch reports.
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat { .. } => "format",
            Self::NoActionFound { .. } => "source",
            Self::NoTargetRig { .. } | Self::NoTargetMesh { .. } => "target",
            Self::UnmatchedChannels { .. } => "compat",
            Self::Scene(_) => "host",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_display_counts_channels() {
        let err = RetargetError::UnmatchedChannels {
            context: "skeletal".into(),
            unmatched: vec!["Tail".into(), "Ear.L".into()],
        };
        assert!(err.to_string().contains("2 source channel(s)"));
        assert_eq!(err.category(), "compat");
    }
}
