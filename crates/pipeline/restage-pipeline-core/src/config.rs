//! Pipeline configuration: composition of the stage configs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use restage_render_core::RenderConfig;
use restage_retarget_core::{ContainerConfig, MismatchPolicy, RetargetStrategy};

use crate::timing::Retime;

/// Collection holding the pre-authored target avatar.
pub const DEFAULT_TARGET_COLLECTION: &str = "mainAvatar";

/// Full configuration for one asset's run through the pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub container: ContainerConfig,
    /// Collection holding the target avatar rig and meshes.
    pub target_collection: String,
    #[serde(default)]
    pub strategy: RetargetStrategy,
    #[serde(default)]
    pub mismatch: MismatchPolicy,
    pub render: RenderConfig,
    /// Replacement background asset, applied after the retarget.
    #[serde(default)]
    pub background: Option<PathBuf>,
    /// Optional framerate retiming, applied before rendering.
    #[serde(default)]
    pub retime: Option<Retime>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            container: ContainerConfig::default(),
            target_collection: DEFAULT_TARGET_COLLECTION.to_string(),
            strategy: RetargetStrategy::default(),
            mismatch: MismatchPolicy::default(),
            render: RenderConfig::default(),
            background: None,
            retime: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_main_avatar() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.target_collection, "mainAvatar");
        assert_eq!(cfg.strategy, RetargetStrategy::Rebind);
        assert!(cfg.background.is_none());
    }

    #[test]
    fn json_roundtrip() {
        let cfg = PipelineConfig::default();
        let json = serde_json::to_string(&cfg).expect("serialize");
        let back: PipelineConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.target_collection, cfg.target_collection);
        assert_eq!(back.mismatch, MismatchPolicy::Warn);
    }
}
