//! Strategy selection between the two transfer paths.

use serde::{Deserialize, Serialize};

use restage_api_core::{CollectionId, SceneGraph};

use crate::binder::{ActionBinder, BindReport, MismatchPolicy};
use crate::container::ImportContainer;
use crate::error::RetargetError;
use crate::sampler::{NodeSampler, SampleReport};

/// How source motion reaches the target rig.
///
/// `Rebind` redirects the target's binding at the source action (shared by
/// reference); `BakeSample` writes fresh keyframes onto the target from
/// per-frame node evaluation. Either way the contract is the same: the
/// target rig ends up animated.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum RetargetStrategy {
    #[default]
    Rebind,
    BakeSample,
}

/// Per-strategy result detail.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum RetargetReport {
    Rebind(BindReport),
    BakeSample(SampleReport),
}

impl RetargetStrategy {
    /// Execute the transfer from a located container onto the target
    /// avatar collection.
    pub fn execute(
        self,
        scene: &mut dyn SceneGraph,
        container: &ImportContainer,
        target: CollectionId,
        mismatch: MismatchPolicy,
    ) -> Result<RetargetReport, RetargetError> {
        match self {
            RetargetStrategy::Rebind => {
                let binder = ActionBinder::new(
                    container.skeletal_action(),
                    container.shape_key_action(),
                    target,
                )
                .with_mismatch_policy(mismatch);
                Ok(RetargetReport::Rebind(binder.bind_all(scene)?))
            }
            RetargetStrategy::BakeSample => {
                let Some(source) = container.collection_id(scene) else {
                    // No quarantine collection means no nodes to sample.
                    log::warn!("bake-sample requested but no quarantine collection exists");
                    return Ok(RetargetReport::BakeSample(SampleReport {
                        frame_end: scene.frame_range().1,
                        matched_nodes: 0,
                        skipped_nodes: Vec::new(),
                        keyframes_inserted: 0,
                    }));
                };
                let binder = ActionBinder::new(None, None, target);
                let rig = binder.locate_target_rig(scene)?.ok_or_else(|| {
                    RetargetError::NoTargetRig {
                        collection: scene
                            .collection_name(target)
                            .unwrap_or_else(|_| format!("#{}", target.0)),
                    }
                })?;
                let sampler = NodeSampler::new(source, rig);
                Ok(RetargetReport::BakeSample(sampler.run(scene)?))
            }
        }
    }
}
