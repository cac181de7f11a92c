//! Node-to-bone baking for assets without a conventional action.
//!
//! Some capture exports carry motion on independent transform nodes named
//! after bones. This sampler walks every such node and, frame by frame,
//! copies the evaluated node transform onto the same-named pose bone,
//! keying location, rotation, and scale at each step. The result is a fully
//! baked, curve-backed bone animation on the target rig, unlike the
//! binder, which shares the source action by reference.
//!
//! The loop is strictly sequential: each frame's node keyframe write must
//! be evaluated by the host before that frame's read, so neither frames nor
//! nodes can be processed in parallel.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use restage_api_core::{CollectionId, ObjectId, ObjectKind, SceneGraph, TransformChannel};

use crate::error::RetargetError;

/// Outcome of one baking run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SampleReport {
    /// Last frame sampled (frames run from 1 to this, inclusive).
    pub frame_end: i32,
    /// Nodes that matched a bone by name and were baked.
    pub matched_nodes: usize,
    /// Node names with no same-named bone on the target rig.
    pub skipped_nodes: Vec<String>,
    /// Total bone keyframes written: 3 × frames × matched nodes.
    pub keyframes_inserted: u64,
}

/// Resamples per-frame transforms from quarantined nodes onto same-named
/// bones of the target rig.
#[derive(Debug)]
pub struct NodeSampler {
    source: CollectionId,
    target_rig: ObjectId,
}

impl NodeSampler {
    pub fn new(source: CollectionId, target_rig: ObjectId) -> Self {
        Self { source, target_rig }
    }

    /// Bake every node in the source collection onto the target rig over
    /// frames `[1, scene frame end]`.
    pub fn run(&self, scene: &mut dyn SceneGraph) -> Result<SampleReport, RetargetError> {
        let bones: HashSet<String> = scene.bone_names(self.target_rig)?.into_iter().collect();
        let (_, frame_end) = scene.frame_range();

        let mut report = SampleReport {
            frame_end,
            matched_nodes: 0,
            skipped_nodes: Vec::new(),
            keyframes_inserted: 0,
        };

        for node in scene.objects_in(self.source)? {
            if scene.object_kind(node)? != ObjectKind::Node {
                continue;
            }
            let name = scene.object_name(node)?;
            if !bones.contains(&name) {
                log::warn!("no bone named '{name}' on target rig; skipping node");
                report.skipped_nodes.push(name);
                continue;
            }

            for frame in 1..=frame_end {
                // The node's motion may only exist in the host's evaluated
                // state; keying it first forces evaluation at this frame.
                scene.insert_node_keyframe(node, frame)?;
                let transform = scene.node_transform_at(node, frame)?;

                scene.set_pose_bone_transform(self.target_rig, &name, transform)?;
                for channel in TransformChannel::ALL {
                    scene.insert_bone_keyframe(self.target_rig, &name, channel, frame)?;
                    report.keyframes_inserted += 1;
                }
            }
            report.matched_nodes += 1;
        }

        log::info!(
            "baked {} node(s) over {} frame(s), {} keyframes, {} skipped",
            report.matched_nodes,
            report.frame_end,
            report.keyframes_inserted,
            report.skipped_nodes.len()
        );
        Ok(report)
    }
}
