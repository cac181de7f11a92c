//! Pointer-rebind of source actions onto the target avatar.
//!
//! Binding redirects the target's animation-binding pointer at the source
//! action; the action object is shared, not copied, so a later edit to the
//! source curves is observable through the target.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use restage_api_core::{ActionId, CollectionId, ObjectId, ObjectKind, SceneGraph};

use crate::error::RetargetError;

/// What to do with source channels whose names resolve to nothing on the
/// target. The host silently ignores unresolvable channels, so `Ignore`
/// reproduces its behavior; `Warn` keeps batch throughput while surfacing
/// the data-quality problem.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum MismatchPolicy {
    #[default]
    Warn,
    Error,
    Ignore,
}

/// Whether a bind operation had anything to do.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum BindOutcome {
    Bound,
    /// No source action was supplied; the operation was a deliberate no-op.
    NothingToBind,
}

/// Result of binding one action kind (skeletal or shape-key).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChannelBind {
    pub outcome: BindOutcome,
    /// Objects whose binding now references the source action.
    pub bound_objects: usize,
    /// Source channel names with no counterpart on the target.
    pub unmatched: Vec<String>,
}

impl ChannelBind {
    fn nothing() -> Self {
        Self {
            outcome: BindOutcome::NothingToBind,
            bound_objects: 0,
            unmatched: Vec::new(),
        }
    }
}

/// Combined report for one retarget's bind phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BindReport {
    pub skeletal: ChannelBind,
    pub shape_keys: ChannelBind,
}

impl BindReport {
    /// Total unmatched channels across both action kinds.
    pub fn unmatched_total(&self) -> usize {
        self.skeletal.unmatched.len() + self.shape_keys.unmatched.len()
    }
}

/// Rebinds a source skeletal action and shape-key action onto the target
/// avatar collection.
#[derive(Debug)]
pub struct ActionBinder {
    skeletal_action: Option<ActionId>,
    shape_key_action: Option<ActionId>,
    target: CollectionId,
    mismatch: MismatchPolicy,
}

impl ActionBinder {
    pub fn new(
        skeletal_action: Option<ActionId>,
        shape_key_action: Option<ActionId>,
        target: CollectionId,
    ) -> Self {
        Self {
            skeletal_action,
            shape_key_action,
            target,
            mismatch: MismatchPolicy::default(),
        }
    }

    pub fn with_mismatch_policy(mut self, policy: MismatchPolicy) -> Self {
        self.mismatch = policy;
        self
    }

    /// First armature in the target collection, in iteration order.
    pub fn locate_target_rig(
        &self,
        scene: &dyn SceneGraph,
    ) -> Result<Option<ObjectId>, RetargetError> {
        for object in scene.objects_in(self.target)? {
            if scene.object_kind(object)? == ObjectKind::Armature {
                return Ok(Some(object));
            }
        }
        Ok(None)
    }

    /// Bind the skeletal action onto the target rig.
    ///
    /// With no skeletal action this reports
    /// [`BindOutcome::NothingToBind`] rather than failing, since facial-only
    /// assets are legitimate. With an action but no target rig it fails
    /// with [`RetargetError::NoTargetRig`].
    pub fn bind_skeletal(&self, scene: &mut dyn SceneGraph) -> Result<ChannelBind, RetargetError> {
        let Some(action) = self.skeletal_action else {
            log::debug!("no skeletal action supplied; nothing to bind");
            return Ok(ChannelBind::nothing());
        };

        let rig = self
            .locate_target_rig(scene)?
            .ok_or_else(|| RetargetError::NoTargetRig {
                collection: collection_label(scene, self.target),
            })?;

        let bone_names: HashSet<String> = scene.bone_names(rig)?.into_iter().collect();
        let unmatched = self.check_channels(scene, action, "skeletal", &bone_names)?;

        scene.set_active_action(rig, action)?;
        Ok(ChannelBind {
            outcome: BindOutcome::Bound,
            bound_objects: 1,
            unmatched,
        })
    }

    /// Bind the shape-key action onto every target mesh owning a shape-key
    /// block. A target avatar may legitimately have more than one such mesh
    /// (body plus separate eyes); all are bound identically.
    pub fn bind_shape_keys(
        &self,
        scene: &mut dyn SceneGraph,
    ) -> Result<ChannelBind, RetargetError> {
        let Some(action) = self.shape_key_action else {
            log::debug!("no shape-key action supplied; nothing to bind");
            return Ok(ChannelBind::nothing());
        };

        let mut shape_names: HashSet<String> = HashSet::new();
        let mut targets: Vec<ObjectId> = Vec::new();
        for object in scene.objects_in(self.target)? {
            if scene.object_kind(object)? != ObjectKind::Mesh {
                continue;
            }
            if !scene.has_shape_keys(object)? {
                continue;
            }
            shape_names.extend(scene.shape_key_names(object)?);
            targets.push(object);
        }
        if targets.is_empty() {
            return Err(RetargetError::NoTargetMesh {
                collection: collection_label(scene, self.target),
            });
        }

        let unmatched = self.check_channels(scene, action, "shape-key", &shape_names)?;

        for &object in &targets {
            scene.set_shape_key_action(object, action)?;
        }
        Ok(ChannelBind {
            outcome: BindOutcome::Bound,
            bound_objects: targets.len(),
            unmatched,
        })
    }

    /// Run both bind phases and collect one report.
    pub fn bind_all(&self, scene: &mut dyn SceneGraph) -> Result<BindReport, RetargetError> {
        let skeletal = self.bind_skeletal(scene)?;
        let shape_keys = self.bind_shape_keys(scene)?;
        Ok(BindReport {
            skeletal,
            shape_keys,
        })
    }

    /// Compare the action's channel targets against the resolvable names on
    /// the target, applying the configured mismatch policy.
    fn check_channels(
        &self,
        scene: &dyn SceneGraph,
        action: ActionId,
        context: &str,
        resolvable: &HashSet<String>,
    ) -> Result<Vec<String>, RetargetError> {
        let mut unmatched: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for curve in scene.action_curves(action)? {
            if !resolvable.contains(&curve.target) && seen.insert(curve.target.clone()) {
                unmatched.push(curve.target);
            }
        }
        if unmatched.is_empty() {
            return Ok(unmatched);
        }
        match self.mismatch {
            MismatchPolicy::Ignore => {}
            MismatchPolicy::Warn => {
                log::warn!(
                    "{context}: {} source channel(s) have no target counterpart: {}",
                    unmatched.len(),
                    unmatched.join(", ")
                );
            }
            MismatchPolicy::Error => {
                return Err(RetargetError::UnmatchedChannels {
                    context: context.to_string(),
                    unmatched,
                });
            }
        }
        Ok(unmatched)
    }
}

fn collection_label(scene: &dyn SceneGraph, collection: CollectionId) -> String {
    scene
        .collection_name(collection)
        .unwrap_or_else(|_| format!("#{}", collection.0))
}
