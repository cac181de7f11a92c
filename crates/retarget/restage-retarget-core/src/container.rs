//! Quarantined import of one animated asset.
//!
//! Each import gets an isolated collection so "the rig" and "the mesh" can
//! be located without scanning the whole scene. The container lives from
//! import until teardown; nothing in it survives a successful retarget.

use std::path::Path;

use serde::{Deserialize, Serialize};

use restage_api_core::{
    frame_extent, ActionId, AssetKind, CollectionId, ObjectId, ObjectKind, SceneGraph,
};

use crate::error::RetargetError;

/// Quarantine collection settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Name of the quarantine collection.
    pub collection: String,
    /// Destroy stale members before importing into a pre-existing
    /// quarantine collection. The historical behavior appended instead,
    /// which let a previous import's objects shadow the new one; set this
    /// to `false` only to reproduce that.
    pub purge_on_import: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            collection: "importedAnimation".to_string(),
            purge_on_import: true,
        }
    }
}

/// Imports one animated asset into a quarantine collection and exposes the
/// located source rig, skeletal action, and shape-key action.
#[derive(Debug)]
pub struct ImportContainer {
    cfg: ContainerConfig,
    rig: Option<ObjectId>,
    skeletal_action: Option<ActionId>,
    shape_key_action: Option<ActionId>,
}

impl ImportContainer {
    pub fn new(cfg: ContainerConfig) -> Self {
        Self {
            cfg,
            rig: None,
            skeletal_action: None,
            shape_key_action: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ContainerConfig::default())
    }

    /// The quarantine collection, if it currently exists in the scene.
    pub fn collection_id(&self, scene: &dyn SceneGraph) -> Option<CollectionId> {
        scene.find_collection(&self.cfg.collection)
    }

    /// Source rig located by [`locate_skeletal_action`](Self::locate_skeletal_action).
    pub fn rig(&self) -> Option<ObjectId> {
        self.rig
    }

    pub fn skeletal_action(&self) -> Option<ActionId> {
        self.skeletal_action
    }

    pub fn shape_key_action(&self) -> Option<ActionId> {
        self.shape_key_action
    }

    /// Import the asset at `path` and move every newly selected object into
    /// the quarantine collection.
    ///
    /// Fails with [`RetargetError::UnsupportedFormat`] when the extension
    /// does not match a known asset kind.
    pub fn import(&mut self, scene: &mut dyn SceneGraph, path: &Path) -> Result<(), RetargetError> {
        let kind =
            AssetKind::from_path(path).ok_or_else(|| RetargetError::UnsupportedFormat {
                path: path.display().to_string(),
            })?;

        if self.cfg.purge_on_import {
            if let Some(stale) = scene.find_collection(&self.cfg.collection) {
                for object in scene.objects_in(stale)? {
                    log::debug!(
                        "purging stale quarantine member {:?} before import",
                        object
                    );
                    scene.remove_object(object)?;
                }
            }
        }

        scene.import_asset(kind, path)?;

        let quarantine = scene.ensure_collection(&self.cfg.collection);
        for object in scene.selected_objects() {
            scene.unlink_from_root(object)?;
            scene.link_object(quarantine, object)?;
        }
        Ok(())
    }

    /// Locate the first armature in the quarantine collection and its bound
    /// action.
    ///
    /// No armature at all leaves both rig and action unset; some assets
    /// carry only facial animation. An armature without an action is
    /// [`RetargetError::NoActionFound`]: there is nothing to retarget.
    pub fn locate_skeletal_action(&mut self, scene: &dyn SceneGraph) -> Result<(), RetargetError> {
        let Some(quarantine) = self.collection_id(scene) else {
            return Ok(());
        };
        for object in scene.objects_in(quarantine)? {
            if scene.object_kind(object)? != ObjectKind::Armature {
                continue;
            }
            self.rig = Some(object);
            match scene.active_action(object)? {
                Some(action) => self.skeletal_action = Some(action),
                None => {
                    return Err(RetargetError::NoActionFound {
                        rig: scene.object_name(object)?,
                    });
                }
            }
            break;
        }
        Ok(())
    }

    /// Locate the first mesh owning a shape-key block with a bound action.
    /// Absence of facial animation is valid; nothing here is fatal.
    pub fn locate_shape_key_action(&mut self, scene: &dyn SceneGraph) -> Result<(), RetargetError> {
        let Some(quarantine) = self.collection_id(scene) else {
            return Ok(());
        };
        for object in scene.objects_in(quarantine)? {
            if scene.object_kind(object)? != ObjectKind::Mesh {
                continue;
            }
            if !scene.has_shape_keys(object)? {
                continue;
            }
            if let Some(action) = scene.shape_key_action(object)? {
                self.shape_key_action = Some(action);
                break;
            }
        }
        Ok(())
    }

    /// Locate both the skeletal and the shape-key action.
    pub fn locate_actions(&mut self, scene: &dyn SceneGraph) -> Result<(), RetargetError> {
        self.locate_skeletal_action(scene)?;
        self.locate_shape_key_action(scene)
    }

    /// (min, max) frame over every keyframe of the located skeletal action.
    ///
    /// `None` when no action was located, the action has no curves, or no
    /// curve has points; callers must leave the scene frame range alone in
    /// that case rather than clamping to zero.
    pub fn frame_range(&self, scene: &dyn SceneGraph) -> Result<Option<(i32, i32)>, RetargetError> {
        let Some(action) = self.skeletal_action else {
            return Ok(None);
        };
        let curves = scene.action_curves(action)?;
        Ok(frame_extent(&curves).map(|(min, max)| (min as i32, max as i32)))
    }

    /// Remove the quarantine collection and every object it still contains.
    /// Idempotent: tearing down an absent container is a no-op.
    pub fn teardown(&self, scene: &mut dyn SceneGraph) -> Result<(), RetargetError> {
        if let Some(quarantine) = self.collection_id(scene) {
            scene.remove_collection(quarantine, true)?;
        }
        Ok(())
    }
}
