//! An in-memory scene-graph host.
//!
//! `MemoryScene` implements the full `SceneGraph` trait deterministically:
//! collections preserve insertion order (so "first armature" is
//! well-defined), imports instantiate staged fixture assets, and the render
//! trigger writes stub frame files under the configured output template so
//! directory-layout assertions run against a real filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use indexmap::IndexMap;

use restage_api_core::{
    ActionId, AssetKind, CollectionId, ComputeBackend, DeviceKind, FCurve, IdAllocator,
    ImageFormat, ObjectId, ObjectKind, RenderEngine, SceneError, SceneGraph, Transform,
    TransformChannel,
};

use crate::assets::{FixtureAction, FixtureAsset};

#[derive(Debug)]
struct BoneRec {
    name: String,
    roll: f32,
    pose: Transform,
    /// Keyframes inserted per channel, in insertion order.
    keyed: Vec<(TransformChannel, i32)>,
}

#[derive(Debug)]
struct ShapeKeyBlock {
    names: Vec<String>,
    action: Option<ActionId>,
}

#[derive(Debug)]
struct ObjectRec {
    name: String,
    kind: ObjectKind,
    action: Option<ActionId>,
    shape_keys: Option<ShapeKeyBlock>,
    bones: Vec<BoneRec>,
    node_track: Vec<Transform>,
    /// Frames where a node keyframe was written, in write order.
    node_keyed: Vec<i32>,
    material_labels: HashMap<String, [f32; 4]>,
}

#[derive(Debug)]
struct ActionRec {
    name: String,
    curves: Vec<FCurve>,
}

#[derive(Debug)]
struct CollectionRec {
    name: String,
    members: Vec<ObjectId>,
}

/// Scene-level render configuration as the host last saw it.
#[derive(Clone, Debug, Default)]
pub struct RenderState {
    pub engine: Option<RenderEngine>,
    pub device_kind: Option<DeviceKind>,
    pub active_devices: Vec<String>,
    pub backend: Option<ComputeBackend>,
    pub format: Option<ImageFormat>,
    pub resolution: Option<(u32, u32)>,
    pub samples: Option<u32>,
    pub frame_start: i32,
    pub frame_end: i32,
    pub fps: i32,
    pub frame_remap: Option<(i32, i32)>,
    pub output_template: Option<PathBuf>,
    pub active_camera: Option<ObjectId>,
    /// Number of completed `render_animation` calls.
    pub renders: u32,
}

/// Deterministic in-memory `SceneGraph` implementation.
#[derive(Debug)]
pub struct MemoryScene {
    ids: IdAllocator,
    objects: IndexMap<ObjectId, ObjectRec>,
    collections: IndexMap<CollectionId, CollectionRec>,
    actions: IndexMap<ActionId, ActionRec>,
    root: Vec<ObjectId>,
    selected: Vec<ObjectId>,
    staged: HashMap<PathBuf, FixtureAsset>,
    devices: Vec<String>,
    render: RenderState,
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScene {
    pub fn new() -> Self {
        Self {
            ids: IdAllocator::new(),
            objects: IndexMap::new(),
            collections: IndexMap::new(),
            actions: IndexMap::new(),
            root: Vec::new(),
            selected: Vec::new(),
            staged: HashMap::new(),
            devices: vec!["GPU-0".to_string(), "GPU-1".to_string()],
            render: RenderState {
                frame_start: 1,
                frame_end: 24,
                fps: 24,
                ..RenderState::default()
            },
        }
    }

    /// A scene with the standing stage content the pipeline expects: a
    /// `mainAvatar` collection (armature plus two shape-keyed meshes), a
    /// `Cameras` collection with two cameras, and a `Background` collection
    /// with one mesh.
    pub fn with_standard_stage() -> Self {
        let mut scene = Self::new();

        let avatar = scene.ensure_collection("mainAvatar");
        let rig = scene.add_object(
            "Avatar",
            ObjectKind::Armature,
            &["Hips", "Spine", "Head"],
        );
        scene.link_into(avatar, rig);
        let body = scene.add_object("Body", ObjectKind::Mesh, &[]);
        scene.attach_shape_keys(body, &["Blink", "JawOpen"]);
        scene.link_into(avatar, body);
        let eyes = scene.add_object("Eyes", ObjectKind::Mesh, &[]);
        scene.attach_shape_keys(eyes, &["Blink"]);
        scene.link_into(avatar, eyes);

        let cameras = scene.ensure_collection("Cameras");
        let front = scene.add_object("Cam_Front", ObjectKind::Camera, &[]);
        scene.link_into(cameras, front);
        let side = scene.add_object("Cam_Side", ObjectKind::Camera, &[]);
        scene.link_into(cameras, side);

        let background = scene.ensure_collection("Background");
        let backdrop = scene.add_object("Backdrop", ObjectKind::Mesh, &[]);
        scene.link_into(background, backdrop);

        scene
    }

    /// Register the fixture asset an import of `path` instantiates.
    pub fn stage_asset(&mut self, path: impl Into<PathBuf>, asset: FixtureAsset) {
        self.staged.insert(path.into(), asset);
    }

    /// Create a free-standing object linked under the scene root.
    pub fn add_object(&mut self, name: &str, kind: ObjectKind, bones: &[&str]) -> ObjectId {
        let id = self.ids.alloc_object();
        self.objects.insert(
            id,
            ObjectRec {
                name: name.to_string(),
                kind,
                action: None,
                shape_keys: None,
                bones: bones
                    .iter()
                    .map(|b| BoneRec {
                        name: (*b).to_string(),
                        roll: 0.0,
                        pose: Transform::IDENTITY,
                        keyed: Vec::new(),
                    })
                    .collect(),
                node_track: Vec::new(),
                node_keyed: Vec::new(),
                material_labels: HashMap::new(),
            },
        );
        self.root.push(id);
        id
    }

    pub fn attach_shape_keys(&mut self, object: ObjectId, names: &[&str]) {
        if let Some(rec) = self.objects.get_mut(&object) {
            rec.shape_keys = Some(ShapeKeyBlock {
                names: names.iter().map(|n| (*n).to_string()).collect(),
                action: None,
            });
        }
    }

    pub fn add_material_label(&mut self, object: ObjectId, label: &str, rgba: [f32; 4]) {
        if let Some(rec) = self.objects.get_mut(&object) {
            rec.material_labels.insert(label.to_string(), rgba);
        }
    }

    fn link_into(&mut self, collection: CollectionId, object: ObjectId) {
        self.root.retain(|o| *o != object);
        if let Some(col) = self.collections.get_mut(&collection) {
            if !col.members.contains(&object) {
                col.members.push(object);
            }
        }
    }

    fn instantiate_action(&mut self, action: &FixtureAction) -> ActionId {
        let id = self.ids.alloc_action();
        self.actions.insert(
            id,
            ActionRec {
                name: action.name.clone(),
                curves: action.curves.clone(),
            },
        );
        id
    }

    // ----- inspection helpers for tests -----

    pub fn object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, rec)| rec.name == name)
            .map(|(id, _)| *id)
    }

    pub fn collection_by_name(&self, name: &str) -> Option<CollectionId> {
        self.collections
            .iter()
            .find(|(_, rec)| rec.name == name)
            .map(|(id, _)| *id)
    }

    pub fn action_by_name(&self, name: &str) -> Option<ActionId> {
        self.actions
            .iter()
            .find(|(_, rec)| rec.name == name)
            .map(|(id, _)| *id)
    }

    pub fn object_exists(&self, object: ObjectId) -> bool {
        self.objects.contains_key(&object)
    }

    /// Mutable access to an action's curves, for tests asserting that a
    /// rebind shares rather than copies.
    pub fn action_curves_mut(&mut self, action: ActionId) -> Option<&mut Vec<FCurve>> {
        self.actions.get_mut(&action).map(|rec| &mut rec.curves)
    }

    /// Keyframes inserted on one bone, as (channel, frame) pairs in write
    /// order.
    pub fn bone_keyframes(&self, rig: ObjectId, bone: &str) -> Vec<(TransformChannel, i32)> {
        self.objects
            .get(&rig)
            .and_then(|rec| rec.bones.iter().find(|b| b.name == bone))
            .map(|b| b.keyed.clone())
            .unwrap_or_default()
    }

    /// Frames where a node keyframe was written, in write order.
    pub fn node_key_writes(&self, node: ObjectId) -> Vec<i32> {
        self.objects
            .get(&node)
            .map(|rec| rec.node_keyed.clone())
            .unwrap_or_default()
    }

    pub fn render_state(&self) -> &RenderState {
        &self.render
    }

    pub fn material_label_color(&self, object: ObjectId, label: &str) -> Option<[f32; 4]> {
        self.objects
            .get(&object)
            .and_then(|rec| rec.material_labels.get(label))
            .copied()
    }

    fn object(&self, object: ObjectId) -> Result<&ObjectRec, SceneError> {
        self.objects
            .get(&object)
            .ok_or(SceneError::UnknownObject { id: object })
    }

    fn object_mut(&mut self, object: ObjectId) -> Result<&mut ObjectRec, SceneError> {
        self.objects
            .get_mut(&object)
            .ok_or(SceneError::UnknownObject { id: object })
    }

    fn collection(&self, collection: CollectionId) -> Result<&CollectionRec, SceneError> {
        self.collections
            .get(&collection)
            .ok_or(SceneError::UnknownCollection { id: collection })
    }

    fn bone_mut<'a>(
        objects: &'a mut IndexMap<ObjectId, ObjectRec>,
        rig: ObjectId,
        bone: &str,
    ) -> Result<&'a mut BoneRec, SceneError> {
        let rec = objects
            .get_mut(&rig)
            .ok_or(SceneError::UnknownObject { id: rig })?;
        rec.bones
            .iter_mut()
            .find(|b| b.name == bone)
            .ok_or_else(|| SceneError::UnknownBone {
                rig,
                bone: bone.to_string(),
            })
    }

    fn destroy_object(&mut self, object: ObjectId) {
        self.objects.shift_remove(&object);
        self.root.retain(|o| *o != object);
        self.selected.retain(|o| *o != object);
        for col in self.collections.values_mut() {
            col.members.retain(|o| *o != object);
        }
    }
}

impl SceneGraph for MemoryScene {
    fn import_asset(&mut self, _kind: AssetKind, path: &Path) -> Result<(), SceneError> {
        let asset = self
            .staged
            .get(path)
            .cloned()
            .ok_or_else(|| SceneError::ImportFailed {
                path: path.display().to_string(),
                reason: "no fixture staged for this path".to_string(),
            })?;

        let mut created = Vec::new();
        for fixture in &asset.objects {
            let action = fixture
                .action
                .as_ref()
                .map(|a| self.instantiate_action(a));
            let shape_keys = fixture.shape_keys.as_ref().map(|sk| ShapeKeyBlock {
                names: sk.names.clone(),
                action: sk.action.as_ref().map(|a| self.instantiate_action(a)),
            });
            let id = self.ids.alloc_object();
            self.objects.insert(
                id,
                ObjectRec {
                    name: fixture.name.clone(),
                    kind: fixture.kind,
                    action,
                    shape_keys,
                    bones: fixture
                        .bones
                        .iter()
                        .map(|b| BoneRec {
                            name: b.clone(),
                            roll: 0.0,
                            pose: Transform::IDENTITY,
                            keyed: Vec::new(),
                        })
                        .collect(),
                    node_track: fixture.node_track.clone(),
                    node_keyed: Vec::new(),
                    material_labels: HashMap::new(),
                },
            );
            self.root.push(id);
            created.push(id);
        }
        self.selected = created;
        Ok(())
    }

    fn selected_objects(&self) -> Vec<ObjectId> {
        self.selected.clone()
    }

    fn find_collection(&self, name: &str) -> Option<CollectionId> {
        self.collection_by_name(name)
    }

    fn ensure_collection(&mut self, name: &str) -> CollectionId {
        if let Some(id) = self.collection_by_name(name) {
            return id;
        }
        let id = self.ids.alloc_collection();
        self.collections.insert(
            id,
            CollectionRec {
                name: name.to_string(),
                members: Vec::new(),
            },
        );
        id
    }

    fn collection_name(&self, collection: CollectionId) -> Result<String, SceneError> {
        Ok(self.collection(collection)?.name.clone())
    }

    fn objects_in(&self, collection: CollectionId) -> Result<Vec<ObjectId>, SceneError> {
        Ok(self.collection(collection)?.members.clone())
    }

    fn link_object(
        &mut self,
        collection: CollectionId,
        object: ObjectId,
    ) -> Result<(), SceneError> {
        self.object(object)?;
        let col = self
            .collections
            .get_mut(&collection)
            .ok_or(SceneError::UnknownCollection { id: collection })?;
        if !col.members.contains(&object) {
            col.members.push(object);
        }
        Ok(())
    }

    fn unlink_from_root(&mut self, object: ObjectId) -> Result<(), SceneError> {
        self.object(object)?;
        self.root.retain(|o| *o != object);
        Ok(())
    }

    fn remove_collection(
        &mut self,
        collection: CollectionId,
        remove_objects: bool,
    ) -> Result<(), SceneError> {
        let members = self.objects_in(collection)?;
        self.collections.shift_remove(&collection);
        if remove_objects {
            for object in members {
                self.destroy_object(object);
            }
        }
        Ok(())
    }

    fn remove_object(&mut self, object: ObjectId) -> Result<(), SceneError> {
        self.object(object)?;
        self.destroy_object(object);
        Ok(())
    }

    fn object_name(&self, object: ObjectId) -> Result<String, SceneError> {
        Ok(self.object(object)?.name.clone())
    }

    fn object_kind(&self, object: ObjectId) -> Result<ObjectKind, SceneError> {
        Ok(self.object(object)?.kind)
    }

    fn active_action(&self, object: ObjectId) -> Result<Option<ActionId>, SceneError> {
        Ok(self.object(object)?.action)
    }

    fn set_active_action(&mut self, object: ObjectId, action: ActionId) -> Result<(), SceneError> {
        if !self.actions.contains_key(&action) {
            return Err(SceneError::UnknownAction { id: action });
        }
        self.object_mut(object)?.action = Some(action);
        Ok(())
    }

    fn has_shape_keys(&self, object: ObjectId) -> Result<bool, SceneError> {
        Ok(self.object(object)?.shape_keys.is_some())
    }

    fn shape_key_names(&self, object: ObjectId) -> Result<Vec<String>, SceneError> {
        self.object(object)?
            .shape_keys
            .as_ref()
            .map(|sk| sk.names.clone())
            .ok_or(SceneError::NoShapeKeys { object })
    }

    fn shape_key_action(&self, object: ObjectId) -> Result<Option<ActionId>, SceneError> {
        self.object(object)?
            .shape_keys
            .as_ref()
            .map(|sk| sk.action)
            .ok_or(SceneError::NoShapeKeys { object })
    }

    fn set_shape_key_action(
        &mut self,
        object: ObjectId,
        action: ActionId,
    ) -> Result<(), SceneError> {
        if !self.actions.contains_key(&action) {
            return Err(SceneError::UnknownAction { id: action });
        }
        let rec = self.object_mut(object)?;
        match rec.shape_keys.as_mut() {
            Some(block) => {
                block.action = Some(action);
                Ok(())
            }
            None => Err(SceneError::NoShapeKeys { object }),
        }
    }

    fn action_name(&self, action: ActionId) -> Result<String, SceneError> {
        self.actions
            .get(&action)
            .map(|rec| rec.name.clone())
            .ok_or(SceneError::UnknownAction { id: action })
    }

    fn action_curves(&self, action: ActionId) -> Result<Vec<FCurve>, SceneError> {
        self.actions
            .get(&action)
            .map(|rec| rec.curves.clone())
            .ok_or(SceneError::UnknownAction { id: action })
    }

    fn bone_names(&self, rig: ObjectId) -> Result<Vec<String>, SceneError> {
        Ok(self
            .object(rig)?
            .bones
            .iter()
            .map(|b| b.name.clone())
            .collect())
    }

    fn pose_bone_transform(&self, rig: ObjectId, bone: &str) -> Result<Transform, SceneError> {
        self.object(rig)?
            .bones
            .iter()
            .find(|b| b.name == bone)
            .map(|b| b.pose)
            .ok_or_else(|| SceneError::UnknownBone {
                rig,
                bone: bone.to_string(),
            })
    }

    fn set_pose_bone_transform(
        &mut self,
        rig: ObjectId,
        bone: &str,
        transform: Transform,
    ) -> Result<(), SceneError> {
        Self::bone_mut(&mut self.objects, rig, bone)?.pose = transform;
        Ok(())
    }

    fn insert_bone_keyframe(
        &mut self,
        rig: ObjectId,
        bone: &str,
        channel: TransformChannel,
        frame: i32,
    ) -> Result<(), SceneError> {
        Self::bone_mut(&mut self.objects, rig, bone)?
            .keyed
            .push((channel, frame));
        Ok(())
    }

    fn edit_bone_rolls(&self, rig: ObjectId) -> Result<Vec<(String, f32)>, SceneError> {
        Ok(self
            .object(rig)?
            .bones
            .iter()
            .map(|b| (b.name.clone(), b.roll))
            .collect())
    }

    fn set_edit_bone_roll(
        &mut self,
        rig: ObjectId,
        bone: &str,
        roll: f32,
    ) -> Result<(), SceneError> {
        Self::bone_mut(&mut self.objects, rig, bone)?.roll = roll;
        Ok(())
    }

    fn insert_node_keyframe(&mut self, node: ObjectId, frame: i32) -> Result<(), SceneError> {
        self.object_mut(node)?.node_keyed.push(frame);
        Ok(())
    }

    fn node_transform_at(&mut self, node: ObjectId, frame: i32) -> Result<Transform, SceneError> {
        let rec = self.object(node)?;
        let index = usize::try_from(frame.max(1) - 1).unwrap_or(0);
        Ok(rec
            .node_track
            .get(index)
            .copied()
            .unwrap_or(Transform::IDENTITY))
    }

    fn set_render_engine(&mut self, engine: RenderEngine) -> Result<(), SceneError> {
        self.render.engine = Some(engine);
        Ok(())
    }

    fn set_device_kind(&mut self, kind: DeviceKind) -> Result<(), SceneError> {
        self.render.device_kind = Some(kind);
        Ok(())
    }

    fn available_compute_devices(&self) -> Vec<String> {
        self.devices.clone()
    }

    fn activate_compute_device(&mut self, name: &str) -> Result<(), SceneError> {
        if !self.render.active_devices.iter().any(|d| d == name) {
            self.render.active_devices.push(name.to_string());
        }
        Ok(())
    }

    fn set_compute_backend(&mut self, backend: ComputeBackend) -> Result<(), SceneError> {
        self.render.backend = Some(backend);
        Ok(())
    }

    fn set_image_format(&mut self, format: ImageFormat) -> Result<(), SceneError> {
        self.render.format = Some(format);
        Ok(())
    }

    fn set_resolution(&mut self, width: u32, height: u32) -> Result<(), SceneError> {
        self.render.resolution = Some((width, height));
        Ok(())
    }

    fn set_samples(&mut self, samples: u32) -> Result<(), SceneError> {
        self.render.samples = Some(samples);
        Ok(())
    }

    fn set_frame_range(&mut self, start: i32, end: i32) -> Result<(), SceneError> {
        self.render.frame_start = start;
        self.render.frame_end = end;
        Ok(())
    }

    fn frame_range(&self) -> (i32, i32) {
        (self.render.frame_start, self.render.frame_end)
    }

    fn set_fps(&mut self, fps: i32) -> Result<(), SceneError> {
        self.render.fps = fps;
        Ok(())
    }

    fn set_frame_remap(&mut self, old: i32, new: i32) -> Result<(), SceneError> {
        self.render.frame_remap = Some((old, new));
        Ok(())
    }

    fn set_output_path(&mut self, template: &Path) -> Result<(), SceneError> {
        self.render.output_template = Some(template.to_path_buf());
        Ok(())
    }

    fn render_animation(&mut self) -> Result<(), SceneError> {
        let template =
            self.render
                .output_template
                .clone()
                .ok_or_else(|| SceneError::RenderFailed {
                    reason: "no output path configured".to_string(),
                })?;
        let ext = self
            .render
            .format
            .unwrap_or(ImageFormat::Png)
            .extension();

        for frame in self.render.frame_start..=self.render.frame_end {
            let file = PathBuf::from(format!("{}{frame:04}.{ext}", template.display()));
            fs::write(&file, b"restage-fixture-frame")?;
        }
        self.render.renders += 1;
        Ok(())
    }

    fn set_active_camera(&mut self, camera: ObjectId) -> Result<(), SceneError> {
        self.object(camera)?;
        self.render.active_camera = Some(camera);
        Ok(())
    }

    fn set_labeled_material_color(
        &mut self,
        mesh: ObjectId,
        label: &str,
        rgba: [f32; 4],
    ) -> Result<bool, SceneError> {
        let rec = self.object_mut(mesh)?;
        match rec.material_labels.get_mut(label) {
            Some(slot) => {
                *slot = rgba;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
