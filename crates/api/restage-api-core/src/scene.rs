//! The scene-graph service trait.
//!
//! One `SceneGraph` value is one live scene instance inside the host
//! application. The pipeline passes a `&mut dyn SceneGraph` through every
//! call instead of touching ambient host state, so multiple scenes (and
//! tests) can coexist without cross-contamination.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::FCurve;
use crate::error::SceneError;
use crate::ids::{ActionId, CollectionId, ObjectId};
use crate::render::{AssetKind, ComputeBackend, DeviceKind, ImageFormat, RenderEngine};
use crate::transform::{Transform, TransformChannel};

/// Scene object kinds the pipeline distinguishes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Skeletal rig driving mesh deformation.
    Armature,
    Mesh,
    Camera,
    /// Plain transform node; carries baked per-frame motion in some assets.
    Node,
    Other,
}

/// Host capabilities required by the retarget and render pipeline.
///
/// Enumeration methods return members in collection iteration order, and
/// "the first armature" / "the first mesh" contracts downstream are defined
/// against exactly that order. Hosts must keep it stable across calls that
/// do not change membership.
pub trait SceneGraph {
    // ----- asset import -----

    /// Import an asset file of the given kind into the scene. After a
    /// successful import the host reports the newly created objects as the
    /// current selection.
    fn import_asset(&mut self, kind: AssetKind, path: &Path) -> Result<(), SceneError>;

    /// Objects currently selected, in selection order.
    fn selected_objects(&self) -> Vec<ObjectId>;

    // ----- collections -----

    fn find_collection(&self, name: &str) -> Option<CollectionId>;

    /// Fetch the named collection, creating it (linked under the scene
    /// root) if absent.
    fn ensure_collection(&mut self, name: &str) -> CollectionId;

    fn collection_name(&self, collection: CollectionId) -> Result<String, SceneError>;

    /// Members of a collection in iteration order.
    fn objects_in(&self, collection: CollectionId) -> Result<Vec<ObjectId>, SceneError>;

    fn link_object(&mut self, collection: CollectionId, object: ObjectId)
        -> Result<(), SceneError>;

    /// Detach an object from the scene root collection (it stays alive and
    /// may be linked elsewhere).
    fn unlink_from_root(&mut self, object: ObjectId) -> Result<(), SceneError>;

    /// Remove a collection. With `remove_objects`, every object still linked
    /// to it is destroyed as well.
    fn remove_collection(
        &mut self,
        collection: CollectionId,
        remove_objects: bool,
    ) -> Result<(), SceneError>;

    fn remove_object(&mut self, object: ObjectId) -> Result<(), SceneError>;

    // ----- objects -----

    fn object_name(&self, object: ObjectId) -> Result<String, SceneError>;

    fn object_kind(&self, object: ObjectId) -> Result<ObjectKind, SceneError>;

    // ----- animation bindings -----

    /// The action referenced by the object's animation binding, if the
    /// object has a binding and the binding has an active action.
    fn active_action(&self, object: ObjectId) -> Result<Option<ActionId>, SceneError>;

    /// Point the object's animation binding at `action`, creating the
    /// binding if the object has none. The action itself is shared, not
    /// copied.
    fn set_active_action(&mut self, object: ObjectId, action: ActionId) -> Result<(), SceneError>;

    /// Whether the object (a mesh) owns a shape-key block.
    fn has_shape_keys(&self, object: ObjectId) -> Result<bool, SceneError>;

    /// Shape-key channel names on the object's shape-key block.
    fn shape_key_names(&self, object: ObjectId) -> Result<Vec<String>, SceneError>;

    /// Action bound to the shape-key block's animation binding, if any.
    /// Errors if the object has no shape-key block.
    fn shape_key_action(&self, object: ObjectId) -> Result<Option<ActionId>, SceneError>;

    fn set_shape_key_action(
        &mut self,
        object: ObjectId,
        action: ActionId,
    ) -> Result<(), SceneError>;

    // ----- actions -----

    fn action_name(&self, action: ActionId) -> Result<String, SceneError>;

    /// The action's curves with their keyframe points, in curve order.
    fn action_curves(&self, action: ActionId) -> Result<Vec<FCurve>, SceneError>;

    // ----- armatures -----

    fn bone_names(&self, rig: ObjectId) -> Result<Vec<String>, SceneError>;

    fn pose_bone_transform(&self, rig: ObjectId, bone: &str) -> Result<Transform, SceneError>;

    fn set_pose_bone_transform(
        &mut self,
        rig: ObjectId,
        bone: &str,
        transform: Transform,
    ) -> Result<(), SceneError>;

    /// Insert a keyframe for one transform channel of a pose bone at the
    /// given frame, recording the bone's current channel value.
    fn insert_bone_keyframe(
        &mut self,
        rig: ObjectId,
        bone: &str,
        channel: TransformChannel,
        frame: i32,
    ) -> Result<(), SceneError>;

    /// Edit-mode bone rolls as (bone name, roll) pairs.
    fn edit_bone_rolls(&self, rig: ObjectId) -> Result<Vec<(String, f32)>, SceneError>;

    fn set_edit_bone_roll(
        &mut self,
        rig: ObjectId,
        bone: &str,
        roll: f32,
    ) -> Result<(), SceneError>;

    // ----- node evaluation -----

    /// Insert a keyframe on a node's own transform at `frame`, forcing the
    /// host to evaluate the node there.
    fn insert_node_keyframe(&mut self, node: ObjectId, frame: i32) -> Result<(), SceneError>;

    /// The node's evaluated local transform at `frame`. Hosts may require a
    /// preceding [`insert_node_keyframe`](SceneGraph::insert_node_keyframe)
    /// at the same frame; the sampler always issues one.
    fn node_transform_at(&mut self, node: ObjectId, frame: i32) -> Result<Transform, SceneError>;

    // ----- render configuration -----

    fn set_render_engine(&mut self, engine: RenderEngine) -> Result<(), SceneError>;

    fn set_device_kind(&mut self, kind: DeviceKind) -> Result<(), SceneError>;

    /// Names of the physical compute devices the host can use.
    fn available_compute_devices(&self) -> Vec<String>;

    fn activate_compute_device(&mut self, name: &str) -> Result<(), SceneError>;

    fn set_compute_backend(&mut self, backend: ComputeBackend) -> Result<(), SceneError>;

    fn set_image_format(&mut self, format: ImageFormat) -> Result<(), SceneError>;

    fn set_resolution(&mut self, width: u32, height: u32) -> Result<(), SceneError>;

    /// Sample count for the path-traced engine. Hosts accept any value; the
    /// orchestrator decides what is meaningful.
    fn set_samples(&mut self, samples: u32) -> Result<(), SceneError>;

    fn set_frame_range(&mut self, start: i32, end: i32) -> Result<(), SceneError>;

    /// Current scene frame range (start, end), both inclusive.
    fn frame_range(&self) -> (i32, i32);

    fn set_fps(&mut self, fps: i32) -> Result<(), SceneError>;

    /// Frame-remapping values used for time stretching: map `old` source
    /// frames onto `new` output frames.
    fn set_frame_remap(&mut self, old: i32, new: i32) -> Result<(), SceneError>;

    /// Output path template; frame numbers and the format extension are
    /// appended by the host at render time.
    fn set_output_path(&mut self, template: &Path) -> Result<(), SceneError>;

    /// Render the configured frame range through the active camera into the
    /// current output path template.
    fn render_animation(&mut self) -> Result<(), SceneError>;

    /// Make the given camera the scene's active camera.
    fn set_active_camera(&mut self, camera: ObjectId) -> Result<(), SceneError>;

    // ----- materials -----

    /// Set the base color input on every material node carrying `label`
    /// across the mesh's materials. Returns whether any node matched.
    fn set_labeled_material_color(
        &mut self,
        mesh: ObjectId,
        label: &str,
        rgba: [f32; 4],
    ) -> Result<bool, SceneError>;
}
