//! Edit-mode bone-roll transfer between two armatures.
//!
//! Rigs exported by different tools frequently agree on bone names but not
//! on rolls, which skews retargeted rotations. Copying rolls from the
//! source rig onto same-named target bones fixes that before a transfer.

use hashbrown::HashSet;

use restage_api_core::{ObjectId, SceneGraph};

use crate::error::RetargetError;

/// Copy edit-bone rolls from `source_rig` to every same-named bone on
/// `target_rig`. Returns the number of bones edited; zero is reported, not
/// an error.
pub fn copy_bone_rolls(
    scene: &mut dyn SceneGraph,
    source_rig: ObjectId,
    target_rig: ObjectId,
) -> Result<usize, RetargetError> {
    let target_bones: HashSet<String> = scene
        .edit_bone_rolls(target_rig)?
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    let mut edited = 0;
    for (bone, roll) in scene.edit_bone_rolls(source_rig)? {
        if target_bones.contains(&bone) {
            scene.set_edit_bone_roll(target_rig, &bone, roll)?;
            edited += 1;
        }
    }

    if edited == 0 {
        log::info!("no bone rolls copied");
    } else {
        log::info!("copied {edited} bone roll(s)");
    }
    Ok(edited)
}
