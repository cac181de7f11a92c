use std::path::Path;

use restage_api_core::{Keyframe, ObjectKind, SceneGraph};
use restage_retarget_core::{
    ActionBinder, BindOutcome, ImportContainer, MismatchPolicy, RetargetError,
};
use restage_test_fixtures::{facial_asset, walk_cycle_asset, MemoryScene};

fn imported_walk(scene: &mut MemoryScene) -> ImportContainer {
    scene.stage_asset("walk.glb", walk_cycle_asset());
    let mut container = ImportContainer::with_defaults();
    container.import(scene, Path::new("walk.glb")).unwrap();
    container.locate_actions(scene).unwrap();
    container
}

/// it should leave the target rig referencing the very same action object,
/// so a source-side edit is visible through the target binding
#[test]
fn rebind_shares_the_action_object() {
    let mut scene = MemoryScene::with_standard_stage();
    let container = imported_walk(&mut scene);
    let source_action = container.skeletal_action().unwrap();
    let avatar = scene.find_collection("mainAvatar").unwrap();

    let binder = ActionBinder::new(Some(source_action), None, avatar);
    let bind = binder.bind_skeletal(&mut scene).unwrap();
    assert_eq!(bind.outcome, BindOutcome::Bound);

    let rig = scene.object_by_name("Avatar").unwrap();
    let bound = scene.active_action(rig).unwrap().expect("action bound");
    assert_eq!(bound, source_action);

    // Mutate the source action; the target's bound action must observe it.
    scene
        .action_curves_mut(source_action)
        .unwrap()
        .first_mut()
        .unwrap()
        .keyframes
        .push(Keyframe::new(60.0, 1.0));
    let through_target = scene.action_curves(bound).unwrap();
    assert!(through_target[0]
        .keyframes
        .iter()
        .any(|kp| kp.frame == 60.0));
}

/// it should report nothing-to-bind when no skeletal action was supplied
#[test]
fn missing_skeletal_action_is_a_noop() {
    let mut scene = MemoryScene::with_standard_stage();
    let avatar = scene.find_collection("mainAvatar").unwrap();
    let binder = ActionBinder::new(None, None, avatar);

    let bind = binder.bind_skeletal(&mut scene).unwrap();
    assert_eq!(bind.outcome, BindOutcome::NothingToBind);
    assert_eq!(bind.bound_objects, 0);
}

/// it should fail when an action exists but the target has no armature
#[test]
fn missing_target_rig_is_fatal() {
    let mut scene = MemoryScene::new();
    let container = imported_walk(&mut scene);
    let empty = scene.ensure_collection("emptyAvatar");

    let binder = ActionBinder::new(container.skeletal_action(), None, empty);
    let err = binder.bind_skeletal(&mut scene).unwrap_err();
    assert!(matches!(err, RetargetError::NoTargetRig { .. }));
}

/// it should bind the shape-key action onto every shape-keyed target mesh
#[test]
fn shape_keys_bind_to_all_meshes() {
    let mut scene = MemoryScene::with_standard_stage();
    scene.stage_asset("face.glb", facial_asset());
    let mut container = ImportContainer::with_defaults();
    container.import(&mut scene, Path::new("face.glb")).unwrap();
    container.locate_actions(&scene).unwrap();
    let action = container.shape_key_action().unwrap();
    let avatar = scene.find_collection("mainAvatar").unwrap();

    let binder = ActionBinder::new(None, Some(action), avatar);
    let bind = binder.bind_shape_keys(&mut scene).unwrap();
    assert_eq!(bind.outcome, BindOutcome::Bound);
    assert_eq!(bind.bound_objects, 2);

    for mesh in ["Body", "Eyes"] {
        let id = scene.object_by_name(mesh).unwrap();
        assert_eq!(scene.shape_key_action(id).unwrap(), Some(action));
    }
}

/// it should fail when a shape-key action exists but no target mesh has
/// shape keys
#[test]
fn missing_target_mesh_is_fatal() {
    let mut scene = MemoryScene::new();
    scene.stage_asset("face.glb", facial_asset());
    let mut container = ImportContainer::with_defaults();
    container.import(&mut scene, Path::new("face.glb")).unwrap();
    container.locate_actions(&scene).unwrap();

    let bare = scene.ensure_collection("bareAvatar");
    let mesh = scene.add_object("PlainMesh", ObjectKind::Mesh, &[]);
    scene.link_object(bare, mesh).unwrap();

    let binder = ActionBinder::new(None, container.shape_key_action(), bare);
    let err = binder.bind_shape_keys(&mut scene).unwrap_err();
    assert!(matches!(err, RetargetError::NoTargetMesh { .. }));
}

/// it should surface unmatched channels under the warn policy but still bind
#[test]
fn warn_policy_counts_unmatched_channels() {
    let mut scene = MemoryScene::new();
    let container = imported_walk(&mut scene);

    // Target rig lacks the "Head" bone the source action animates.
    let avatar = scene.ensure_collection("partialAvatar");
    let rig = scene.add_object("PartialRig", ObjectKind::Armature, &["Hips", "Spine"]);
    scene.link_object(avatar, rig).unwrap();

    let binder = ActionBinder::new(container.skeletal_action(), None, avatar);
    let bind = binder.bind_skeletal(&mut scene).unwrap();
    assert_eq!(bind.outcome, BindOutcome::Bound);
    assert_eq!(bind.unmatched, vec!["Head".to_string()]);
    assert!(scene.active_action(rig).unwrap().is_some());
}

/// it should abort the bind under the error policy
#[test]
fn error_policy_fails_on_unmatched_channels() {
    let mut scene = MemoryScene::new();
    let container = imported_walk(&mut scene);

    let avatar = scene.ensure_collection("partialAvatar");
    let rig = scene.add_object("PartialRig", ObjectKind::Armature, &["Hips", "Spine"]);
    scene.link_object(avatar, rig).unwrap();

    let binder = ActionBinder::new(container.skeletal_action(), None, avatar)
        .with_mismatch_policy(MismatchPolicy::Error);
    let err = binder.bind_skeletal(&mut scene).unwrap_err();
    match err {
        RetargetError::UnmatchedChannels { unmatched, .. } => {
            assert_eq!(unmatched, vec!["Head".to_string()]);
        }
        other => panic!("expected UnmatchedChannels, got {other:?}"),
    }
    // The bind must not have happened.
    assert!(scene.active_action(rig).unwrap().is_none());
}

/// it should bind silently under the ignore policy
#[test]
fn ignore_policy_binds_without_complaint() {
    let mut scene = MemoryScene::new();
    let container = imported_walk(&mut scene);

    let avatar = scene.ensure_collection("partialAvatar");
    let rig = scene.add_object("PartialRig", ObjectKind::Armature, &["Hips"]);
    scene.link_object(avatar, rig).unwrap();

    let binder = ActionBinder::new(container.skeletal_action(), None, avatar)
        .with_mismatch_policy(MismatchPolicy::Ignore);
    let bind = binder.bind_skeletal(&mut scene).unwrap();
    assert_eq!(bind.outcome, BindOutcome::Bound);
    assert!(scene.active_action(rig).unwrap().is_some());
}
