use std::path::Path;

use restage_api_core::{ObjectKind, SceneGraph};
use restage_retarget_core::{ContainerConfig, ImportContainer, RetargetError};
use restage_test_fixtures::{
    facial_asset, walk_cycle_asset, FixtureAction, FixtureAsset, FixtureObject, MemoryScene,
};

fn rig_without_action() -> FixtureAsset {
    FixtureAsset {
        objects: vec![FixtureObject {
            name: "SilentRig".to_string(),
            kind: ObjectKind::Armature,
            action: None,
            shape_keys: None,
            bones: vec!["Hips".to_string()],
            node_track: Vec::new(),
        }],
    }
}

fn rig_with_empty_action() -> FixtureAsset {
    FixtureAsset {
        objects: vec![FixtureObject {
            name: "EmptyRig".to_string(),
            kind: ObjectKind::Armature,
            action: Some(FixtureAction {
                name: "Empty".to_string(),
                curves: Vec::new(),
            }),
            shape_keys: None,
            bones: vec!["Hips".to_string()],
            node_track: Vec::new(),
        }],
    }
}

/// it should import the walk-cycle asset, quarantine it, and report the
/// action's true frame extent
#[test]
fn walk_cycle_import_and_frame_range() {
    let mut scene = MemoryScene::with_standard_stage();
    scene.stage_asset("walk.glb", walk_cycle_asset());

    let mut container = ImportContainer::with_defaults();
    container.import(&mut scene, Path::new("walk.glb")).unwrap();
    container.locate_actions(&scene).unwrap();

    let rig = container.rig().expect("rig located");
    assert_eq!(scene.object_name(rig).unwrap(), "Rig");
    let action = container.skeletal_action().expect("action located");
    assert_eq!(scene.action_name(action).unwrap(), "WalkCycle");
    assert_eq!(container.frame_range(&scene).unwrap(), Some((1, 48)));

    let quarantine = container.collection_id(&scene).expect("collection exists");
    assert_eq!(scene.objects_in(quarantine).unwrap().len(), 2);
}

/// it should reject unknown extensions before touching the scene
#[test]
fn unsupported_extension_is_fatal() {
    let mut scene = MemoryScene::new();
    let mut container = ImportContainer::with_defaults();
    let err = container
        .import(&mut scene, Path::new("walk.obj"))
        .unwrap_err();
    assert!(matches!(err, RetargetError::UnsupportedFormat { .. }));
    assert!(scene.find_collection("importedAnimation").is_none());
}

/// it should treat a rig without any action as fatal
#[test]
fn rig_without_action_is_no_action_found() {
    let mut scene = MemoryScene::new();
    scene.stage_asset("silent.glb", rig_without_action());

    let mut container = ImportContainer::with_defaults();
    container
        .import(&mut scene, Path::new("silent.glb"))
        .unwrap();
    let err = container.locate_skeletal_action(&scene).unwrap_err();
    assert!(matches!(err, RetargetError::NoActionFound { .. }));
}

/// it should tolerate an asset with no armature and still find the
/// shape-key action
#[test]
fn facial_only_asset_locates_shape_keys_only() {
    let mut scene = MemoryScene::new();
    scene.stage_asset("face.glb", facial_asset());

    let mut container = ImportContainer::with_defaults();
    container.import(&mut scene, Path::new("face.glb")).unwrap();
    container.locate_actions(&scene).unwrap();

    assert!(container.rig().is_none());
    assert!(container.skeletal_action().is_none());
    let action = container.shape_key_action().expect("shape action located");
    assert_eq!(scene.action_name(action).unwrap(), "FaceTake");
}

/// it should report an undefined frame range for a curve-less action,
/// never (0, 0)
#[test]
fn empty_action_has_undefined_frame_range() {
    let mut scene = MemoryScene::new();
    scene.stage_asset("empty.glb", rig_with_empty_action());

    let mut container = ImportContainer::with_defaults();
    container
        .import(&mut scene, Path::new("empty.glb"))
        .unwrap();
    container.locate_skeletal_action(&scene).unwrap();

    assert!(container.skeletal_action().is_some());
    assert_eq!(container.frame_range(&scene).unwrap(), None);
}

/// it should tear down idempotently, including on a never-imported container
#[test]
fn teardown_is_idempotent() {
    let mut scene = MemoryScene::new();
    scene.stage_asset("walk.glb", walk_cycle_asset());

    let mut container = ImportContainer::with_defaults();
    container.import(&mut scene, Path::new("walk.glb")).unwrap();
    let quarantine = container.collection_id(&scene).unwrap();
    let members = scene.objects_in(quarantine).unwrap();

    container.teardown(&mut scene).unwrap();
    assert!(scene.find_collection("importedAnimation").is_none());
    assert!(members.iter().all(|o| !scene.object_exists(*o)));

    container.teardown(&mut scene).unwrap();

    let untouched = ImportContainer::with_defaults();
    untouched.teardown(&mut scene).unwrap();
}

/// it should purge stale quarantine members on re-import by default
#[test]
fn reimport_purges_stale_members() {
    let mut scene = MemoryScene::new();
    scene.stage_asset("walk.glb", walk_cycle_asset());
    scene.stage_asset("face.glb", facial_asset());

    let mut first = ImportContainer::with_defaults();
    first.import(&mut scene, Path::new("walk.glb")).unwrap();

    let mut second = ImportContainer::with_defaults();
    second.import(&mut scene, Path::new("face.glb")).unwrap();

    let quarantine = second.collection_id(&scene).unwrap();
    let names: Vec<String> = scene
        .objects_in(quarantine)
        .unwrap()
        .into_iter()
        .map(|o| scene.object_name(o).unwrap())
        .collect();
    assert_eq!(names, vec!["FaceMesh".to_string()]);
}

/// it should append on re-import when purge is disabled (the historical
/// behavior)
#[test]
fn reimport_appends_with_purge_disabled() {
    let cfg = ContainerConfig {
        purge_on_import: false,
        ..ContainerConfig::default()
    };
    let mut scene = MemoryScene::new();
    scene.stage_asset("walk.glb", walk_cycle_asset());
    scene.stage_asset("face.glb", facial_asset());

    let mut first = ImportContainer::new(cfg.clone());
    first.import(&mut scene, Path::new("walk.glb")).unwrap();
    let mut second = ImportContainer::new(cfg);
    second.import(&mut scene, Path::new("face.glb")).unwrap();

    let quarantine = second.collection_id(&scene).unwrap();
    assert_eq!(scene.objects_in(quarantine).unwrap().len(), 3);
}
