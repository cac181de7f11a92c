use restage_api_core::{ObjectKind, SceneGraph};
use restage_retarget_core::copy_bone_rolls;
use restage_test_fixtures::MemoryScene;

/// it should copy rolls for same-named bones only
#[test]
fn copies_matching_bones_only() {
    let mut scene = MemoryScene::new();
    let source = scene.add_object(
        "SourceRig",
        ObjectKind::Armature,
        &["Hips", "Spine", "Tail"],
    );
    let target = scene.add_object("TargetRig", ObjectKind::Armature, &["Hips", "Spine", "Head"]);

    scene.set_edit_bone_roll(source, "Hips", 0.5).unwrap();
    scene.set_edit_bone_roll(source, "Spine", -0.25).unwrap();
    scene.set_edit_bone_roll(source, "Tail", 1.0).unwrap();

    let edited = copy_bone_rolls(&mut scene, source, target).unwrap();
    assert_eq!(edited, 2);

    let rolls = scene.edit_bone_rolls(target).unwrap();
    let roll = |name: &str| {
        rolls
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| *r)
            .unwrap()
    };
    assert!((roll("Hips") - 0.5).abs() < 1e-6);
    assert!((roll("Spine") + 0.25).abs() < 1e-6);
    assert!((roll("Head") - 0.0).abs() < 1e-6);
}

/// it should report zero edits for disjoint rigs without failing
#[test]
fn disjoint_rigs_copy_nothing() {
    let mut scene = MemoryScene::new();
    let source = scene.add_object("SourceRig", ObjectKind::Armature, &["A", "B"]);
    let target = scene.add_object("TargetRig", ObjectKind::Armature, &["C"]);

    let edited = copy_bone_rolls(&mut scene, source, target).unwrap();
    assert_eq!(edited, 0);
}
