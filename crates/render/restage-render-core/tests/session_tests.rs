use restage_api_core::{ComputeBackend, DeviceKind, RenderEngine, SceneGraph};
use restage_render_core::{RenderConfig, RenderError, RenderSession};
use restage_test_fixtures::{temp_output_root, MemoryScene};

fn config(engine: &str, device: &str) -> RenderConfig {
    RenderConfig {
        engine: engine.to_string(),
        device: device.to_string(),
        output_base: temp_output_root("session"),
        ..RenderConfig::default()
    }
}

/// it should reject an engine outside the enumerated set
#[test]
fn invalid_engine_is_fatal() {
    let mut scene = MemoryScene::with_standard_stage();
    let err = RenderSession::begin(&mut scene, &config("LUXRENDER", "CUDA"), None).unwrap_err();
    match err {
        RenderError::InvalidEngine { requested } => assert_eq!(requested, "LUXRENDER"),
        other => panic!("expected InvalidEngine, got {other:?}"),
    }
}

/// it should fall back to the default device with a warning instead of
/// failing the batch over a bad device string
#[test]
fn bogus_device_falls_back_with_warning() {
    let mut scene = MemoryScene::with_standard_stage();
    let session = RenderSession::begin(&mut scene, &config("CYCLES", "BOGUS"), None).unwrap();

    assert!(session
        .warnings()
        .iter()
        .any(|w| w.contains("BOGUS") && w.contains("falling back")));
    let state = scene.render_state();
    assert_eq!(state.engine, Some(RenderEngine::Cycles));
    assert_eq!(state.device_kind, Some(DeviceKind::Cuda));
    assert_eq!(state.backend, Some(ComputeBackend::Gpu));
    assert_eq!(state.active_devices, scene.available_compute_devices());
}

/// it should accept-and-ignore a sample count on a non-path-traced engine
#[test]
fn samples_on_eevee_are_ignored_with_warning() {
    let mut scene = MemoryScene::with_standard_stage();
    let mut cfg = config("BLENDER_EEVEE", "CUDA");
    cfg.samples = Some(128);
    let session = RenderSession::begin(&mut scene, &cfg, None).unwrap();

    assert!(session.warnings().iter().any(|w| w.contains("meaningless")));
    assert_eq!(scene.render_state().samples, None);
}

/// it should warn about likely-noisy sample counts but still apply them
#[test]
fn low_sample_count_warns_but_applies() {
    let mut scene = MemoryScene::with_standard_stage();
    let mut cfg = config("CYCLES", "OPTIX");
    cfg.samples = Some(16);
    let session = RenderSession::begin(&mut scene, &cfg, None).unwrap();

    assert!(session.warnings().iter().any(|w| w.contains("noisy")));
    assert_eq!(scene.render_state().samples, Some(16));
    assert_eq!(scene.render_state().device_kind, Some(DeviceKind::Optix));
}

/// it should default the frame range to the animation extent and let an
/// explicit range override it
#[test]
fn frame_range_defaults_to_animation_extent() {
    let mut scene = MemoryScene::with_standard_stage();
    RenderSession::begin(&mut scene, &config("CYCLES", "CUDA"), Some((1, 48))).unwrap();
    assert_eq!(scene.frame_range(), (1, 48));

    let mut cfg = config("CYCLES", "CUDA");
    cfg.frame_range = Some((10, 20));
    RenderSession::begin(&mut scene, &cfg, Some((1, 48))).unwrap();
    assert_eq!(scene.frame_range(), (10, 20));
}

/// it should leave the scene range untouched when nothing pins one
#[test]
fn absent_range_leaves_scene_untouched() {
    let mut scene = MemoryScene::with_standard_stage();
    let before = scene.frame_range();
    RenderSession::begin(&mut scene, &config("CYCLES", "CUDA"), None).unwrap();
    assert_eq!(scene.frame_range(), before);
}

/// it should render every camera into its own subdirectory with numbered
/// frames
#[test]
fn renders_each_camera_into_its_own_folder() {
    let mut scene = MemoryScene::with_standard_stage();
    let mut cfg = config("CYCLES", "CUDA");
    cfg.frame_range = Some((1, 4));
    let session = RenderSession::begin(&mut scene, &cfg, None).unwrap();
    let output_dir = session.output_dir().clone();

    let report = session.finish(&mut scene).unwrap();
    assert_eq!(report.cameras.len(), 2);
    assert_eq!(report.cameras[0].camera, "Cam_Front");
    assert_eq!(report.cameras[1].camera, "Cam_Side");
    assert_eq!(scene.render_state().renders, 2);

    for camera in &report.cameras {
        assert_eq!(camera.directory, output_dir.join(&camera.camera));
        for frame in 1..=4 {
            let file = camera.directory.join(format!("frame_{frame:04}.png"));
            assert!(file.is_file(), "missing {}", file.display());
        }
    }
}

/// it should treat a missing camera grouping as zero cameras, not an error,
/// while still allocating the session directory
#[test]
fn missing_camera_grouping_renders_nothing() {
    let mut scene = MemoryScene::new();
    let cfg = config("CYCLES", "CUDA");
    let session = RenderSession::begin(&mut scene, &cfg, None).unwrap();
    let output_dir = session.output_dir().clone();

    let report = session.finish(&mut scene).unwrap();
    assert!(report.cameras.is_empty());
    assert!(report.warnings.iter().any(|w| w.contains("Cameras")));
    assert!(output_dir.is_dir());
    assert_eq!(scene.render_state().renders, 0);
}
