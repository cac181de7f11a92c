//! One render session: staged configuration, then per-camera rendering.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use restage_api_core::{
    ComputeBackend, DeviceKind, ObjectKind, RenderEngine, SceneGraph,
};

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::output::{camera_dir, OutputLayout};

/// Fallback device kind when the configured one is not recognized.
pub const DEFAULT_DEVICE: DeviceKind = DeviceKind::Cuda;

/// Sample counts below this render noticeably noisy output.
pub const SAMPLE_FLOOR: u32 = 64;

/// One camera that was rendered, and where its frames went.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraRender {
    pub camera: String,
    pub directory: PathBuf,
}

/// What a finished session produced.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionReport {
    pub engine: RenderEngine,
    pub output_dir: PathBuf,
    pub cameras: Vec<CameraRender>,
    pub warnings: Vec<String>,
}

/// A configured render session bound to an allocated output directory.
///
/// Construction performs the whole configuration sequence: engine (fatal on
/// an unknown name), device acceleration for the path tracer (fallback +
/// warning on an unknown name), output directory allocation, format,
/// resolution, samples, frame range. Rendering is a separate step so
/// callers can inspect the session before committing to it.
#[derive(Debug)]
pub struct RenderSession {
    engine: RenderEngine,
    output_dir: PathBuf,
    camera_collection: String,
    warnings: Vec<String>,
}

impl RenderSession {
    /// Configure the scene and allocate the session's output directory.
    ///
    /// `animation_extent` is the source animation's frame range, used when
    /// the config does not pin one explicitly; `None` for both leaves the
    /// scene's range untouched.
    pub fn begin(
        scene: &mut dyn SceneGraph,
        cfg: &RenderConfig,
        animation_extent: Option<(i32, i32)>,
    ) -> Result<RenderSession, RenderError> {
        let mut warnings = Vec::new();

        let engine: RenderEngine =
            cfg.engine
                .parse()
                .map_err(|requested| RenderError::InvalidEngine { requested })?;
        scene.set_render_engine(engine)?;

        if engine.is_path_traced() {
            configure_device(scene, &cfg.device, &mut warnings)?;
        }

        let output_dir = OutputLayout::new(&cfg.output_base)
            .with_prefix(cfg.prefix.clone())
            .allocate()?;

        scene.set_image_format(cfg.format)?;
        scene.set_resolution(cfg.width, cfg.height)?;

        if let Some(samples) = cfg.samples {
            if engine.is_path_traced() {
                if samples < SAMPLE_FLOOR {
                    push_warning(
                        &mut warnings,
                        format!("sample count {samples} is below {SAMPLE_FLOOR}; output will likely be noisy"),
                    );
                }
                scene.set_samples(samples)?;
            } else {
                push_warning(
                    &mut warnings,
                    format!("sample count is meaningless for {engine}; ignoring"),
                );
            }
        }

        if let Some((start, end)) = cfg.frame_range.or(animation_extent) {
            scene.set_frame_range(start, end)?;
        }

        Ok(RenderSession {
            engine,
            output_dir,
            camera_collection: cfg.camera_collection.clone(),
            warnings,
        })
    }

    pub fn engine(&self) -> RenderEngine {
        self.engine
    }

    /// The session's freshly allocated `render_<N>` directory.
    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Render every camera in the camera grouping, each into its own
    /// subdirectory, in grouping iteration order.
    ///
    /// A missing camera grouping is a warning and an empty result, not an
    /// error: the session directory still exists and the batch goes on.
    pub fn render_all_cameras(
        &mut self,
        scene: &mut dyn SceneGraph,
    ) -> Result<Vec<CameraRender>, RenderError> {
        let Some(collection) = scene.find_collection(&self.camera_collection) else {
            push_warning(
                &mut self.warnings,
                format!("no '{}' collection found; nothing rendered", self.camera_collection),
            );
            return Ok(Vec::new());
        };

        let mut rendered = Vec::new();
        for object in scene.objects_in(collection)? {
            if scene.object_kind(object)? != ObjectKind::Camera {
                continue;
            }
            let name = scene.object_name(object)?;
            let directory = camera_dir(&self.output_dir, &name);
            fs::create_dir_all(&directory)?;

            scene.set_active_camera(object)?;
            scene.set_output_path(&directory.join("frame_"))?;
            scene.render_animation()?;

            rendered.push(CameraRender {
                camera: name,
                directory,
            });
        }
        Ok(rendered)
    }

    /// Render all cameras and close the session out into a report.
    pub fn finish(mut self, scene: &mut dyn SceneGraph) -> Result<SessionReport, RenderError> {
        let cameras = self.render_all_cameras(scene)?;
        Ok(SessionReport {
            engine: self.engine,
            output_dir: self.output_dir,
            cameras,
            warnings: self.warnings,
        })
    }
}

/// Path-tracer device setup: validate the requested kind (falling back to
/// [`DEFAULT_DEVICE`] on an unknown name), then activate every physical
/// compute device and switch the scene to the device-accelerated backend.
fn configure_device(
    scene: &mut dyn SceneGraph,
    requested: &str,
    warnings: &mut Vec<String>,
) -> Result<DeviceKind, RenderError> {
    let kind = match requested.parse::<DeviceKind>() {
        Ok(kind) => kind,
        Err(bad) => {
            push_warning(
                warnings,
                format!("unknown compute device '{bad}'; falling back to {DEFAULT_DEVICE}"),
            );
            DEFAULT_DEVICE
        }
    };
    scene.set_device_kind(kind)?;
    for device in scene.available_compute_devices() {
        scene.activate_compute_device(&device)?;
    }
    scene.set_compute_backend(ComputeBackend::Gpu)?;
    Ok(kind)
}

fn push_warning(warnings: &mut Vec<String>, message: String) {
    log::warn!("{message}");
    warnings.push(message);
}
