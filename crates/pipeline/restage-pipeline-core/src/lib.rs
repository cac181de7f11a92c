//! restage-pipeline
//!
//! One asset's complete run: quarantine import, action discovery, retarget
//! onto the target avatar, container teardown, optional background
//! replacement and framerate retiming, then a render session over every
//! camera. A batch launcher drives one host process per asset and calls
//! [`AssetJob::run`] once in each; a fatal error aborts that asset only.

pub mod background;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod timing;
pub mod tint;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use restage_api_core::SceneGraph;
use restage_render_core::{RenderSession, SessionReport};
use restage_retarget_core::{ImportContainer, RetargetError, RetargetReport};

pub use crate::background::{replace_background, BACKGROUND_COLLECTION};
pub use crate::config::{PipelineConfig, DEFAULT_TARGET_COLLECTION};
pub use crate::diagnostics::{Diagnostic, Diagnostics, Stage};
pub use crate::error::PipelineError;
pub use crate::timing::{retime_framerate, Retime};
pub use crate::tint::{parse_hex_color, tint_labeled_material, DEFAULT_COLOR_LABEL};

/// Everything one finished asset run produced.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobReport {
    pub asset: PathBuf,
    /// Frame extent of the source animation, when it had one.
    pub frame_extent: Option<(i32, i32)>,
    pub retarget: RetargetReport,
    pub session: SessionReport,
    pub diagnostics: Diagnostics,
}

/// One asset's pipeline run.
#[derive(Debug)]
pub struct AssetJob {
    cfg: PipelineConfig,
}

impl AssetJob {
    pub fn new(cfg: PipelineConfig) -> Self {
        Self { cfg }
    }

    /// Run the full import → retarget → render sequence for the asset at
    /// `path` against the given scene.
    pub fn run(&self, scene: &mut dyn SceneGraph, path: &Path) -> Result<JobReport, PipelineError> {
        let mut diagnostics = Diagnostics::new();

        // Import and discovery. The frame extent must be read before
        // teardown destroys the container's objects.
        let mut container = ImportContainer::new(self.cfg.container.clone());
        container.import(scene, path)?;
        container.locate_actions(scene)?;
        let frame_extent = container.frame_range(scene)?;
        if container.skeletal_action().is_none() {
            diagnostics.warn(Stage::Import, "asset carries no skeletal action");
        }

        // Transfer, then drop the quarantine. The target avatar is
        // pre-authored scene content; the pipeline never creates it.
        let target = scene
            .find_collection(&self.cfg.target_collection)
            .ok_or_else(|| {
                PipelineError::Retarget(RetargetError::NoTargetRig {
                    collection: self.cfg.target_collection.clone(),
                })
            })?;
        let retarget =
            self.cfg
                .strategy
                .execute(scene, &container, target, self.cfg.mismatch)?;
        if let RetargetReport::Rebind(report) = &retarget {
            if report.unmatched_total() > 0 {
                diagnostics.warn(
                    Stage::Retarget,
                    format!(
                        "{} source channel(s) had no target counterpart",
                        report.unmatched_total()
                    ),
                );
            }
        }
        container.teardown(scene)?;

        // Optional scene edits.
        if let Some(background) = &self.cfg.background {
            replace_background(scene, background, &mut diagnostics)?;
        }
        if let Some(retime) = self.cfg.retime {
            retime_framerate(scene, retime)?;
        }

        // Render every camera.
        let session = RenderSession::begin(scene, &self.cfg.render, frame_extent)?
            .finish(scene)?;
        diagnostics.absorb(Stage::Render, &session.warnings);

        Ok(JobReport {
            asset: path.to_path_buf(),
            frame_extent,
            retarget,
            session,
            diagnostics,
        })
    }
}
