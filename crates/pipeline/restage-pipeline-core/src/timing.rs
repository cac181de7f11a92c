//! Framerate retiming via the scene's frame-remap values.

use serde::{Deserialize, Serialize};

use restage_api_core::SceneGraph;

use crate::error::PipelineError;

/// Time-stretch parameters: play back `old_fps` source frames as
/// `target_fps` output frames.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Retime {
    pub target_fps: i32,
    pub old_fps: i32,
}

/// Set the scene framerate and the frame-remapping pair.
pub fn retime_framerate(scene: &mut dyn SceneGraph, retime: Retime) -> Result<(), PipelineError> {
    scene.set_fps(retime.target_fps)?;
    scene.set_frame_remap(retime.old_fps, retime.target_fps)?;
    log::info!(
        "framerate changed to {} with remap {} -> {}",
        retime.target_fps,
        retime.old_fps,
        retime.target_fps
    );
    Ok(())
}
