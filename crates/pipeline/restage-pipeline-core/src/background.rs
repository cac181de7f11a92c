//! Background geometry replacement.
//!
//! Clears the `Background` collection and refills it with a freshly
//! imported asset. The collection itself is pre-authored scene content and
//! is never created or destroyed here.

use std::path::Path;

use restage_api_core::{AssetKind, SceneGraph};

use crate::diagnostics::{Diagnostics, Stage};
use crate::error::PipelineError;

pub const BACKGROUND_COLLECTION: &str = "Background";

/// Replace the contents of the background collection with the asset at
/// `path`. Returns whether a replacement happened; a missing collection is
/// a warning, not an error.
pub fn replace_background(
    scene: &mut dyn SceneGraph,
    path: &Path,
    diagnostics: &mut Diagnostics,
) -> Result<bool, PipelineError> {
    let kind =
        AssetKind::from_path(path).ok_or_else(|| PipelineError::UnsupportedBackground {
            path: path.display().to_string(),
        })?;

    let Some(collection) = scene.find_collection(BACKGROUND_COLLECTION) else {
        diagnostics.warn(Stage::Background, "Background collection not found");
        return Ok(false);
    };

    for object in scene.objects_in(collection)? {
        scene.remove_object(object)?;
    }

    scene.import_asset(kind, path)?;
    for object in scene.selected_objects() {
        scene.link_object(collection, object)?;
        scene.unlink_from_root(object)?;
    }
    Ok(true)
}
