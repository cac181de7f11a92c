//! restage-api-core: the boundary between the retarget/render pipeline and
//! the host scene-graph service.
//!
//! The host (a DCC application owning the actual scene) is reached through
//! the [`SceneGraph`] trait; everything else in this crate is the vocabulary
//! that trait speaks: ids, object kinds, the action/curve data model,
//! transforms, and render settings.

pub mod action;
pub mod error;
pub mod ids;
pub mod render;
pub mod scene;
pub mod transform;

pub use action::{frame_extent, ChannelComponent, FCurve, Keyframe};
pub use error::SceneError;
pub use ids::{ActionId, CollectionId, IdAllocator, ObjectId};
pub use render::{AssetKind, ComputeBackend, DeviceKind, ImageFormat, RenderEngine};
pub use scene::{ObjectKind, SceneGraph};
pub use transform::{Transform, TransformChannel};
