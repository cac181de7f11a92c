//! Deterministic fixtures for the restage crates: an in-memory scene-graph
//! host, canned assets, and unique temp output roots.

pub mod assets;
pub mod paths;
pub mod scene;

pub use assets::{
    asset_from_json, facial_asset, node_motion_asset, walk_cycle_asset, FixtureAction,
    FixtureAsset, FixtureObject, FixtureShapeKeys,
};
pub use paths::temp_output_root;
pub use scene::{MemoryScene, RenderState};
