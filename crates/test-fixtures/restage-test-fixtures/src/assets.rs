//! Canned asset descriptions that [`MemoryScene`](crate::MemoryScene)
//! instantiates on import.
//!
//! The walk-cycle asset is embedded as JSON and parsed once; the other
//! builders construct their fixtures in code.

use anyhow::Context;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use restage_api_core::{ChannelComponent, FCurve, Keyframe, ObjectKind, Transform};

/// A named action carried by a fixture object.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FixtureAction {
    pub name: String,
    pub curves: Vec<FCurve>,
}

/// Shape-key block on a fixture mesh.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FixtureShapeKeys {
    pub names: Vec<String>,
    #[serde(default)]
    pub action: Option<FixtureAction>,
}

/// One object an asset import creates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FixtureObject {
    pub name: String,
    pub kind: ObjectKind,
    #[serde(default)]
    pub action: Option<FixtureAction>,
    #[serde(default)]
    pub shape_keys: Option<FixtureShapeKeys>,
    #[serde(default)]
    pub bones: Vec<String>,
    /// Per-frame local transforms for `Node` objects, index = frame - 1.
    #[serde(default)]
    pub node_track: Vec<Transform>,
}

/// Everything one import produces.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FixtureAsset {
    pub objects: Vec<FixtureObject>,
}

/// Parse a fixture asset from its JSON description.
pub fn asset_from_json(raw: &str) -> anyhow::Result<FixtureAsset> {
    serde_json::from_str(raw).context("failed to parse fixture asset JSON")
}

static WALK_CYCLE: Lazy<FixtureAsset> = Lazy::new(|| {
    asset_from_json(include_str!("../fixtures/walk_cycle.json"))
        .expect("walk_cycle fixture should parse")
});

/// Rig "Rig" with action "WalkCycle" spanning frames 1–48, no shape keys.
pub fn walk_cycle_asset() -> FixtureAsset {
    WALK_CYCLE.clone()
}

/// Mesh-only asset with a shape-key block and a bound shape-key action;
/// carries no armature at all.
pub fn facial_asset() -> FixtureAsset {
    let curves = vec![
        FCurve::new(
            "Blink",
            ChannelComponent::ShapeKeyWeight,
            0,
            vec![
                Keyframe::new(1.0, 0.0),
                Keyframe::new(12.0, 1.0),
                Keyframe::new(24.0, 0.0),
            ],
        ),
        FCurve::new(
            "JawOpen",
            ChannelComponent::ShapeKeyWeight,
            0,
            vec![Keyframe::new(1.0, 0.0), Keyframe::new(24.0, 0.6)],
        ),
    ];
    FixtureAsset {
        objects: vec![FixtureObject {
            name: "FaceMesh".to_string(),
            kind: ObjectKind::Mesh,
            action: None,
            shape_keys: Some(FixtureShapeKeys {
                names: vec!["Blink".to_string(), "JawOpen".to_string()],
                action: Some(FixtureAction {
                    name: "FaceTake".to_string(),
                    curves,
                }),
            }),
            bones: Vec::new(),
            node_track: Vec::new(),
        }],
    }
}

/// Transform nodes named after bones, each with `frames` baked transforms.
/// The per-frame location x encodes the frame so tests can spot-check what
/// the sampler read.
pub fn node_motion_asset(node_names: &[&str], frames: usize) -> FixtureAsset {
    let objects = node_names
        .iter()
        .map(|name| {
            let node_track = (0..frames)
                .map(|i| Transform {
                    location: [(i + 1) as f32 * 0.1, 0.0, 0.0],
                    ..Transform::IDENTITY
                })
                .collect();
            FixtureObject {
                name: (*name).to_string(),
                kind: ObjectKind::Node,
                action: None,
                shape_keys: None,
                bones: Vec::new(),
                node_track,
            }
        })
        .collect();
    FixtureAsset { objects }
}
