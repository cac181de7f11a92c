//! Local-space transform values exchanged with the host.

use serde::{Deserialize, Serialize};

/// A decomposed local transform: location, rotation quaternion (w, x, y, z),
/// and per-axis scale.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub location: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        location: [0.0; 3],
        rotation: [1.0, 0.0, 0.0, 0.0],
        scale: [1.0; 3],
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The three keyable transform channels on a pose bone.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TransformChannel {
    Location,
    Rotation,
    Scale,
}

impl TransformChannel {
    pub const ALL: [TransformChannel; 3] = [
        TransformChannel::Location,
        TransformChannel::Rotation,
        TransformChannel::Scale,
    ];
}
