//! Action and keyframe-curve data model.
//!
//! An action is a named, reusable bundle of keyframe curves owned by the
//! host. The pipeline reads curves to compute frame extents and to validate
//! channel names against a target rig; it never edits them in place.

use serde::{Deserialize, Serialize};

/// One keyframe point on a curve. Frames are real numbers but conventionally
/// integral.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub frame: f32,
    pub value: f32,
}

impl Keyframe {
    pub fn new(frame: f32, value: f32) -> Self {
        Self { frame, value }
    }
}

/// Which animated property a curve drives on its target.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ChannelComponent {
    Location,
    Rotation,
    Scale,
    /// Blend-shape channel weight.
    ShapeKeyWeight,
}

/// A named animation channel: the target (a bone name, or a shape-key
/// channel name), the driven component, and the ordered keyframe points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FCurve {
    /// Bone or shape-key channel name the curve resolves against.
    pub target: String,
    pub component: ChannelComponent,
    /// Index into a multi-component property (e.g. 0..2 for location axes).
    pub array_index: u8,
    pub keyframes: Vec<Keyframe>,
}

impl FCurve {
    pub fn new(
        target: impl Into<String>,
        component: ChannelComponent,
        array_index: u8,
        keyframes: Vec<Keyframe>,
    ) -> Self {
        Self {
            target: target.into(),
            component,
            array_index,
            keyframes,
        }
    }

    /// Min/max frame over this curve's points, `None` for a point-less curve.
    pub fn frame_span(&self) -> Option<(f32, f32)> {
        let mut points = self.keyframes.iter();
        let first = points.next()?;
        let mut min = first.frame;
        let mut max = first.frame;
        for kp in points {
            min = min.min(kp.frame);
            max = max.max(kp.frame);
        }
        Some((min, max))
    }
}

/// Min/max frame across every keyframe point of every curve.
///
/// Returns `None` when there are no curves or no curve has any points.
/// Callers must treat `None` as "do not constrain the frame range", never
/// as frame zero.
pub fn frame_extent(curves: &[FCurve]) -> Option<(f32, f32)> {
    let mut extent: Option<(f32, f32)> = None;
    for curve in curves {
        if let Some((lo, hi)) = curve.frame_span() {
            extent = Some(match extent {
                Some((min, max)) => (min.min(lo), max.max(hi)),
                None => (lo, hi),
            });
        }
    }
    extent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(target: &str, frames: &[f32]) -> FCurve {
        FCurve::new(
            target,
            ChannelComponent::Location,
            0,
            frames.iter().map(|f| Keyframe::new(*f, 0.0)).collect(),
        )
    }

    #[test]
    fn extent_spans_all_curves() {
        let curves = vec![curve("Hips", &[4.0, 10.0]), curve("Spine", &[1.0, 48.0])];
        assert_eq!(frame_extent(&curves), Some((1.0, 48.0)));
    }

    #[test]
    fn extent_is_none_for_empty_action() {
        assert_eq!(frame_extent(&[]), None);
        let empty = vec![curve("Hips", &[])];
        assert_eq!(frame_extent(&empty), None);
    }

    #[test]
    fn extent_skips_pointless_curves() {
        let curves = vec![curve("Hips", &[]), curve("Spine", &[7.0])];
        assert_eq!(frame_extent(&curves), Some((7.0, 7.0)));
    }

    #[test]
    fn single_keyframe_span_collapses() {
        assert_eq!(curve("Hips", &[3.0]).frame_span(), Some((3.0, 3.0)));
    }
}
