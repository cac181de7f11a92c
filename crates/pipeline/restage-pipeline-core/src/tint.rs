//! Material tinting by labeled color node.

use restage_api_core::{ObjectId, SceneGraph};

use crate::error::PipelineError;

/// Default label on the material node whose base color gets replaced.
pub const DEFAULT_COLOR_LABEL: &str = "viconColor";

/// Parse a `#RRGGBB` (or `RRGGBB`) hex string into straight-alpha RGBA.
pub fn parse_hex_color(value: &str) -> Result<[f32; 4], PipelineError> {
    let hex = value.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(PipelineError::InvalidColor {
            value: value.to_string(),
        });
    }
    let mut rgb = [0.0f32; 3];
    for (i, chunk) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| {
            PipelineError::InvalidColor {
                value: value.to_string(),
            }
        })?;
        *chunk = f32::from(byte) / 255.0;
    }
    Ok([rgb[0], rgb[1], rgb[2], 1.0])
}

/// Set the labeled color node on every material of `mesh` to the given hex
/// color. Returns whether any node matched the label.
pub fn tint_labeled_material(
    scene: &mut dyn SceneGraph,
    mesh: ObjectId,
    hex: &str,
    label: &str,
) -> Result<bool, PipelineError> {
    let rgba = parse_hex_color(hex)?;
    let matched = scene.set_labeled_material_color(mesh, label, rgba)?;
    if !matched {
        log::warn!("no material node labeled '{label}' on mesh {mesh:?}");
    }
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hash_prefixed_hex() {
        let rgba = parse_hex_color("#FF8000").expect("valid color");
        assert!((rgba[0] - 1.0).abs() < 1e-6);
        assert!((rgba[1] - 128.0 / 255.0).abs() < 1e-6);
        assert!((rgba[2] - 0.0).abs() < 1e-6);
        assert!((rgba[3] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_short_and_garbage_input() {
        assert!(parse_hex_color("#FFF").is_err());
        assert!(parse_hex_color("not-a-color").is_err());
        assert!(parse_hex_color("#GGGGGG").is_err());
    }

    #[test]
    fn accepts_bare_hex() {
        assert!(parse_hex_color("334455").is_ok());
    }
}
