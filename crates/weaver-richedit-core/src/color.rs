//! Color utilities for editor styling commands.

use serde::{Deserialize, Serialize};

/// RGBA color packed as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    pub const BLACK: Rgba = Rgba(0x000000FF);
    pub const WHITE: Rgba = Rgba(0xFFFFFFFF);

    /// CSS `rgba()` form, as handed to the engine.
    pub fn to_css(self) -> String {
        rgba_u32_to_css(self.0)
    }
}

/// Convert RGBA u32 (packed as 0xRRGGBBAA) to CSS rgba() string.
pub fn rgba_u32_to_css(color: u32) -> String {
    let [r, g, b, a] = color.to_be_bytes();
    let a = a as f32 / 255.0;
    format!("rgba({}, {}, {}, {})", r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_to_css() {
        // Fully opaque red
        assert_eq!(rgba_u32_to_css(0xFF0000FF), "rgba(255, 0, 0, 1)");
        // Semi-transparent green
        assert_eq!(rgba_u32_to_css(0x00FF0080), "rgba(0, 255, 0, 0.5019608)");
        // Fully transparent blue
        assert_eq!(rgba_u32_to_css(0x0000FF00), "rgba(0, 0, 255, 0)");
    }
}
