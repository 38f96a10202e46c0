//! Math utilities and types
//!
//! Only the small subset the immediate-mode layer needs: colors and sizes.

pub use nalgebra::{Vector2, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// RGBA color with components in `0.0..=1.0`
pub type Color = Vec4;

/// Build a color from its components
pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
    Color::new(r, g, b, a)
}

/// Clamp each component of a color into `0.0..=1.0`
pub fn saturate(color: Color) -> Color {
    color.map(|c| c.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturate_clamps_every_channel() {
        let c = saturate(rgba(1.5, -0.2, 0.5, 1.0));
        assert_eq!(c, rgba(1.0, 0.0, 0.5, 1.0));
    }
}
