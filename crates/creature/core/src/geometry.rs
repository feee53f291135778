//! Small geometric and colorimetric helpers shared by perception.
//!
//! Positions use [`glam::Vec3`] with `y` pointing up.

use core::ops::{Add, Mul};

use glam::Vec3;

/// Linear RGBA color, components nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Neutral mid gray, the fallback whenever a lighting query is unavailable.
    pub const GRAY: Self = Self::new(0.5, 0.5, 0.5, 1.0);
    pub const CLEAR: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Perceived brightness (Rec. 601 luma weights).
    #[inline]
    pub fn grayscale(self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Returns the color with a different alpha.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Composites `self` over `background` using `self.a` as coverage.
    pub fn over(self, background: Color) -> Color {
        let a = self.a;
        Color::new(
            self.r * a + background.r * (1.0 - a),
            self.g * a + background.g * (1.0 - a),
            self.b * a + background.b * (1.0 - a),
            1.0,
        )
    }

    /// Sum of per-channel absolute differences, ignoring alpha.
    pub fn contrast(self, other: Color) -> f32 {
        (self.r - other.r).abs() + (self.g - other.g).abs() + (self.b - other.b).abs()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::GRAY
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color::new(
            self.r * rhs.r,
            self.g * rhs.g,
            self.b * rhs.b,
            self.a * rhs.a,
        )
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
            self.a + rhs.a,
        )
    }
}

/// Angle between two vectors in degrees; zero when either is degenerate.
pub fn angle_degrees(a: Vec3, b: Vec3) -> f32 {
    let (Some(a), Some(b)) = (a.try_normalize(), b.try_normalize()) else {
        return 0.0;
    };
    a.dot(b).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Horizontal distance, ignoring height.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let d = b - a;
    (d.x * d.x + d.z * d.z).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_has_half_brightness() {
        assert!((Color::GRAY.grayscale() - 0.5).abs() < 1e-6);
        assert!((Color::WHITE.grayscale() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn opaque_color_hides_background() {
        let fg = Color::rgb(0.3, 0.3, 0.3);
        let bg = Color::rgb(0.9, 0.1, 0.1);
        assert_eq!(fg.over(bg), fg);
        assert!((fg.with_alpha(0.0).over(bg).contrast(bg)).abs() < 1e-6);
    }

    #[test]
    fn angle_handles_zero_vectors() {
        assert_eq!(angle_degrees(Vec3::ZERO, Vec3::X), 0.0);
        assert!((angle_degrees(Vec3::X, Vec3::Z) - 90.0).abs() < 1e-3);
    }
}
