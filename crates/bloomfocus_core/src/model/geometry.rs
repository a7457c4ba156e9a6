//! Minimal 3D vector used for placement records.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Three-component vector in garden space (`y` is up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns the unit vector with the same direction.
    ///
    /// Degenerate (zero or non-finite) input falls back to `Vec3::UP` so a
    /// normal is always usable by the renderer.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if !len.is_finite() || len <= f64::EPSILON {
            return Self::UP;
        }
        self * (1.0 / len)
    }

    /// Horizontal distance from the vertical axis.
    pub fn radial_xz(self) -> f64 {
        self.x.hypot(self.z)
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::Vec3;

    #[test]
    fn normalized_has_unit_length() {
        let v = Vec3::new(3.0, 4.0, 12.0).normalized();
        assert!((v.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalized_zero_vector_falls_back_to_up() {
        assert_eq!(Vec3::default().normalized(), Vec3::UP);
        assert_eq!(Vec3::new(f64::NAN, 0.0, 0.0).normalized(), Vec3::UP);
    }

    #[test]
    fn radial_xz_ignores_height() {
        assert!((Vec3::new(3.0, 100.0, 4.0).radial_xz() - 5.0).abs() < 1e-12);
    }
}
