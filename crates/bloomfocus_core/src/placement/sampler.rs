//! Surface samplers: golden-angle spiral on a flat bed, uniform on a sphere.

use crate::model::geometry::Vec3;
use crate::placement::source::{draw_unit, ThreadRandom, UnitSource};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Golden angle in degrees.
pub const GOLDEN_ANGLE_DEG: f64 = 137.508;

/// Position plus outward unit normal for one object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceSample {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Maps a placement index to a point on a reference surface.
///
/// Implementations do no collision checking.
pub trait SurfaceSampler: Send {
    fn sample(&mut self, index: u64) -> SurfaceSample;

    /// Stable strategy name for logs.
    fn name(&self) -> &'static str;
}

/// Flat-bed spiral parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SpiralParams {
    /// `r0`: radius of the first ring.
    pub base_radius: f64,
    /// `rStep`: growth factor applied to `sqrt(k + 1)`.
    pub radius_step: f64,
    /// `rmax`: cap on the growth term.
    pub max_radius_growth: f64,
    /// Height of the bed.
    pub plane_y: f64,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            base_radius: 0.6,
            radius_step: 0.55,
            max_radius_growth: 6.0,
            plane_y: 0.0,
        }
    }
}

/// Sphere surface parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SphereParams {
    pub surface_radius: f64,
    /// Lift above the surface so objects do not clip into it.
    pub offset: f64,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            surface_radius: 3.0,
            offset: 0.05,
        }
    }
}

/// Golden-angle spiral on the plane `y = plane_y`, normals pointing up.
///
/// Fully deterministic in `index`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralSampler {
    params: SpiralParams,
}

impl SpiralSampler {
    pub fn new(params: SpiralParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> SpiralParams {
        self.params
    }

    /// `r(k) = r0 + min(rmax, sqrt(k + 1) * rStep)`.
    pub fn radius(&self, index: u64) -> f64 {
        let growth = ((index as f64) + 1.0).sqrt() * self.params.radius_step;
        self.params.base_radius + growth.min(self.params.max_radius_growth)
    }

    /// `θ(k) = k * 137.508°`, reduced into `[0, 360)`.
    pub fn angle_degrees(index: u64) -> f64 {
        (index as f64 * GOLDEN_ANGLE_DEG).rem_euclid(360.0)
    }
}

impl SurfaceSampler for SpiralSampler {
    fn sample(&mut self, index: u64) -> SurfaceSample {
        let r = self.radius(index);
        let theta = Self::angle_degrees(index).to_radians();
        SurfaceSample {
            position: Vec3::new(r * theta.cos(), self.params.plane_y, r * theta.sin()),
            normal: Vec3::UP,
        }
    }

    fn name(&self) -> &'static str {
        "spiral"
    }
}

/// Uniform random points on a sphere, normals pointing outward.
///
/// `φ = acos(2v − 1)` is the inverse-CDF step; sampling `φ` uniformly would
/// cluster points at the poles.
pub struct SphereSampler {
    params: SphereParams,
    source: Box<dyn UnitSource>,
}

impl SphereSampler {
    pub fn new(params: SphereParams) -> Self {
        Self::with_source(params, Box::new(ThreadRandom))
    }

    pub fn with_source(params: SphereParams, source: Box<dyn UnitSource>) -> Self {
        Self { params, source }
    }

    pub fn params(&self) -> SphereParams {
        self.params
    }

    /// Direction for one `(u, v)` pair in `[0, 1)²`.
    pub fn direction(u: f64, v: f64) -> Vec3 {
        let theta = TAU * u;
        let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
        Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos()).normalized()
    }
}

impl SurfaceSampler for SphereSampler {
    fn sample(&mut self, _index: u64) -> SurfaceSample {
        let u = draw_unit(self.source.as_mut());
        let v = draw_unit(self.source.as_mut());
        let direction = Self::direction(u, v);
        SurfaceSample {
            position: direction * (self.params.surface_radius + self.params.offset),
            normal: direction,
        }
    }

    fn name(&self) -> &'static str {
        "sphere"
    }
}

#[cfg(test)]
mod tests {
    use super::{SphereParams, SphereSampler, SpiralParams, SpiralSampler, SurfaceSampler};
    use crate::model::geometry::Vec3;

    #[test]
    fn spiral_radius_is_capped() {
        let sampler = SpiralSampler::new(SpiralParams {
            base_radius: 1.0,
            radius_step: 1.0,
            max_radius_growth: 3.0,
            plane_y: 0.0,
        });
        assert!((sampler.radius(0) - 2.0).abs() < 1e-12);
        assert!((sampler.radius(3) - 3.0).abs() < 1e-12);
        assert!((sampler.radius(100) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn spiral_sample_lies_on_plane_with_up_normal() {
        let mut sampler = SpiralSampler::new(SpiralParams {
            plane_y: -0.25,
            ..SpiralParams::default()
        });
        let sample = sampler.sample(7);
        assert_eq!(sample.position.y, -0.25);
        assert_eq!(sample.normal, Vec3::UP);
        assert!((sample.position.radial_xz() - sampler.radius(7)).abs() < 1e-9);
    }

    #[test]
    fn sphere_direction_hits_poles_and_equator() {
        let north = SphereSampler::direction(0.0, 1.0 - f64::EPSILON);
        assert!((north.z - 1.0).abs() < 1e-6);
        let south = SphereSampler::direction(0.0, 0.0);
        assert!((south.z + 1.0).abs() < 1e-12);
        let equator = SphereSampler::direction(0.25, 0.5);
        assert!(equator.z.abs() < 1e-12);
        assert!((equator.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sphere_position_is_offset_from_surface() {
        let mut draws = [0.3, 0.7].into_iter().cycle();
        let mut sampler = SphereSampler::with_source(
            SphereParams {
                surface_radius: 2.0,
                offset: 0.5,
            },
            Box::new(move || draws.next().unwrap_or(0.0)),
        );
        let sample = sampler.sample(0);
        assert!((sample.position.length() - 2.5).abs() < 1e-9);
        assert!((sample.normal.length() - 1.0).abs() < 1e-12);
        assert_eq!(sample.normal, SphereSampler::direction(0.3, 0.7));
    }
}
