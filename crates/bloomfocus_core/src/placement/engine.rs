//! Placement engine: surface sample + sizing → `PlacedObject`.

use crate::config::PlacementStrategy;
use crate::model::placed::{PlacedObject, PlantSize};
use crate::model::sketch::Sketch;
use crate::placement::sampler::{
    SphereParams, SphereSampler, SpiralParams, SpiralSampler, SurfaceSampler,
};
use crate::placement::source::{draw_unit, ThreadRandom, UnitSource};
use log::debug;
use uuid::Uuid;

const BASE_SIZE_MIN_PX: f64 = 48.0;
const BASE_SIZE_SPAN_PX: f64 = 48.0;
const WIDE_ASPECT_THRESHOLD: f64 = 1.2;
const WIDE_SIZE_FACTOR: f64 = 0.9;
const MAX_ROTATION_DEG: f64 = 10.0;
const SCALE_MIN: f64 = 0.9;
const SCALE_SPAN: f64 = 0.4;

/// Turns sketches into placed objects using one surface strategy.
///
/// The only state is the monotonically increasing placement index.
pub struct PlacementEngine {
    sampler: Box<dyn SurfaceSampler>,
    jitter: Box<dyn UnitSource>,
    next_index: u64,
}

impl PlacementEngine {
    pub fn new(sampler: Box<dyn SurfaceSampler>) -> Self {
        Self::with_jitter_source(sampler, Box::new(ThreadRandom))
    }

    /// Uses `jitter` for size, rotation and scale draws.
    pub fn with_jitter_source(
        sampler: Box<dyn SurfaceSampler>,
        jitter: Box<dyn UnitSource>,
    ) -> Self {
        Self {
            sampler,
            jitter,
            next_index: 0,
        }
    }

    pub fn for_strategy(
        strategy: PlacementStrategy,
        spiral: SpiralParams,
        sphere: SphereParams,
    ) -> Self {
        let sampler: Box<dyn SurfaceSampler> = match strategy {
            PlacementStrategy::Spiral => Box::new(SpiralSampler::new(spiral)),
            PlacementStrategy::Sphere => Box::new(SphereSampler::new(sphere)),
        };
        Self::new(sampler)
    }

    /// Places `sketch` at the next index.
    ///
    /// Draw order from the jitter source: size, rotation, scale.
    pub fn plant(&mut self, sketch: &Sketch) -> PlacedObject {
        let index = self.next_index;
        self.next_index += 1;

        let sample = self.sampler.sample(index);
        let size = plant_size(sketch.aspect_ratio(), draw_unit(self.jitter.as_mut()));
        let rotation_deg =
            ((draw_unit(self.jitter.as_mut()) - 0.5) * 2.0 * MAX_ROTATION_DEG).round();
        let scale = SCALE_MIN + draw_unit(self.jitter.as_mut()) * SCALE_SPAN;

        debug!(
            "event=placement module=placement status=ok strategy={} index={} width={:.1} height={:.1}",
            self.sampler.name(),
            index,
            size.width,
            size.height
        );

        PlacedObject {
            id: Uuid::new_v4(),
            sketch: sketch.clone(),
            position: sample.position,
            normal: sample.normal,
            size,
            rotation_deg,
            scale,
            created_order: index,
        }
    }

    /// Number of placements made so far (the next index).
    pub fn placed_count(&self) -> u64 {
        self.next_index
    }

    pub fn strategy_name(&self) -> &'static str {
        self.sampler.name()
    }
}

/// Footprint for a sketch of `aspect = width / height` and one unit draw.
///
/// Base size is `round(48 + unit * 48)` px, shrunk by 10% for wide sketches.
/// Non-finite or non-positive aspects are treated as square.
pub fn plant_size(aspect: f64, unit: f64) -> PlantSize {
    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    };
    let mut base = (BASE_SIZE_MIN_PX + unit * BASE_SIZE_SPAN_PX).round();
    if aspect > WIDE_ASPECT_THRESHOLD {
        base *= WIDE_SIZE_FACTOR;
    }
    PlantSize {
        width: base,
        height: base / aspect,
    }
}
