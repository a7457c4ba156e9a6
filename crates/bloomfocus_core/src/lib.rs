//! Core domain logic for BloomFocus.
//! This crate is the single source of truth for timer, gallery and placement
//! invariants. Drawing and 3D rendering live outside of it.

pub mod config;
pub mod gallery;
pub mod logging;
pub mod model;
pub mod placement;
pub mod service;
pub mod timer;

pub use config::{
    ConfigError, GardenConfig, PlacementStrategy, SphereParams, SpiralParams,
    DEFAULT_BREAK_DURATION_MS, DEFAULT_FOCUS_DURATION_MS, DEFAULT_PALETTE_SIZE,
    DEFAULT_PLACED_GALLERY_CAPACITY, DEFAULT_SKETCH_GALLERY_CAPACITY,
};
pub use gallery::{BoundedGallery, EvictionPolicy, GalleryError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::geometry::Vec3;
pub use model::placed::{PlacedObject, PlacedObjectId, PlantSize};
pub use model::sketch::{Sketch, SketchError, SketchId};
pub use placement::engine::PlacementEngine;
pub use placement::sampler::{SphereSampler, SpiralSampler, SurfaceSample, SurfaceSampler};
pub use placement::source::{ThreadRandom, UnitSource};
pub use service::garden_service::{GardenError, GardenSession, GardenSnapshot, TickOutcome};
pub use service::shared::SharedGarden;
pub use timer::{
    format_clock, SessionTimer, TimerDisplay, TimerDurations, TimerError, TimerEvent, TimerMode,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
