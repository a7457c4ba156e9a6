//! Spatial placement of planted sketches.
//!
//! # Responsibility
//! - Map a placement index to a position and outward normal on a surface.
//! - Combine surface samples with aspect-derived sizing into `PlacedObject`s.
//!
//! # Invariants
//! - Samplers are interchangeable behind `SurfaceSampler`.
//! - The engine's placement index only ever increases.
//! - All randomness flows through `UnitSource`; nothing is seeded by default.

pub mod engine;
pub mod sampler;
pub mod source;
