//! Garden domain model.
//!
//! # Responsibility
//! - Define the artifacts exchanged with the drawing surface and renderer.
//! - Keep geometry and sizing types free of placement policy.
//!
//! # Invariants
//! - Every sketch and placed object carries a stable v4 identifier.
//! - Artifacts are immutable after construction; eviction is the only way
//!   they leave the core.

pub mod geometry;
pub mod placed;
pub mod sketch;
