//! Core use-case services.
//!
//! # Responsibility
//! - Wire timer completion to planting and studio saves to the gallery.
//! - Keep renderer/UI callers decoupled from gallery and sampler details.

pub mod garden_service;
pub mod shared;
