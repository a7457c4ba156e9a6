//! Planted object record consumed by the garden renderer.
//!
//! # Invariants
//! - `normal` is a unit vector.
//! - `size.width` and `size.height` are positive.
//! - `created_order` strictly increases across one placement engine.

use crate::model::geometry::Vec3;
use crate::model::sketch::{Sketch, SketchId};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// Stable identifier for one planted object.
pub type PlacedObjectId = Uuid;

/// On-screen footprint of a planted sketch, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlantSize {
    pub width: f64,
    pub height: f64,
}

/// One sketch planted into the garden.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedObject {
    pub id: PlacedObjectId,
    /// Serialized as a reference (id + natural size); bytes stay in core.
    #[serde(serialize_with = "serialize_sketch_ref")]
    pub sketch: Sketch,
    pub position: Vec3,
    pub normal: Vec3,
    pub size: PlantSize,
    /// Rotation about `normal`, whole degrees in `[-10, 10]`.
    pub rotation_deg: f64,
    pub scale: f64,
    pub created_order: u64,
}

impl PlacedObject {
    pub fn sketch_id(&self) -> SketchId {
        self.sketch.id()
    }
}

fn serialize_sketch_ref<S: Serializer>(sketch: &Sketch, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("SketchRef", 4)?;
    state.serialize_field("id", &sketch.id())?;
    state.serialize_field("media_type", sketch.media_type())?;
    state.serialize_field("width", &sketch.width())?;
    state.serialize_field("height", &sketch.height())?;
    state.end()
}
