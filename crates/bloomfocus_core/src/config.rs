//! Garden configuration surface.
//!
//! # Responsibility
//! - Define recognized options and their defaults.
//! - Load options from JSON text or files.
//! - Validate everything up front, before any timer or gallery exists.
//!
//! # Invariants
//! - A `GardenConfig` returned by `from_json_str`/`from_path` is valid.
//! - Unknown keys are rejected rather than ignored.

use crate::gallery::{BoundedGallery, EvictionPolicy, GalleryError};
use crate::timer::{TimerDurations, TimerError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub use crate::placement::sampler::{SphereParams, SpiralParams};

pub const DEFAULT_FOCUS_DURATION_MS: u64 = 60_000;
pub const DEFAULT_BREAK_DURATION_MS: u64 = 12_000;
pub const DEFAULT_SKETCH_GALLERY_CAPACITY: usize = 12;
pub const DEFAULT_PLACED_GALLERY_CAPACITY: usize = 40;
pub const DEFAULT_PALETTE_SIZE: usize = 6;

/// Surface layout used for successive plantings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Golden-angle spiral on a flat bed.
    #[default]
    Spiral,
    /// Uniform random points on a sphere.
    Sphere,
}

/// Configuration load/validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Timer(TimerError),
    Gallery { field: &'static str, source: GalleryError },
    InvalidParameter { field: &'static str, value: f64 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Timer(err) => write!(f, "{err}"),
            Self::Gallery { field, source } => write!(f, "{field}: {source}"),
            Self::InvalidParameter { field, value } => {
                write!(f, "{field} is out of range: {value}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Timer(err) => Some(err),
            Self::Gallery { source, .. } => Some(source),
            Self::InvalidParameter { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<TimerError> for ConfigError {
    fn from(value: TimerError) -> Self {
        Self::Timer(value)
    }
}

/// Recognized options for one garden session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GardenConfig {
    pub focus_duration_ms: u64,
    pub break_duration_ms: u64,
    pub sketch_gallery_capacity: usize,
    pub placed_gallery_capacity: usize,
    pub placement_strategy: PlacementStrategy,
    /// How many recent sketches the palette shows.
    pub palette_size: usize,
    pub spiral: SpiralParams,
    pub sphere: SphereParams,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            focus_duration_ms: DEFAULT_FOCUS_DURATION_MS,
            break_duration_ms: DEFAULT_BREAK_DURATION_MS,
            sketch_gallery_capacity: DEFAULT_SKETCH_GALLERY_CAPACITY,
            placed_gallery_capacity: DEFAULT_PLACED_GALLERY_CAPACITY,
            placement_strategy: PlacementStrategy::default(),
            palette_size: DEFAULT_PALETTE_SIZE,
            spiral: SpiralParams::default(),
            sphere: SphereParams::default(),
        }
    }
}

impl GardenConfig {
    /// Parses and validates a JSON document. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks every option without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timer_durations()?;
        check_capacity("sketchGalleryCapacity", self.sketch_gallery_capacity)?;
        check_capacity("placedGalleryCapacity", self.placed_gallery_capacity)?;

        check_range("spiral.baseRadius", self.spiral.base_radius, false)?;
        check_range("spiral.radiusStep", self.spiral.radius_step, true)?;
        check_range("spiral.maxRadiusGrowth", self.spiral.max_radius_growth, false)?;
        if !self.spiral.plane_y.is_finite() {
            return Err(ConfigError::InvalidParameter {
                field: "spiral.planeY",
                value: self.spiral.plane_y,
            });
        }
        check_range("sphere.surfaceRadius", self.sphere.surface_radius, true)?;
        check_range("sphere.offset", self.sphere.offset, false)?;
        Ok(())
    }

    pub fn timer_durations(&self) -> Result<TimerDurations, TimerError> {
        TimerDurations::new(self.focus_duration_ms, self.break_duration_ms)
    }

    /// Most-recent-first gallery for saved sketches.
    pub fn sketch_gallery<T>(&self) -> Result<BoundedGallery<T>, ConfigError> {
        BoundedGallery::new(self.sketch_gallery_capacity, EvictionPolicy::MostRecentFirst).map_err(
            |source| ConfigError::Gallery {
                field: "sketchGalleryCapacity",
                source,
            },
        )
    }

    /// Oldest-evicted gallery for planted objects.
    pub fn placed_gallery<T>(&self) -> Result<BoundedGallery<T>, ConfigError> {
        BoundedGallery::new(self.placed_gallery_capacity, EvictionPolicy::OldestEvicted).map_err(
            |source| ConfigError::Gallery {
                field: "placedGalleryCapacity",
                source,
            },
        )
    }
}

fn check_capacity(field: &'static str, capacity: usize) -> Result<(), ConfigError> {
    if capacity == 0 {
        return Err(ConfigError::Gallery {
            field,
            source: GalleryError::InvalidCapacity(capacity),
        });
    }
    Ok(())
}

fn check_range(field: &'static str, value: f64, strictly_positive: bool) -> Result<(), ConfigError> {
    let in_range = value.is_finite() && if strictly_positive { value > 0.0 } else { value >= 0.0 };
    if in_range {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, GardenConfig, PlacementStrategy};
    use crate::gallery::GalleryError;

    #[test]
    fn defaults_match_documented_values() {
        let config = GardenConfig::default();
        assert_eq!(config.focus_duration_ms, 60_000);
        assert_eq!(config.break_duration_ms, 12_000);
        assert_eq!(config.sketch_gallery_capacity, 12);
        assert_eq!(config.placed_gallery_capacity, 40);
        assert_eq!(config.placement_strategy, PlacementStrategy::Spiral);
        assert_eq!(config.palette_size, 6);
        config.validate().expect("defaults must validate");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = GardenConfig::from_json_str(
            r#"{ "focusDurationMs": 1500000, "placementStrategy": "sphere" }"#,
        )
        .expect("partial config should parse");
        assert_eq!(config.focus_duration_ms, 1_500_000);
        assert_eq!(config.break_duration_ms, 12_000);
        assert_eq!(config.placement_strategy, PlacementStrategy::Sphere);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = GardenConfig::from_json_str(r#"{ "focusMinutes": 25 }"#)
            .expect_err("unknown key must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_zero_capacity_eagerly() {
        let err = GardenConfig::from_json_str(r#"{ "placedGalleryCapacity": 0 }"#)
            .expect_err("zero capacity must fail");
        assert!(matches!(
            err,
            ConfigError::Gallery {
                field: "placedGalleryCapacity",
                source: GalleryError::InvalidCapacity(0),
            }
        ));
    }

    #[test]
    fn rejects_zero_break_duration() {
        let err = GardenConfig::from_json_str(r#"{ "breakDurationMs": 0 }"#)
            .expect_err("zero break must fail");
        assert!(matches!(err, ConfigError::Timer(_)));
    }

    #[test]
    fn rejects_non_positive_sphere_radius() {
        let mut config = GardenConfig::default();
        config.sphere.surface_radius = 0.0;
        let err = config.validate().expect_err("zero radius must fail");
        assert!(err.to_string().contains("sphere.surfaceRadius"));
    }
}
