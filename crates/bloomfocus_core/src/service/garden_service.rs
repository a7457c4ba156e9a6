//! Garden session orchestration.
//!
//! # Responsibility
//! - Own one timer, the sketch gallery, the planted gallery and the engine.
//! - Plant the most recent sketch whenever a Focus period completes.
//! - Expose read-only projections for the renderer and timer UI.
//!
//! # Invariants
//! - Planting with no saved sketch changes nothing.
//! - Every planted object goes through the oldest-evicted gallery.
//! - Configuration errors surface from `new`, never from `tick`.

use crate::config::{ConfigError, GardenConfig};
use crate::gallery::BoundedGallery;
use crate::model::placed::PlacedObject;
use crate::model::sketch::Sketch;
use crate::placement::engine::PlacementEngine;
use crate::timer::{SessionTimer, TimerDisplay, TimerError, TimerEvent};
use log::{debug, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Session-level errors.
#[derive(Debug)]
pub enum GardenError {
    Config(ConfigError),
    /// Planting was requested while the sketch gallery is empty.
    EmptySource,
}

impl Display for GardenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::EmptySource => write!(f, "no saved sketch available to plant"),
        }
    }
}

impl Error for GardenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::EmptySource => None,
        }
    }
}

impl From<ConfigError> for GardenError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TimerError> for GardenError {
    fn from(value: TimerError) -> Self {
        Self::Config(ConfigError::Timer(value))
    }
}

/// Result of one scheduler tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub event: Option<TimerEvent>,
    /// Object planted in response to `event`, if a sketch was available.
    pub planted: Option<PlacedObject>,
}

/// Renderer-facing export of the whole garden.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GardenSnapshot {
    pub timer: TimerDisplay,
    pub placed: Vec<PlacedObject>,
}

/// One user's focus/garden session.
pub struct GardenSession {
    config: GardenConfig,
    timer: SessionTimer,
    sketches: BoundedGallery<Sketch>,
    placed: BoundedGallery<PlacedObject>,
    engine: PlacementEngine,
}

impl GardenSession {
    /// Builds a session and starts the first Focus period at `now_ms`.
    ///
    /// # Errors
    /// - `Config` when any option is invalid.
    pub fn new(config: GardenConfig, now_ms: u64) -> Result<Self, GardenError> {
        let engine = PlacementEngine::for_strategy(
            config.placement_strategy,
            config.spiral,
            config.sphere,
        );
        Self::with_engine(config, engine, now_ms)
    }

    /// Same as `new` with a caller-built engine (custom sampler or jitter).
    pub fn with_engine(
        config: GardenConfig,
        engine: PlacementEngine,
        now_ms: u64,
    ) -> Result<Self, GardenError> {
        config.validate()?;
        let mut timer = SessionTimer::with_durations(config.timer_durations()?);
        timer.start(config.focus_duration_ms, config.break_duration_ms, now_ms)?;
        let sketches = config.sketch_gallery()?;
        let placed = config.placed_gallery()?;
        info!(
            "event=garden_init module=garden status=ok strategy={} sketch_capacity={} placed_capacity={}",
            engine.strategy_name(),
            sketches.capacity(),
            placed.capacity()
        );
        Ok(Self {
            config,
            timer,
            sketches,
            placed,
            engine,
        })
    }

    /// Studio save hook: records `sketch` as the most recent one.
    pub fn on_save(&mut self, sketch: Sketch) {
        info!(
            "event=sketch_saved module=garden status=ok sketch_id={} width={} height={}",
            sketch.id(),
            sketch.width(),
            sketch.height()
        );
        self.sketches.insert(sketch);
    }

    /// Advances the timer and plants on Focus completion.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        let event = self.timer.tick(now_ms);
        let planted = match event {
            Some(TimerEvent::FocusCompleted { cycle }) => match self.plant_most_recent() {
                Ok(object) => Some(object),
                Err(_) => {
                    debug!(
                        "event=plant module=garden status=skipped reason=empty_source cycle={}",
                        cycle
                    );
                    None
                }
            },
            None => None,
        };
        TickOutcome { event, planted }
    }

    /// Plants the head of the sketch gallery.
    ///
    /// # Errors
    /// - `EmptySource` when nothing is saved; no state changes.
    pub fn plant_most_recent(&mut self) -> Result<PlacedObject, GardenError> {
        let sketch = self
            .sketches
            .most_recent()
            .cloned()
            .ok_or(GardenError::EmptySource)?;
        Ok(self.plant_sketch(&sketch))
    }

    /// Plants any sketch directly (palette click).
    pub fn plant_sketch(&mut self, sketch: &Sketch) -> PlacedObject {
        let object = self.engine.plant(sketch);
        info!(
            "event=plant module=garden status=ok object_id={} sketch_id={} order={}",
            object.id,
            sketch.id(),
            object.created_order
        );
        self.placed.insert(object.clone());
        object
    }

    pub fn pause(&mut self, now_ms: u64) {
        self.timer.pause(now_ms);
    }

    pub fn resume(&mut self, now_ms: u64) {
        self.timer.resume(now_ms);
    }

    /// Restarts Focus with the configured durations.
    pub fn reset(&mut self, now_ms: u64) -> Result<(), GardenError> {
        self.timer.reset(
            self.config.focus_duration_ms,
            self.config.break_duration_ms,
            now_ms,
        )?;
        Ok(())
    }

    pub fn timer_display(&self, now_ms: u64) -> TimerDisplay {
        TimerDisplay::capture(&self.timer, now_ms)
    }

    /// Planted objects, oldest first.
    pub fn placed_objects(&self) -> Vec<PlacedObject> {
        self.placed.all()
    }

    /// Saved sketches, most recent first.
    pub fn sketches(&self) -> Vec<Sketch> {
        self.sketches.all()
    }

    /// First `paletteSize` saved sketches.
    pub fn recent_palette(&self) -> Vec<Sketch> {
        self.sketches.take_front(self.config.palette_size)
    }

    pub fn snapshot(&self, now_ms: u64) -> GardenSnapshot {
        GardenSnapshot {
            timer: self.timer_display(now_ms),
            placed: self.placed_objects(),
        }
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn config(&self) -> &GardenConfig {
        &self.config
    }

    pub fn sketch_count(&self) -> usize {
        self.sketches.len()
    }

    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }
}
