//! Session timer state machine.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MS_PER_MINUTE: f64 = 60_000.0;

/// Active timer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Focus,
    Break,
}

impl TimerMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Break => "break",
        }
    }

    /// Short label shown next to the countdown.
    pub fn label(self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::Break => "Break",
        }
    }
}

/// One-shot signal emitted by `SessionTimer::tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A Focus period ended. `cycle` is 1-based since the last `start`.
    FocusCompleted { cycle: u64 },
}

/// Timer validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerError {
    InvalidDuration { field: &'static str, value: f64 },
    /// `now_ms` leaves no room for one full focus/break cycle before `u64::MAX`.
    ClockOutOfRange { now_ms: u64, cycle_ms: u64 },
}

impl Display for TimerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDuration { field, value } => {
                write!(f, "{field} must be a positive finite duration, got {value}")
            }
            Self::ClockOutOfRange { now_ms, cycle_ms } => write!(
                f,
                "timestamp {now_ms} cannot fit a {cycle_ms} ms cycle in the u64 millisecond range"
            ),
        }
    }
}

impl Error for TimerError {}

/// Validated pair of period lengths in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerDurations {
    focus_ms: u64,
    break_ms: u64,
}

impl TimerDurations {
    /// # Errors
    /// - `InvalidDuration` when either value is zero.
    pub fn new(focus_ms: u64, break_ms: u64) -> Result<Self, TimerError> {
        if focus_ms == 0 {
            return Err(TimerError::InvalidDuration {
                field: "focus_duration_ms",
                value: 0.0,
            });
        }
        if break_ms == 0 {
            return Err(TimerError::InvalidDuration {
                field: "break_duration_ms",
                value: 0.0,
            });
        }
        Ok(Self { focus_ms, break_ms })
    }

    /// Converts fractional minutes (e.g. `0.2` for a 12 s break).
    ///
    /// # Errors
    /// - `InvalidDuration` for non-finite, non-positive, or sub-millisecond values.
    pub fn from_minutes(focus_minutes: f64, break_minutes: f64) -> Result<Self, TimerError> {
        let focus_ms = minutes_to_ms("focus_minutes", focus_minutes)?;
        let break_ms = minutes_to_ms("break_minutes", break_minutes)?;
        Self::new(focus_ms, break_ms)
    }

    pub fn focus_ms(self) -> u64 {
        self.focus_ms
    }

    pub fn break_ms(self) -> u64 {
        self.break_ms
    }

    pub fn for_mode(self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Focus => self.focus_ms,
            TimerMode::Break => self.break_ms,
        }
    }
}

fn minutes_to_ms(field: &'static str, minutes: f64) -> Result<u64, TimerError> {
    let invalid = TimerError::InvalidDuration {
        field,
        value: minutes,
    };
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(invalid);
    }
    let ms = (minutes * MS_PER_MINUTE).round();
    if ms < 1.0 || ms > u64::MAX as f64 {
        return Err(invalid);
    }
    Ok(ms as u64)
}

fn check_cycle_fits(durations: TimerDurations, now_ms: u64) -> Result<(), TimerError> {
    let cycle_ms = durations.focus_ms().saturating_add(durations.break_ms());
    match now_ms.checked_add(cycle_ms) {
        Some(_) => Ok(()),
        None => Err(TimerError::ClockOutOfRange { now_ms, cycle_ms }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Countdown {
    Running { deadline_ms: u64 },
    Paused { remaining_ms: u64 },
}

/// Focus/break state machine driven by explicit timestamps.
///
/// Time is any monotonic millisecond origin chosen by the host. The timer
/// never reads a clock itself, so tests can pass synthetic values.
///
/// `start`/`reset` require `now + focus + break` to fit in `u64`. If a later
/// transition would overflow, the timer pauses in the new mode instead of
/// arming a deadline that is already due.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    durations: TimerDurations,
    mode: TimerMode,
    countdown: Countdown,
    last_now_ms: u64,
    completed_cycles: u64,
}

impl SessionTimer {
    /// Creates a timer paused at the beginning of a Focus period.
    pub fn new(focus_ms: u64, break_ms: u64) -> Result<Self, TimerError> {
        Ok(Self::with_durations(TimerDurations::new(focus_ms, break_ms)?))
    }

    pub fn with_durations(durations: TimerDurations) -> Self {
        Self {
            durations,
            mode: TimerMode::Focus,
            countdown: Countdown::Paused {
                remaining_ms: durations.focus_ms(),
            },
            last_now_ms: 0,
            completed_cycles: 0,
        }
    }

    /// (Re)starts a running Focus period at `now_ms`.
    ///
    /// # Errors
    /// - `InvalidDuration` / `ClockOutOfRange` leave the current state untouched.
    pub fn start(&mut self, focus_ms: u64, break_ms: u64, now_ms: u64) -> Result<(), TimerError> {
        let durations = TimerDurations::new(focus_ms, break_ms)?;
        check_cycle_fits(durations, now_ms)?;
        self.durations = durations;
        self.mode = TimerMode::Focus;
        self.last_now_ms = now_ms;
        self.completed_cycles = 0;
        self.countdown = Countdown::Running {
            deadline_ms: now_ms + focus_ms,
        };
        info!(
            "event=timer_start module=timer status=ok focus_ms={} break_ms={}",
            focus_ms, break_ms
        );
        Ok(())
    }

    /// Advances the state machine to `now_ms`.
    ///
    /// At most one transition happens per call, so a long suspension yields
    /// at most one `FocusCompleted`.
    pub fn tick(&mut self, now_ms: u64) -> Option<TimerEvent> {
        let now_ms = self.observe(now_ms);
        let Countdown::Running { deadline_ms } = self.countdown else {
            return None;
        };
        if now_ms < deadline_ms {
            return None;
        }

        let (next_mode, event) = match self.mode {
            TimerMode::Focus => {
                self.completed_cycles += 1;
                (
                    TimerMode::Break,
                    Some(TimerEvent::FocusCompleted {
                        cycle: self.completed_cycles,
                    }),
                )
            }
            TimerMode::Break => (TimerMode::Focus, None),
        };
        info!(
            "event=timer_transition module=timer status=ok from={} to={} overdue_ms={}",
            self.mode.as_str(),
            next_mode.as_str(),
            now_ms - deadline_ms
        );
        self.mode = next_mode;
        let period_ms = self.durations.for_mode(next_mode);
        self.countdown = match now_ms.checked_add(period_ms) {
            Some(deadline_ms) => Countdown::Running { deadline_ms },
            None => {
                warn!(
                    "event=timer_clock_exhausted module=timer status=paused mode={} now_ms={}",
                    next_mode.as_str(),
                    now_ms
                );
                Countdown::Paused {
                    remaining_ms: period_ms,
                }
            }
        };
        event
    }

    /// Freezes the countdown. No-op when already paused.
    pub fn pause(&mut self, now_ms: u64) {
        let now_ms = self.observe(now_ms);
        if let Countdown::Running { deadline_ms } = self.countdown {
            let remaining_ms = deadline_ms.saturating_sub(now_ms);
            self.countdown = Countdown::Paused { remaining_ms };
            info!(
                "event=timer_pause module=timer status=ok mode={} remaining_ms={}",
                self.mode.as_str(),
                remaining_ms
            );
        }
    }

    /// Unfreezes the countdown with `deadline = now + remaining`.
    ///
    /// Stays paused when that deadline would overflow `u64`.
    pub fn resume(&mut self, now_ms: u64) {
        let now_ms = self.observe(now_ms);
        if let Countdown::Paused { remaining_ms } = self.countdown {
            let Some(deadline_ms) = now_ms.checked_add(remaining_ms) else {
                warn!(
                    "event=timer_resume module=timer status=skipped reason=clock_exhausted now_ms={}",
                    now_ms
                );
                return;
            };
            self.countdown = Countdown::Running { deadline_ms };
            info!(
                "event=timer_resume module=timer status=ok mode={} remaining_ms={}",
                self.mode.as_str(),
                remaining_ms
            );
        }
    }

    /// Forces Focus with a full period; never emits a completion.
    ///
    /// Running/paused state is preserved.
    ///
    /// # Errors
    /// - `InvalidDuration` / `ClockOutOfRange` leave the current state untouched.
    pub fn reset(&mut self, focus_ms: u64, break_ms: u64, now_ms: u64) -> Result<(), TimerError> {
        let durations = TimerDurations::new(focus_ms, break_ms)?;
        check_cycle_fits(durations, now_ms.max(self.last_now_ms))?;
        let now_ms = self.observe(now_ms);
        self.durations = durations;
        self.mode = TimerMode::Focus;
        self.countdown = match self.countdown {
            Countdown::Running { .. } => Countdown::Running {
                deadline_ms: now_ms + focus_ms,
            },
            Countdown::Paused { .. } => Countdown::Paused {
                remaining_ms: focus_ms,
            },
        };
        info!(
            "event=timer_reset module=timer status=ok focus_ms={} break_ms={} running={}",
            focus_ms,
            break_ms,
            self.is_running()
        );
        Ok(())
    }

    /// Returns `max(0, deadline - now)`; does not mutate state.
    pub fn remaining(&self, now_ms: u64) -> u64 {
        match self.countdown {
            Countdown::Running { deadline_ms } => {
                deadline_ms.saturating_sub(now_ms.max(self.last_now_ms))
            }
            Countdown::Paused { remaining_ms } => remaining_ms,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        matches!(self.countdown, Countdown::Running { .. })
    }

    pub fn durations(&self) -> TimerDurations {
        self.durations
    }

    /// Absolute deadline while running.
    pub fn deadline(&self) -> Option<u64> {
        match self.countdown {
            Countdown::Running { deadline_ms } => Some(deadline_ms),
            Countdown::Paused { .. } => None,
        }
    }

    /// Focus periods completed since the last `start`.
    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    pub(crate) fn period_ms(&self) -> u64 {
        self.durations.for_mode(self.mode)
    }

    fn observe(&mut self, now_ms: u64) -> u64 {
        if now_ms < self.last_now_ms {
            debug!(
                "event=timer_clock_regression module=timer status=skipped behind_ms={}",
                self.last_now_ms - now_ms
            );
            return self.last_now_ms;
        }
        self.last_now_ms = now_ms;
        now_ms
    }
}
