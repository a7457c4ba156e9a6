//! Read-only timer projection for UI display.

use super::session::{SessionTimer, TimerMode};
use serde::Serialize;

/// Snapshot of the countdown for one rendered frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerDisplay {
    pub mode: TimerMode,
    pub remaining_ms: u64,
    /// Fraction of the current period already elapsed, in `[0, 1]`.
    pub progress: f64,
    /// Zero-padded `MM:SS`.
    pub clock: String,
    pub running: bool,
}

impl TimerDisplay {
    pub fn capture(timer: &SessionTimer, now_ms: u64) -> Self {
        let remaining_ms = timer.remaining(now_ms);
        let total_ms = timer.period_ms().max(1);
        let progress = (1.0 - remaining_ms as f64 / total_ms as f64).clamp(0.0, 1.0);
        Self {
            mode: timer.mode(),
            remaining_ms,
            progress,
            clock: format_clock(remaining_ms),
            running: timer.is_running(),
        }
    }
}

/// Formats milliseconds as `MM:SS`, flooring to whole seconds.
///
/// Minutes are not wrapped, so 100 minutes render as `100:00`.
pub fn format_clock(ms: u64) -> String {
    let total_secs = ms / 1_000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
