//! Focus/break session timer.
//!
//! # Responsibility
//! - Alternate Focus and Break periods against caller-supplied timestamps.
//! - Report exactly one `FocusCompleted` per finished Focus period.
//! - Provide display projections (`MM:SS`, progress) without mutating state.
//!
//! # Invariants
//! - Exactly one of Focus/Break is active at any instant.
//! - Durations are validated eagerly; `tick` never fails.
//! - Clock regression is treated as zero elapsed time.

mod display;
mod session;

pub use display::{format_clock, TimerDisplay};
pub use session::{SessionTimer, TimerDurations, TimerError, TimerEvent, TimerMode};
