//! Input handling for the bio panel.
//!
//! Translates raw pointer and resize events into the two decisions the panel
//! cares about:
//!
//! 1. **Drag release** - did the user flick the panel away or let go early?
//! 2. **Settled resize** - which width should the layout resolver act on?
//!
//! # Architecture
//!
//! ```text
//! pointer down/move/up ──► DragTracker ──► DragRelease ──► DismissThresholds ──► DragOutcome
//! resize(width, t)     ──► Debouncer   ──► poll(t)     ──► settled value
//! ```
//!
//! Timestamps are host-supplied milliseconds; nothing here reads a clock.
//!
//! # Example
//!
//! ```ignore
//! use bio_input::{DragAxis, DragConfig, DragTracker, Vec2};
//!
//! let mut tracker = DragTracker::new(DragConfig::for_axis(DragAxis::X))?;
//! tracker.pointer_down(Vec2::new(10.0, 300.0), 0);
//! tracker.pointer_move(Vec2::new(90.0, 302.0), 40);
//! if let Some(release) = tracker.pointer_up(Vec2::new(140.0, 305.0), 80) {
//!     match config.thresholds.evaluate(&release) { .. }
//! }
//! ```

mod config;
mod debounce;
mod drag;
mod error;

pub use config::{DismissThresholds, DragConfig};
pub use debounce::Debouncer;
pub use drag::{DragAxis, DragOutcome, DragRelease, DragTracker};
pub use error::InputError;

use serde::{Deserialize, Serialize};

/// Default dismiss distance (pixels).
pub const DEFAULT_DISMISS_DISTANCE: f32 = 100.0;

/// Default dismiss release velocity (pixels per second).
pub const DEFAULT_DISMISS_VELOCITY: f32 = 400.0;

/// Default resistance when dragging against the dismiss direction.
pub const DEFAULT_ELASTIC: f32 = 0.2;

/// Default window of samples used for release velocity (milliseconds).
pub const DEFAULT_VELOCITY_WINDOW_MS: u64 = 100;

/// Default resize idle window (milliseconds).
pub const DEFAULT_RESIZE_IDLE_MS: u64 = 100;

/// Pointer position in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn constants_are_reasonable() {
        assert!(DEFAULT_DISMISS_DISTANCE > 0.0);
        assert!(DEFAULT_DISMISS_VELOCITY > 0.0);
        assert!((0.0..=1.0).contains(&DEFAULT_ELASTIC));
        assert!(DEFAULT_VELOCITY_WINDOW_MS > 0);
        assert!(DEFAULT_RESIZE_IDLE_MS > 0);
    }
}
