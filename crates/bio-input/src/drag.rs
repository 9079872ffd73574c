//! Pointer drag tracking for dismissable panels.

use crate::config::DragConfig;
use crate::error::InputError;
use crate::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Axis a panel can be dragged along. Positive travel is the dismiss direction
/// (right for `X`, down for `Y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragAxis {
    X,
    Y,
}

impl DragAxis {
    fn project(&self, delta: Vec2) -> f32 {
        match self {
            DragAxis::X => delta.x,
            DragAxis::Y => delta.y,
        }
    }
}

/// Measurements taken when the pointer lets go.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragRelease {
    /// Constrained offset along the axis (pixels).
    pub displacement: f32,
    /// Velocity along the axis at release (pixels per second).
    pub velocity: f32,
}

/// What a release commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragOutcome {
    Dismiss,
    SnapBack,
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    offset: f32,
    timestamp: u64,
}

#[derive(Debug, Clone, Copy)]
struct Capture {
    origin: Vec2,
}

/// Tracks one pointer from down to up.
///
/// Motion toward the dismiss direction is applied one-to-one; motion past the
/// resting position is scaled by the elastic factor so the panel resists
/// being pulled the wrong way.
#[derive(Debug, Clone)]
pub struct DragTracker {
    config: DragConfig,
    capture: Option<Capture>,
    samples: VecDeque<Sample>,
    offset: f32,
}

impl DragTracker {
    pub fn new(config: DragConfig) -> Result<Self, InputError> {
        config.validate()?;
        Ok(Self {
            config,
            capture: None,
            samples: VecDeque::new(),
            offset: 0.0,
        })
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn axis(&self) -> DragAxis {
        self.config.axis
    }

    pub fn is_dragging(&self) -> bool {
        self.capture.is_some()
    }

    /// Current constrained offset (0.0 when idle).
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Start capturing. A second down while already capturing restarts.
    pub fn pointer_down(&mut self, pos: Vec2, timestamp: u64) {
        self.capture = Some(Capture { origin: pos });
        self.samples.clear();
        self.offset = 0.0;
        self.push_sample(timestamp);
    }

    /// Accumulate motion. Returns the new constrained offset, or `None` if no
    /// drag is in progress.
    pub fn pointer_move(&mut self, pos: Vec2, timestamp: u64) -> Option<f32> {
        let capture = self.capture?;
        self.offset = self.constrain(self.config.axis.project(Vec2 {
            x: pos.x - capture.origin.x,
            y: pos.y - capture.origin.y,
        }));
        self.push_sample(timestamp);
        Some(self.offset)
    }

    /// Finish the drag and report displacement and release velocity.
    pub fn pointer_up(&mut self, pos: Vec2, timestamp: u64) -> Option<DragRelease> {
        self.pointer_move(pos, timestamp)?;
        let release = DragRelease {
            displacement: self.offset,
            velocity: self.release_velocity(timestamp),
        };
        self.reset();
        Some(release)
    }

    /// Abandon the drag without a release (pointer cancelled, panel unmounted).
    pub fn cancel(&mut self) {
        self.reset();
    }

    // =========================================================================
    // INTERNAL HELPERS
    // =========================================================================

    fn reset(&mut self) {
        self.capture = None;
        self.samples.clear();
        self.offset = 0.0;
    }

    fn constrain(&self, raw: f32) -> f32 {
        if raw >= 0.0 {
            raw
        } else {
            raw * self.config.elastic
        }
    }

    fn push_sample(&mut self, timestamp: u64) {
        // Out-of-order timestamps are clamped to the newest sample.
        let timestamp = self
            .samples
            .back()
            .map_or(timestamp, |last| timestamp.max(last.timestamp));
        self.samples.push_back(Sample {
            offset: self.offset,
            timestamp,
        });

        let horizon = timestamp.saturating_sub(self.config.velocity_window_ms);
        while self.samples.len() > 2 && self.samples.front().is_some_and(|s| s.timestamp < horizon) {
            self.samples.pop_front();
        }
    }

    fn release_velocity(&self, now: u64) -> f32 {
        let horizon = now.saturating_sub(self.config.velocity_window_ms);
        let mut recent = self.samples.iter().filter(|s| s.timestamp >= horizon);
        let (Some(first), Some(last)) = (recent.next(), self.samples.back()) else {
            return 0.0;
        };
        let elapsed_ms = last.timestamp.saturating_sub(first.timestamp);
        if elapsed_ms == 0 {
            return 0.0;
        }
        (last.offset - first.offset) / (elapsed_ms as f32 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(axis: DragAxis) -> DragTracker {
        DragTracker::new(DragConfig::for_axis(axis)).unwrap()
    }

    #[test]
    fn move_without_down_is_ignored() {
        let mut t = tracker(DragAxis::X);
        assert_eq!(t.pointer_move(Vec2::new(50.0, 0.0), 10), None);
        assert_eq!(t.pointer_up(Vec2::new(50.0, 0.0), 20), None);
        assert!(!t.is_dragging());
    }

    #[test]
    fn horizontal_drag_tracks_x_only() {
        let mut t = tracker(DragAxis::X);
        t.pointer_down(Vec2::new(0.0, 0.0), 0);
        assert_eq!(t.pointer_move(Vec2::new(40.0, 90.0), 16), Some(40.0));
    }

    #[test]
    fn vertical_drag_tracks_y_only() {
        let mut t = tracker(DragAxis::Y);
        t.pointer_down(Vec2::new(100.0, 500.0), 0);
        assert_eq!(t.pointer_move(Vec2::new(300.0, 560.0), 16), Some(60.0));
    }

    #[test]
    fn pulling_past_rest_is_elastic() {
        let mut t = DragTracker::new(DragConfig::for_axis(DragAxis::X).with_elastic(0.25)).unwrap();
        t.pointer_down(Vec2::new(200.0, 0.0), 0);
        let offset = t.pointer_move(Vec2::new(100.0, 0.0), 16).unwrap();
        assert!((offset + 25.0).abs() < 1e-4);
    }

    #[test]
    fn slow_long_drag_has_low_release_velocity() {
        let mut t = tracker(DragAxis::X);
        t.pointer_down(Vec2::new(0.0, 0.0), 0);
        for step in 1..=12 {
            t.pointer_move(Vec2::new(step as f32 * 10.0, 0.0), step * 100);
        }
        let release = t.pointer_up(Vec2::new(120.0, 0.0), 1500).unwrap();
        assert!((release.displacement - 120.0).abs() < 1e-4);
        assert!(release.velocity.abs() < 1e-4, "held still before release");
        assert!(!t.is_dragging());
    }

    #[test]
    fn quick_flick_has_high_release_velocity() {
        let mut t = tracker(DragAxis::X);
        t.pointer_down(Vec2::new(0.0, 0.0), 0);
        t.pointer_move(Vec2::new(20.0, 0.0), 20);
        t.pointer_move(Vec2::new(40.0, 0.0), 40);
        let release = t.pointer_up(Vec2::new(60.0, 0.0), 60).unwrap();
        assert!((release.displacement - 60.0).abs() < 1e-4);
        assert!((release.velocity - 1000.0).abs() < 1.0);
    }

    #[test]
    fn cancel_discards_capture() {
        let mut t = tracker(DragAxis::Y);
        t.pointer_down(Vec2::new(0.0, 0.0), 0);
        t.pointer_move(Vec2::new(0.0, 30.0), 10);
        t.cancel();
        assert!(!t.is_dragging());
        assert_eq!(t.offset(), 0.0);
    }

    #[test]
    fn out_of_order_timestamps_do_not_panic() {
        let mut t = tracker(DragAxis::X);
        t.pointer_down(Vec2::new(0.0, 0.0), 100);
        t.pointer_move(Vec2::new(10.0, 0.0), 50);
        let release = t.pointer_up(Vec2::new(20.0, 0.0), 40).unwrap();
        assert!(release.velocity.is_finite());
    }
}
