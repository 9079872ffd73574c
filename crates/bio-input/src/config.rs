//! Drag and dismiss configuration.

use crate::drag::{DragAxis, DragOutcome, DragRelease};
use crate::error::InputError;
use crate::{
    DEFAULT_DISMISS_DISTANCE, DEFAULT_DISMISS_VELOCITY, DEFAULT_ELASTIC,
    DEFAULT_VELOCITY_WINDOW_MS,
};
use serde::{Deserialize, Serialize};

/// Flick-to-dismiss thresholds.
///
/// The two thresholds are independent: crossing either one dismisses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DismissThresholds {
    /// Displacement along the dismiss direction (pixels).
    pub distance: f32,
    /// Release velocity along the dismiss direction (pixels per second).
    pub velocity: f32,
}

impl Default for DismissThresholds {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISMISS_DISTANCE,
            velocity: DEFAULT_DISMISS_VELOCITY,
        }
    }
}

impl DismissThresholds {
    pub fn new(distance: f32, velocity: f32) -> Result<Self, InputError> {
        let thresholds = Self { distance, velocity };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if !(self.distance > 0.0) {
            return Err(InputError::InvalidDistance(self.distance));
        }
        if !(self.velocity > 0.0) {
            return Err(InputError::InvalidVelocity(self.velocity));
        }
        Ok(())
    }

    /// Decide what a released drag does.
    ///
    /// `displacement > distance || velocity > velocity` dismisses; anything
    /// else springs back to the resting position.
    pub fn evaluate(&self, release: &DragRelease) -> DragOutcome {
        if release.displacement > self.distance || release.velocity > self.velocity {
            DragOutcome::Dismiss
        } else {
            DragOutcome::SnapBack
        }
    }
}

/// Drag tracker configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    /// Axis the panel moves along; positive is the dismiss direction.
    pub axis: DragAxis,
    /// Fraction of pointer travel applied when pulling against the dismiss
    /// direction (0.0 = rigid, 1.0 = free).
    pub elastic: f32,
    /// Samples newer than this feed the release velocity.
    pub velocity_window_ms: u64,
}

impl DragConfig {
    pub fn for_axis(axis: DragAxis) -> Self {
        Self {
            axis,
            elastic: DEFAULT_ELASTIC,
            velocity_window_ms: DEFAULT_VELOCITY_WINDOW_MS,
        }
    }

    pub fn with_elastic(mut self, elastic: f32) -> Self {
        self.elastic = elastic;
        self
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if !(0.0..=1.0).contains(&self.elastic) {
            return Err(InputError::InvalidElastic(self.elastic));
        }
        if self.velocity_window_ms == 0 {
            return Err(InputError::EmptyVelocityWindow);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(displacement: f32, velocity: f32) -> DragRelease {
        DragRelease {
            displacement,
            velocity,
        }
    }

    #[test]
    fn distance_alone_dismisses() {
        let thresholds = DismissThresholds::new(100.0, 400.0).unwrap();
        assert_eq!(thresholds.evaluate(&release(120.0, 0.0)), DragOutcome::Dismiss);
    }

    #[test]
    fn velocity_alone_dismisses() {
        let thresholds = DismissThresholds::new(100.0, 400.0).unwrap();
        assert_eq!(thresholds.evaluate(&release(50.0, 500.0)), DragOutcome::Dismiss);
    }

    #[test]
    fn neither_springs_back() {
        let thresholds = DismissThresholds::new(100.0, 400.0).unwrap();
        assert_eq!(thresholds.evaluate(&release(50.0, 0.0)), DragOutcome::SnapBack);
    }

    #[test]
    fn thresholds_are_strict() {
        let thresholds = DismissThresholds::default();
        assert_eq!(
            thresholds.evaluate(&release(100.0, 400.0)),
            DragOutcome::SnapBack
        );
    }

    #[test]
    fn pulling_backwards_never_dismisses() {
        let thresholds = DismissThresholds::default();
        assert_eq!(
            thresholds.evaluate(&release(-300.0, -900.0)),
            DragOutcome::SnapBack
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert_eq!(
            DismissThresholds::new(0.0, 400.0),
            Err(InputError::InvalidDistance(0.0))
        );
        assert_eq!(
            DismissThresholds::new(100.0, -1.0),
            Err(InputError::InvalidVelocity(-1.0))
        );
        assert_eq!(
            DragConfig::for_axis(DragAxis::X).with_elastic(1.5).validate(),
            Err(InputError::InvalidElastic(1.5))
        );
    }
}
