//! Motion primitives for panel transitions
//!
//! Two kinds of motion drive the panel:
//! - Fixed-duration tweens with an easing curve (wide mode fade/offset)
//! - Spring physics (narrow mode slide and drawer, snap-back after a drag)
//!
//! Every transition is described by a [`TransitionSpec`] - motion parameters
//! plus the pose it starts from and the pose it settles on - and executed by a
//! [`PoseAnimation`]. Reduced motion collapses every transition to [`Motion::Instant`].
//!
//! Nothing here schedules callbacks. Owners call `tick(dt)` once per frame
//! and read the current pose back.

use serde::{Deserialize, Serialize};

// =============================================================================
// EASING FUNCTIONS
// =============================================================================

/// Cubic ease-out: fast start, slow finish
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Cubic ease-in-out: slow start, fast middle, slow finish
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Quadratic ease-out
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Easing curve selectable from settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFn {
    Linear,
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
    EaseOutQuad,
}

impl EasingFn {
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            EasingFn::Linear => linear(t),
            EasingFn::EaseOutCubic => ease_out_cubic(t),
            EasingFn::EaseInOutCubic => ease_in_out_cubic(t),
            EasingFn::EaseOutQuad => ease_out_quad(t),
        }
    }
}

// =============================================================================
// SPRING
// =============================================================================

/// Spring configuration parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Stiffness (higher = faster response). Typical: 200-500
    pub stiffness: f32,
    /// Damping ratio: 1.0 = critically damped (no overshoot)
    /// < 1.0 = underdamped (bouncy), > 1.0 = overdamped (sluggish)
    pub damping: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 1.0,
        }
    }
}

/// Animated f32 value with spring physics
///
/// # Usage
/// ```ignore
/// let mut x = SpringF32::new(390.0, SpringConfig::default());
/// x.set_target(0.0);
///
/// // Each frame:
/// x.tick(dt);
/// let current = x.get();
/// ```
#[derive(Debug, Clone)]
pub struct SpringF32 {
    current: f32,
    target: f32,
    velocity: f32,
    config: SpringConfig,
    /// Distance and speed below which the spring snaps to rest
    precision: f32,
}

impl SpringF32 {
    pub fn new(initial: f32, config: SpringConfig) -> Self {
        Self {
            current: initial,
            target: initial,
            velocity: 0.0,
            config,
            precision: 0.01,
        }
    }

    pub fn with_precision(mut self, precision: f32) -> Self {
        self.precision = precision;
        self
    }

    /// Set new target value (animation begins)
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Seed velocity, e.g. from a drag release
    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Jump immediately to value (no animation)
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Advance by `dt` seconds.
    ///
    /// F = -k*x - c*v, with k = stiffness and c = damping * 2 * sqrt(k).
    /// Large frames are integrated in sub-steps so a stalled tab does not
    /// blow the simulation up.
    pub fn tick(&mut self, dt: f32) {
        let mut remaining = dt.max(0.0);
        while remaining > 0.0 && self.is_animating() {
            let step = remaining.min(1.0 / 120.0);
            remaining -= step;

            let displacement = self.current - self.target;
            let spring_force = -self.config.stiffness * displacement;
            let damping_force =
                -self.config.damping * 2.0 * self.config.stiffness.sqrt() * self.velocity;
            let acceleration = spring_force + damping_force;

            self.velocity += acceleration * step;
            self.current += self.velocity * step;

            if (self.current - self.target).abs() < self.precision
                && self.velocity.abs() < self.precision
            {
                self.current = self.target;
                self.velocity = 0.0;
            }
        }
    }

    pub fn get(&self) -> f32 {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        (self.current - self.target).abs() > 0.0 || self.velocity.abs() > 0.0
    }
}

// =============================================================================
// TWEEN
// =============================================================================

/// Fixed-duration interpolation along an easing curve
#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    /// Seconds
    duration: f32,
    elapsed: f32,
    easing: EasingFn,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: EasingFn) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }

    pub fn get(&self) -> f32 {
        if self.is_complete() {
            return self.to;
        }
        lerp_f32(self.from, self.to, self.easing.apply(self.elapsed / self.duration))
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

// =============================================================================
// POSE
// =============================================================================

/// Animated properties of the panel: opacity plus translation in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
}

impl Pose {
    /// Fully visible, untranslated.
    pub const REST: Pose = Pose {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn new(opacity: f32, x: f32, y: f32) -> Self {
        Self { opacity, x, y }
    }
}

/// How a transition moves between poses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Motion {
    /// Jump straight to the target
    Instant,
    Tween { duration: f32, easing: EasingFn },
    Spring(SpringConfig),
}

/// Complete description of one transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub motion: Motion,
    pub from: Pose,
    pub to: Pose,
}

impl TransitionSpec {
    /// Fixed duration in seconds; `None` for springs, which settle when they settle.
    pub fn duration(&self) -> Option<f32> {
        match self.motion {
            Motion::Instant => Some(0.0),
            Motion::Tween { duration, .. } => Some(duration),
            Motion::Spring(_) => None,
        }
    }

    pub fn is_instant(&self) -> bool {
        matches!(self.motion, Motion::Instant)
    }

    /// Same motion and target, starting wherever the panel currently is.
    pub fn starting_at(mut self, pose: Pose) -> Self {
        self.from = pose;
        self
    }
}

#[derive(Debug, Clone)]
enum Track {
    Tween(Tween),
    Spring(SpringF32),
}

impl Track {
    fn new(from: f32, to: f32, motion: Motion, precision: f32) -> Self {
        match motion {
            Motion::Instant => Track::Tween(Tween::new(to, to, 0.0, EasingFn::Linear)),
            Motion::Tween { duration, easing } => Track::Tween(Tween::new(from, to, duration, easing)),
            Motion::Spring(config) => {
                let mut spring = SpringF32::new(from, config).with_precision(precision);
                spring.set_target(to);
                Track::Spring(spring)
            }
        }
    }

    fn tick(&mut self, dt: f32) {
        match self {
            Track::Tween(tween) => tween.tick(dt),
            Track::Spring(spring) => spring.tick(dt),
        }
    }

    fn get(&self) -> f32 {
        match self {
            Track::Tween(tween) => tween.get(),
            Track::Spring(spring) => spring.get(),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Track::Tween(tween) => tween.is_complete(),
            Track::Spring(spring) => !spring.is_animating(),
        }
    }
}

/// Runs a [`TransitionSpec`]: one track per animated property
#[derive(Debug, Clone)]
pub struct PoseAnimation {
    spec: TransitionSpec,
    opacity: Track,
    x: Track,
    y: Track,
}

impl PoseAnimation {
    pub fn new(spec: TransitionSpec) -> Self {
        Self {
            spec,
            opacity: Track::new(spec.from.opacity, spec.to.opacity, spec.motion, 0.001),
            x: Track::new(spec.from.x, spec.to.x, spec.motion, 0.01),
            y: Track::new(spec.from.y, spec.to.y, spec.motion, 0.01),
        }
    }

    /// Pose held still, nothing to animate.
    pub fn settled(pose: Pose) -> Self {
        Self::new(TransitionSpec {
            motion: Motion::Instant,
            from: pose,
            to: pose,
        })
    }

    /// Seed the translation springs with a release velocity (px/s).
    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        if let Track::Spring(spring) = &mut self.x {
            spring.set_velocity(vx);
        }
        if let Track::Spring(spring) = &mut self.y {
            spring.set_velocity(vy);
        }
        self
    }

    pub fn spec(&self) -> &TransitionSpec {
        &self.spec
    }

    pub fn tick(&mut self, dt: f32) {
        self.opacity.tick(dt);
        self.x.tick(dt);
        self.y.tick(dt);
    }

    pub fn pose(&self) -> Pose {
        Pose {
            opacity: self.opacity.get(),
            x: self.x.get(),
            y: self.y.get(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.opacity.is_complete() && self.x.is_complete() && self.y.is_complete()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        // Ease-out is ahead of linear at the midpoint
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_spring_converges_without_overshoot() {
        let mut spring = SpringF32::new(390.0, SpringConfig::default());
        spring.set_target(0.0);

        let mut min_value = f32::MAX;
        for _ in 0..120 {
            spring.tick(1.0 / 60.0);
            min_value = min_value.min(spring.get());
        }

        assert!(min_value >= -0.5, "critically damped spring overshot: {min_value}");
        assert_eq!(spring.get(), 0.0);
        assert!(!spring.is_animating());
    }

    #[test]
    fn test_spring_survives_long_frames() {
        let mut spring = SpringF32::new(0.0, SpringConfig::default());
        spring.set_target(500.0);
        spring.tick(5.0);
        assert!(spring.get().is_finite());
        assert!((spring.get() - 500.0).abs() < 0.5);
    }

    #[test]
    fn test_spring_immediate() {
        let mut spring = SpringF32::new(0.0, SpringConfig::default());
        spring.set_immediate(5.0);
        assert_eq!(spring.get(), 5.0);
        assert!(!spring.is_animating());
    }

    #[test]
    fn test_tween_reaches_target_at_duration() {
        let mut tween = Tween::new(-20.0, 0.0, 0.4, EasingFn::EaseOutCubic);
        tween.tick(0.2);
        assert!(!tween.is_complete());
        assert!(tween.get() > -20.0 && tween.get() < 0.0);
        tween.tick(0.2);
        assert!(tween.is_complete());
        assert_eq!(tween.get(), 0.0);
    }

    #[test]
    fn test_instant_spec_is_complete_before_any_tick() {
        let animation = PoseAnimation::new(TransitionSpec {
            motion: Motion::Instant,
            from: Pose::new(0.0, -20.0, 0.0),
            to: Pose::REST,
        });
        assert!(animation.is_complete());
        assert_eq!(animation.pose(), Pose::REST);
        assert_eq!(animation.spec().duration(), Some(0.0));
    }

    #[test]
    fn test_pose_tween_interpolates_all_properties() {
        let mut animation = PoseAnimation::new(TransitionSpec {
            motion: Motion::Tween {
                duration: 0.4,
                easing: EasingFn::Linear,
            },
            from: Pose::new(0.0, -20.0, 0.0),
            to: Pose::REST,
        });
        animation.tick(0.2);
        let pose = animation.pose();
        assert!((pose.opacity - 0.5).abs() < 1e-4);
        assert!((pose.x + 10.0).abs() < 1e-4);
        animation.tick(0.2);
        assert!(animation.is_complete());
    }

    #[test]
    fn test_spring_spec_has_no_fixed_duration() {
        let spec = TransitionSpec {
            motion: Motion::Spring(SpringConfig::default()),
            from: Pose::new(1.0, 390.0, 0.0),
            to: Pose::REST,
        };
        assert_eq!(spec.duration(), None);
        let mut animation = PoseAnimation::new(spec);
        assert!(!animation.is_complete());
        for _ in 0..180 {
            animation.tick(1.0 / 60.0);
        }
        assert!(animation.is_complete());
        assert_eq!(animation.pose(), Pose::REST);
    }
}
