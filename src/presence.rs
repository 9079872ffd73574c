//! Presence sequencing: mount, animate and unmount content bodies
//!
//! At most one body is mounted. Replacing it is ordered: the outgoing body
//! runs its exit to completion and is unmounted before the successor mounts
//! and enters. A newer request while the exit is running replaces the queued
//! successor instead of stacking up.
//!
//! ```text
//!   (none) ──show──► Entering ──settles──► Present ──hide──► Exiting ──settles──► (none | successor)
//! ```

use crate::motion::{PoseAnimation, Pose, TransitionSpec};
use crate::policy::PresentationPolicy;
use bio_types::Identity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresencePhase {
    Entering,
    Present,
    Exiting,
}

/// The body currently in the tree.
#[derive(Debug, Clone)]
pub struct MountedBody {
    identity: Identity,
    phase: PresencePhase,
    animation: PoseAnimation,
}

impl MountedBody {
    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn phase(&self) -> PresencePhase {
        self.phase
    }

    pub fn pose(&self) -> Pose {
        self.animation.pose()
    }

    /// Transition currently driving the pose.
    pub fn transition(&self) -> &TransitionSpec {
        self.animation.spec()
    }

    pub fn is_settled(&self) -> bool {
        self.animation.is_complete()
    }
}

/// Mount/unmount changes produced by a call, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "identity", rename_all = "snake_case")]
pub enum PresenceEvent {
    Mounted(Identity),
    Unmounted(Identity),
}

#[derive(Debug, Clone, Default)]
pub struct Presence {
    mounted: Option<MountedBody>,
    queued: Option<Identity>,
}

impl Presence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mounted(&self) -> Option<&MountedBody> {
        self.mounted.as_ref()
    }

    pub fn mounted_identity(&self) -> Option<Identity> {
        self.mounted.as_ref().map(MountedBody::identity)
    }

    /// Successor waiting for the current exit to finish.
    pub fn queued(&self) -> Option<Identity> {
        self.queued
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_none()
    }

    /// Whether any animation still needs frames.
    pub fn is_animating(&self) -> bool {
        self.mounted.as_ref().is_some_and(|body| !body.is_settled())
    }

    /// Make `identity` the body that ends up on screen.
    pub fn show(&mut self, identity: Identity, policy: &PresentationPolicy) -> Vec<PresenceEvent> {
        let mut events = Vec::new();
        match self.mounted.as_mut() {
            None => {
                self.queued = None;
                self.mount(identity, policy, &mut events);
            }
            Some(body) if body.identity == identity => {
                self.queued = None;
                if body.phase == PresencePhase::Exiting {
                    // Turn around from wherever the exit had got to.
                    let spec = policy.entry().starting_at(body.pose());
                    body.animation = PoseAnimation::new(spec);
                    body.phase = PresencePhase::Entering;
                }
            }
            Some(body) => {
                self.queued = Some(identity);
                if body.phase != PresencePhase::Exiting {
                    let spec = policy.exit(body.pose());
                    body.animation = PoseAnimation::new(spec);
                    body.phase = PresencePhase::Exiting;
                }
            }
        }
        self.settle(policy, &mut events);
        events
    }

    /// Exit whatever is mounted and forget any queued successor.
    pub fn hide(&mut self, policy: &PresentationPolicy) -> Vec<PresenceEvent> {
        self.hide_with_velocity(policy, 0.0, 0.0)
    }

    /// Like [`Presence::hide`], seeding spring exits with a release velocity.
    pub fn hide_with_velocity(
        &mut self,
        policy: &PresentationPolicy,
        vx: f32,
        vy: f32,
    ) -> Vec<PresenceEvent> {
        let mut events = Vec::new();
        self.queued = None;
        if let Some(body) = self.mounted.as_mut() {
            if body.phase != PresencePhase::Exiting {
                let spec = policy.exit(body.pose());
                body.animation = PoseAnimation::new(spec).with_velocity(vx, vy);
                body.phase = PresencePhase::Exiting;
            }
        }
        self.settle(policy, &mut events);
        events
    }

    /// Hold the mounted body at `pose` (drag in progress).
    pub fn hold(&mut self, pose: Pose) {
        if let Some(body) = self.mounted.as_mut() {
            body.animation = PoseAnimation::settled(pose);
            body.phase = PresencePhase::Present;
        }
    }

    /// Run `spec` on a body that stays mounted (snap back after a drag).
    pub fn animate_in_place(&mut self, spec: TransitionSpec, vx: f32, vy: f32) {
        if let Some(body) = self.mounted.as_mut() {
            body.animation = PoseAnimation::new(spec).with_velocity(vx, vy);
            body.phase = PresencePhase::Present;
        }
    }

    /// Layout switched under a mounted body.
    ///
    /// A running exit is finished on the spot and any queued successor enters
    /// with the new policy; otherwise the body jumps to the new rest pose.
    pub fn relayout(&mut self, policy: &PresentationPolicy) -> Vec<PresenceEvent> {
        let mut events = Vec::new();
        let Some(body) = self.mounted.as_mut() else {
            return events;
        };
        match body.phase {
            PresencePhase::Exiting => {
                let identity = body.identity;
                self.mounted = None;
                events.push(PresenceEvent::Unmounted(identity));
                if let Some(next) = self.queued.take() {
                    self.mount(next, policy, &mut events);
                }
            }
            PresencePhase::Entering | PresencePhase::Present => {
                body.animation = PoseAnimation::settled(policy.rest_pose());
                body.phase = PresencePhase::Present;
            }
        }
        self.settle(policy, &mut events);
        events
    }

    /// Jump every running animation to its end.
    pub fn finish(&mut self, policy: &PresentationPolicy) -> Vec<PresenceEvent> {
        let mut events = Vec::new();
        if let Some(body) = self.mounted.as_mut() {
            body.animation = PoseAnimation::settled(body.animation.spec().to);
        }
        self.settle(policy, &mut events);
        events
    }

    /// Advance animations by `dt` seconds.
    pub fn tick(&mut self, dt: f32, policy: &PresentationPolicy) -> Vec<PresenceEvent> {
        let mut events = Vec::new();
        if let Some(body) = self.mounted.as_mut() {
            body.animation.tick(dt);
        }
        self.settle(policy, &mut events);
        events
    }

    // =========================================================================
    // INTERNAL HELPERS
    // =========================================================================

    fn mount(&mut self, identity: Identity, policy: &PresentationPolicy, events: &mut Vec<PresenceEvent>) {
        self.mounted = Some(MountedBody {
            identity,
            phase: PresencePhase::Entering,
            animation: PoseAnimation::new(policy.entry()),
        });
        events.push(PresenceEvent::Mounted(identity));
    }

    /// Apply phase changes for animations that have completed. Instant
    /// transitions can cascade (exit completes, successor mounts, its entry
    /// completes) within one call.
    fn settle(&mut self, policy: &PresentationPolicy, events: &mut Vec<PresenceEvent>) {
        while let Some(body) = self.mounted.as_mut() {
            if !body.animation.is_complete() {
                return;
            }
            match body.phase {
                PresencePhase::Present => return,
                PresencePhase::Entering => {
                    body.phase = PresencePhase::Present;
                    return;
                }
                PresencePhase::Exiting => {
                    let identity = body.identity;
                    self.mounted = None;
                    events.push(PresenceEvent::Unmounted(identity));
                    if let Some(next) = self.queued.take() {
                        self.mount(next, policy, events);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PanelSettings;
    use bio_types::{LayoutMode, NarrowStyle, Viewport};

    fn policy(mode: LayoutMode, reduced: bool) -> PresentationPolicy {
        let settings = PanelSettings::default().with_narrow_style(NarrowStyle::Slide);
        PresentationPolicy::new(&settings, mode, Viewport::new(390.0, 800.0), reduced)
    }

    fn run_until_idle(presence: &mut Presence, policy: &PresentationPolicy) -> Vec<PresenceEvent> {
        let mut events = Vec::new();
        for _ in 0..600 {
            if !presence.is_animating() {
                break;
            }
            events.extend(presence.tick(1.0 / 60.0, policy));
        }
        events
    }

    #[test]
    fn show_mounts_and_enters() {
        let p = policy(LayoutMode::Wide, false);
        let mut presence = Presence::new();
        let events = presence.show(Identity::Journalist, &p);
        assert_eq!(events, vec![PresenceEvent::Mounted(Identity::Journalist)]);
        let body = presence.mounted().unwrap();
        assert_eq!(body.phase(), PresencePhase::Entering);
        assert_eq!(body.pose(), Pose::new(0.0, -20.0, 0.0));

        run_until_idle(&mut presence, &p);
        let body = presence.mounted().unwrap();
        assert_eq!(body.phase(), PresencePhase::Present);
        assert_eq!(body.pose(), Pose::REST);
    }

    #[test]
    fn replace_is_ordered() {
        let p = policy(LayoutMode::Narrow, false);
        let mut presence = Presence::new();
        presence.show(Identity::Advocate, &p);
        run_until_idle(&mut presence, &p);

        let events = presence.show(Identity::Student, &p);
        assert!(events.is_empty());
        assert_eq!(presence.mounted_identity(), Some(Identity::Advocate));
        assert_eq!(presence.mounted().unwrap().phase(), PresencePhase::Exiting);
        assert_eq!(presence.queued(), Some(Identity::Student));

        let events = run_until_idle(&mut presence, &p);
        assert_eq!(
            events,
            vec![
                PresenceEvent::Unmounted(Identity::Advocate),
                PresenceEvent::Mounted(Identity::Student),
            ]
        );
        assert_eq!(presence.mounted().unwrap().phase(), PresencePhase::Present);
    }

    #[test]
    fn newest_request_replaces_queued_successor() {
        let p = policy(LayoutMode::Wide, false);
        let mut presence = Presence::new();
        presence.show(Identity::Journalist, &p);
        run_until_idle(&mut presence, &p);

        presence.show(Identity::Advocate, &p);
        presence.tick(0.1, &p);
        presence.show(Identity::Student, &p);
        assert_eq!(presence.queued(), Some(Identity::Student));

        let events = run_until_idle(&mut presence, &p);
        assert!(!events.contains(&PresenceEvent::Mounted(Identity::Advocate)));
        assert_eq!(presence.mounted_identity(), Some(Identity::Student));
    }

    #[test]
    fn reselecting_exiting_body_turns_it_around() {
        let p = policy(LayoutMode::Wide, false);
        let mut presence = Presence::new();
        presence.show(Identity::Journalist, &p);
        run_until_idle(&mut presence, &p);

        presence.hide(&p);
        presence.tick(0.1, &p);
        let mid_exit = presence.mounted().unwrap().pose();
        let events = presence.show(Identity::Journalist, &p);
        assert!(events.is_empty());

        let body = presence.mounted().unwrap();
        assert_eq!(body.phase(), PresencePhase::Entering);
        assert_eq!(body.transition().from, mid_exit);
    }

    #[test]
    fn hide_clears_queue() {
        let p = policy(LayoutMode::Wide, false);
        let mut presence = Presence::new();
        presence.show(Identity::Journalist, &p);
        run_until_idle(&mut presence, &p);
        presence.show(Identity::Advocate, &p);
        presence.hide(&p);
        assert_eq!(presence.queued(), None);

        let events = run_until_idle(&mut presence, &p);
        assert_eq!(events, vec![PresenceEvent::Unmounted(Identity::Journalist)]);
        assert!(presence.is_empty());
    }

    #[test]
    fn reduced_motion_replaces_in_one_call() {
        let p = policy(LayoutMode::Narrow, true);
        let mut presence = Presence::new();
        presence.show(Identity::Advocate, &p);
        assert_eq!(presence.mounted().unwrap().phase(), PresencePhase::Present);

        let events = presence.show(Identity::Student, &p);
        assert_eq!(
            events,
            vec![
                PresenceEvent::Unmounted(Identity::Advocate),
                PresenceEvent::Mounted(Identity::Student),
            ]
        );
        assert!(!presence.is_animating());
    }

    #[test]
    fn relayout_finishes_exit_and_enters_successor() {
        let wide = policy(LayoutMode::Wide, false);
        let narrow = policy(LayoutMode::Narrow, false);
        let mut presence = Presence::new();
        presence.show(Identity::Advocate, &wide);
        run_until_idle(&mut presence, &wide);
        presence.show(Identity::Student, &wide);

        let events = presence.relayout(&narrow);
        assert_eq!(
            events,
            vec![
                PresenceEvent::Unmounted(Identity::Advocate),
                PresenceEvent::Mounted(Identity::Student),
            ]
        );
        let body = presence.mounted().unwrap();
        assert_eq!(body.transition().from, Pose::new(1.0, 390.0, 0.0));
    }

    #[test]
    fn relayout_snaps_present_body_to_rest() {
        let wide = policy(LayoutMode::Wide, false);
        let narrow = policy(LayoutMode::Narrow, false);
        let mut presence = Presence::new();
        presence.show(Identity::Journalist, &narrow);
        presence.tick(0.05, &narrow);

        presence.relayout(&wide);
        let body = presence.mounted().unwrap();
        assert_eq!(body.phase(), PresencePhase::Present);
        assert_eq!(body.pose(), Pose::REST);
    }
}
