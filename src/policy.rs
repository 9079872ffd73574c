//! Per-mode presentation policy
//!
//! One policy object answers every "how does the panel present itself right
//! now" question for the current mode, narrow style, viewport and motion
//! preference:
//!
//! | Mode            | Placement     | Entry / exit                         | Drag |
//! |-----------------|---------------|--------------------------------------|------|
//! | wide            | side column   | fade + x offset, fixed-duration tween| none |
//! | narrow / slide  | overlay       | spring from/to offscreen right       | x    |
//! | narrow / drawer | bottom drawer | spring from/to offscreen bottom      | y    |
//!
//! With reduced motion every transition comes back as [`Motion::Instant`].

use crate::motion::{Motion, Pose, TransitionSpec};
use crate::settings::PanelSettings;
use bio_input::DragAxis;
use bio_types::{LayoutMode, NarrowStyle, Viewport};
use serde::{Deserialize, Serialize};

/// Where the panel sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Placement {
    /// Fixed column beside the sticky headline
    SideColumn,
    /// Covers the whole viewport
    Overlay,
    /// Anchored to the bottom edge, scrolls internally past `max_height`
    BottomDrawer { max_height: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresentationPolicy {
    mode: LayoutMode,
    style: NarrowStyle,
    viewport: Viewport,
    reduced_motion: bool,
    settings: PanelSettings,
}

impl PresentationPolicy {
    pub fn new(
        settings: &PanelSettings,
        mode: LayoutMode,
        viewport: Viewport,
        reduced_motion: bool,
    ) -> Self {
        Self {
            mode,
            style: settings.layout.narrow_style,
            viewport,
            reduced_motion,
            settings: settings.clone(),
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn narrow_style(&self) -> NarrowStyle {
        self.style
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn placement(&self) -> Placement {
        match (self.mode, self.style) {
            (LayoutMode::Wide, _) => Placement::SideColumn,
            (LayoutMode::Narrow, NarrowStyle::Slide) => Placement::Overlay,
            (LayoutMode::Narrow, NarrowStyle::Drawer) => Placement::BottomDrawer {
                max_height: self.drawer_height(),
            },
        }
    }

    /// Axis the panel can be dragged away along, if any.
    pub fn drag_axis(&self) -> Option<DragAxis> {
        match (self.mode, self.style) {
            (LayoutMode::Wide, _) => None,
            (LayoutMode::Narrow, NarrowStyle::Slide) => Some(DragAxis::X),
            (LayoutMode::Narrow, NarrowStyle::Drawer) => Some(DragAxis::Y),
        }
    }

    pub fn has_back_control(&self) -> bool {
        matches!(self.placement(), Placement::Overlay)
    }

    pub fn has_backdrop(&self) -> bool {
        matches!(self.placement(), Placement::BottomDrawer { .. })
    }

    pub fn rest_pose(&self) -> Pose {
        Pose::REST
    }

    /// Pose while a drag holds the panel `offset` pixels from rest.
    pub fn dragged_pose(&self, offset: f32) -> Pose {
        match self.drag_axis() {
            Some(DragAxis::X) => Pose::new(1.0, offset, 0.0),
            Some(DragAxis::Y) => Pose::new(1.0, 0.0, offset),
            None => self.rest_pose(),
        }
    }

    pub fn entry(&self) -> TransitionSpec {
        let wide = &self.settings.animation.wide;
        let from = match self.mode {
            LayoutMode::Wide => Pose::new(0.0, wide.entry_offset_x, 0.0),
            LayoutMode::Narrow => self.offscreen_pose(),
        };
        self.spec(self.panel_motion(), from, self.rest_pose())
    }

    pub fn exit(&self, from: Pose) -> TransitionSpec {
        let wide = &self.settings.animation.wide;
        let to = match self.mode {
            LayoutMode::Wide => Pose::new(0.0, wide.exit_offset_x, 0.0),
            LayoutMode::Narrow => self.offscreen_pose(),
        };
        self.spec(self.panel_motion(), from, to)
    }

    /// Return to rest after a drag that did not dismiss.
    pub fn snap_back(&self, from: Pose) -> TransitionSpec {
        let motion = Motion::Spring(self.settings.animation.spring("snap_back"));
        self.spec(motion, from, self.rest_pose())
    }

    // =========================================================================
    // INTERNAL HELPERS
    // =========================================================================

    fn spec(&self, motion: Motion, from: Pose, to: Pose) -> TransitionSpec {
        TransitionSpec {
            motion: if self.reduced_motion {
                Motion::Instant
            } else {
                motion
            },
            from,
            to,
        }
    }

    fn panel_motion(&self) -> Motion {
        match self.mode {
            LayoutMode::Wide => {
                let wide = &self.settings.animation.wide;
                Motion::Tween {
                    duration: wide.duration_s,
                    easing: wide.easing,
                }
            }
            LayoutMode::Narrow => Motion::Spring(self.settings.animation.spring("panel")),
        }
    }

    fn drawer_height(&self) -> f32 {
        self.viewport.height * self.settings.layout.drawer_height_fraction
    }

    fn offscreen_pose(&self) -> Pose {
        match self.style {
            NarrowStyle::Slide => Pose::new(1.0, self.viewport.width, 0.0),
            NarrowStyle::Drawer => Pose::new(1.0, 0.0, self.drawer_height()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(mode: LayoutMode, style: NarrowStyle, reduced: bool) -> PresentationPolicy {
        let settings = PanelSettings::default().with_narrow_style(style);
        PresentationPolicy::new(&settings, mode, Viewport::new(390.0, 800.0), reduced)
    }

    #[test]
    fn wide_uses_short_eased_fade() {
        let p = policy(LayoutMode::Wide, NarrowStyle::Slide, false);
        let entry = p.entry();
        assert_eq!(entry.duration(), Some(0.4));
        assert_eq!(entry.from, Pose::new(0.0, -20.0, 0.0));
        assert_eq!(entry.to, Pose::REST);
        let exit = p.exit(Pose::REST);
        assert_eq!(exit.to, Pose::new(0.0, 10.0, 0.0));
        assert_eq!(p.placement(), Placement::SideColumn);
        assert_eq!(p.drag_axis(), None);
        assert!(!p.has_back_control());
    }

    #[test]
    fn slide_enters_from_offscreen_right_on_a_spring() {
        let p = policy(LayoutMode::Narrow, NarrowStyle::Slide, false);
        let entry = p.entry();
        assert!(matches!(entry.motion, Motion::Spring(cfg) if cfg.damping >= 1.0));
        assert_eq!(entry.from, Pose::new(1.0, 390.0, 0.0));
        assert_eq!(p.exit(Pose::REST).to, Pose::new(1.0, 390.0, 0.0));
        assert_eq!(p.drag_axis(), Some(DragAxis::X));
        assert!(p.has_back_control());
        assert!(!p.has_backdrop());
    }

    #[test]
    fn drawer_rises_from_offscreen_bottom() {
        let p = policy(LayoutMode::Narrow, NarrowStyle::Drawer, false);
        let height = 800.0 * 0.85;
        assert_eq!(p.entry().from, Pose::new(1.0, 0.0, height));
        assert_eq!(p.exit(Pose::REST).to, Pose::new(1.0, 0.0, height));
        assert_eq!(p.placement(), Placement::BottomDrawer { max_height: height });
        assert_eq!(p.drag_axis(), Some(DragAxis::Y));
        assert!(p.has_backdrop());
        assert_eq!(p.dragged_pose(42.0), Pose::new(1.0, 0.0, 42.0));
    }

    #[test]
    fn reduced_motion_zeroes_every_transition() {
        for mode in [LayoutMode::Wide, LayoutMode::Narrow] {
            for style in [NarrowStyle::Slide, NarrowStyle::Drawer] {
                let p = policy(mode, style, true);
                let dragged = p.dragged_pose(60.0);
                for spec in [p.entry(), p.exit(Pose::REST), p.snap_back(dragged)] {
                    assert_eq!(spec.duration(), Some(0.0), "{mode:?}/{style:?}");
                    assert!(spec.is_instant());
                }
            }
        }
    }
}
