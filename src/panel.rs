//! The bio panel: one owner for selection, layout, motion, drag and prefetch
//!
//! Every handler takes `&mut self` and runs to completion; hosts feed events
//! in as they arrive and call [`BioPanel::tick`] once per frame with a
//! millisecond timestamp. Nothing is scheduled behind the host's back.
//!
//! ```ignore
//! let content = Edition::Full.load()?;
//! let mut panel = BioPanel::mount(global_settings().clone(), content, Viewport::new(390.0, 844.0), false)?;
//! panel.select(Identity::Student);
//! loop {
//!     panel.tick(now_ms());
//!     draw(panel.view(), panel.content_html());
//! }
//! ```

use crate::error::PanelError;
use crate::motion::Pose;
use crate::policy::{Placement, PresentationPolicy};
use crate::prefetch::{PrefetchCache, PrefetchRequest};
use crate::presence::{Presence, PresenceEvent, PresencePhase};
use crate::render;
use crate::resolver::LayoutResolver;
use crate::selection::{SelectionChange, SelectionEvent, SelectionState};
use crate::settings::PanelSettings;
use bio_input::{DragAxis, DragOutcome, DragRelease, DragTracker, Vec2};
use bio_types::{ContentEdition, ContentRecord, Identity, LayoutMode, NarrowStyle, Viewport};
use serde::{Deserialize, Serialize};

/// Snapshot of everything a host needs to draw the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelView {
    pub selection: SelectionState,
    pub mode: LayoutMode,
    pub narrow_style: NarrowStyle,
    pub placement: Placement,
    pub reduced_motion: bool,
    pub mounted: Option<MountedView>,
    /// Successor waiting for the mounted body to finish exiting
    pub queued: Option<Identity>,
    pub drag_axis: Option<DragAxis>,
    pub dragging: bool,
    pub back_control: bool,
    pub backdrop: bool,
    pub drag_handle: bool,
    /// More frames are needed to finish a transition
    pub animating: bool,
    /// A resize is waiting out the idle window
    pub resize_pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MountedView {
    pub identity: Identity,
    pub phase: PresencePhase,
    pub pose: Pose,
}

/// A drag in progress. The pointer moves the panel relative to wherever it
/// was when the pointer went down.
#[derive(Debug, Clone)]
struct ActiveDrag {
    tracker: DragTracker,
    base: f32,
}

impl ActiveDrag {
    fn position(&self, offset: f32) -> f32 {
        self.base + offset
    }
}

pub struct BioPanel<'c> {
    settings: PanelSettings,
    content: &'c ContentEdition,
    selection: SelectionState,
    resolver: LayoutResolver,
    reduced_motion: bool,
    presence: Presence,
    drag: Option<ActiveDrag>,
    prefetch: PrefetchCache,
    last_frame_ms: Option<u64>,
}

impl<'c> BioPanel<'c> {
    /// Build a panel in `Idle` with the layout mode resolved from `viewport`.
    pub fn mount(
        settings: PanelSettings,
        content: &'c ContentEdition,
        viewport: Viewport,
        reduced_motion: bool,
    ) -> Result<Self, PanelError> {
        settings.validate()?;
        let resolver = LayoutResolver::mount(
            viewport,
            settings.layout.breakpoint_px,
            settings.layout.resize_idle_ms,
        );
        tracing::debug!(
            edition = content.name(),
            mode = resolver.mode().as_str(),
            width = viewport.width,
            reduced_motion,
            "bio panel mounted"
        );
        Ok(Self {
            prefetch: PrefetchCache::new(settings.prefetch.enabled),
            settings,
            content,
            selection: SelectionState::Idle,
            resolver,
            reduced_motion,
            presence: Presence::new(),
            drag: None,
            last_frame_ms: None,
        })
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn mode(&self) -> LayoutMode {
        self.resolver.mode()
    }

    pub fn viewport(&self) -> Viewport {
        self.resolver.viewport()
    }

    pub fn settings(&self) -> &PanelSettings {
        &self.settings
    }

    pub fn content(&self) -> &'c ContentEdition {
        self.content
    }

    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    pub fn prefetch_cache(&self) -> &PrefetchCache {
        &self.prefetch
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Layout resize recomputations since mount.
    pub fn recomputations(&self) -> u64 {
        self.resolver.recomputations()
    }

    pub fn policy(&self) -> PresentationPolicy {
        PresentationPolicy::new(
            &self.settings,
            self.resolver.mode(),
            self.resolver.viewport(),
            self.reduced_motion,
        )
    }

    /// Record of the body currently in the tree, if any.
    pub fn mounted_content(&self) -> Option<&'c ContentRecord> {
        let identity = self.presence.mounted_identity()?;
        self.content.lookup(identity)
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Trigger tapped in the headline.
    pub fn select(&mut self, identity: Identity) -> SelectionChange {
        let change = self.selection.apply(SelectionEvent::Select(identity));
        self.sync_presence();
        change
    }

    /// Leave `Showing` through any dismiss path. No-op when idle.
    pub fn dismiss(&mut self) -> SelectionChange {
        let change = self.selection.apply(SelectionEvent::Dismiss);
        if !change.is_noop() {
            self.sync_presence();
        }
        change
    }

    /// Back control (slide overlay only).
    pub fn back(&mut self) -> SelectionChange {
        if self.policy().has_back_control() {
            self.dismiss()
        } else {
            self.unchanged()
        }
    }

    /// Tap on the dimmed area behind the drawer.
    pub fn backdrop_tap(&mut self) -> SelectionChange {
        if self.policy().has_backdrop() {
            self.dismiss()
        } else {
            self.unchanged()
        }
    }

    /// Escape key or hardware back, in every mode.
    pub fn escape(&mut self) -> SelectionChange {
        self.dismiss()
    }

    // =========================================================================
    // ENVIRONMENT
    // =========================================================================

    /// Viewport changed. Acted on by [`BioPanel::tick`] once the burst settles.
    pub fn on_resize(&mut self, viewport: Viewport, now_ms: u64) {
        self.resolver.on_resize(viewport, now_ms);
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        if self.reduced_motion == reduced_motion {
            return;
        }
        self.reduced_motion = reduced_motion;
        if reduced_motion {
            let policy = self.policy();
            let events = self.presence.finish(&policy);
            log_events(&events);
        }
    }

    /// Hover or focus on a link. Returns the fetch to issue, if any.
    pub fn hover_link(&mut self, url: &str) -> Option<PrefetchRequest> {
        self.prefetch.request(url)
    }

    // =========================================================================
    // DRAG
    // =========================================================================

    /// Start a drag if the current mode allows one and a body is on screen.
    pub fn pointer_down(&mut self, pos: Vec2, now_ms: u64) -> bool {
        let Some(axis) = self.policy().drag_axis() else {
            return false;
        };
        let Some(body) = self
            .presence
            .mounted()
            .filter(|body| body.phase() != PresencePhase::Exiting)
        else {
            return false;
        };
        let base = axis_position(axis, body.pose());

        let mut tracker = match DragTracker::new(self.settings.gestures.drag_config(axis)) {
            Ok(tracker) => tracker,
            Err(err) => {
                tracing::warn!(error = %err, "drag rejected");
                return false;
            }
        };
        tracker.pointer_down(pos, now_ms);
        self.drag = Some(ActiveDrag { tracker, base });
        true
    }

    /// Follow the pointer. Returns the constrained offset.
    pub fn pointer_move(&mut self, pos: Vec2, now_ms: u64) -> Option<f32> {
        let drag = self.drag.as_mut()?;
        let offset = drag.tracker.pointer_move(pos, now_ms)?;
        let position = drag.position(offset);
        let pose = self.policy().dragged_pose(position);
        self.presence.hold(pose);
        Some(offset)
    }

    /// Release: dismiss past either threshold, otherwise spring back.
    pub fn pointer_up(&mut self, pos: Vec2, now_ms: u64) -> Option<DragOutcome> {
        let mut drag = self.drag.take()?;
        let axis = drag.tracker.axis();
        let release = drag.tracker.pointer_up(pos, now_ms)?;
        let outcome = self.settings.gestures.thresholds().evaluate(&release);
        tracing::debug!(
            displacement = release.displacement,
            velocity = release.velocity,
            ?outcome,
            "drag released"
        );

        let (vx, vy) = axis_velocity(axis, &release);
        let policy = self.policy();
        let released_at = policy.dragged_pose(drag.position(release.displacement));
        self.presence.hold(released_at);
        match outcome {
            DragOutcome::Dismiss => {
                self.selection.apply(SelectionEvent::Dismiss);
                let events = self.presence.hide_with_velocity(&policy, vx, vy);
                log_events(&events);
            }
            DragOutcome::SnapBack => {
                self.presence.animate_in_place(policy.snap_back(released_at), vx, vy);
            }
        }
        Some(outcome)
    }

    /// Pointer lost (cancelled, left the window). Springs back without
    /// evaluating the release.
    pub fn pointer_cancel(&mut self) {
        let Some(mut drag) = self.drag.take() else {
            return;
        };
        let policy = self.policy();
        let from = policy.dragged_pose(drag.position(drag.tracker.offset()));
        drag.tracker.cancel();
        self.presence.animate_in_place(policy.snap_back(from), 0.0, 0.0);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.as_ref().is_some_and(|drag| drag.tracker.is_dragging())
    }

    /// Whether the host must keep calling [`BioPanel::tick`]: a transition is
    /// running or a resize is waiting to be applied.
    pub fn needs_frame(&self) -> bool {
        self.presence.is_animating() || self.resolver.is_pending()
    }

    // =========================================================================
    // FRAME
    // =========================================================================

    /// Advance to `now_ms`: settle pending resizes, then step animations.
    pub fn tick(&mut self, now_ms: u64) -> Vec<PresenceEvent> {
        let dt = self
            .last_frame_ms
            .map_or(0.0, |last| now_ms.saturating_sub(last) as f32 / 1000.0);
        self.last_frame_ms = Some(now_ms);

        let mut events = Vec::new();
        if let Some(recomputed) = self.resolver.poll(now_ms) {
            if recomputed.mode_changed() {
                self.drag = None;
                let policy = self.policy();
                events.extend(self.presence.relayout(&policy));
            }
        }
        let policy = self.policy();
        events.extend(self.presence.tick(dt, &policy));
        log_events(&events);
        events
    }

    /// Drop pending work before the host tears the panel down.
    pub fn unmount(&mut self) {
        self.resolver.cancel();
        if let Some(mut drag) = self.drag.take() {
            drag.tracker.cancel();
        }
    }

    // =========================================================================
    // OUTPUT
    // =========================================================================

    pub fn view(&self) -> PanelView {
        let policy = self.policy();
        let mounted = self.presence.mounted().map(|body| MountedView {
            identity: body.identity(),
            phase: body.phase(),
            pose: body.pose(),
        });
        let open = mounted.is_some();
        PanelView {
            selection: self.selection,
            mode: policy.mode(),
            narrow_style: policy.narrow_style(),
            placement: policy.placement(),
            reduced_motion: self.reduced_motion,
            mounted,
            queued: self.presence.queued(),
            drag_axis: policy.drag_axis(),
            dragging: self.is_dragging(),
            back_control: open && policy.has_back_control(),
            backdrop: open && policy.has_backdrop(),
            drag_handle: open && policy.has_backdrop(),
            animating: self.presence.is_animating(),
            resize_pending: self.resolver.is_pending(),
        }
    }

    /// Markup for the mounted body, `None` when nothing is mounted.
    pub fn content_html(&self) -> Option<String> {
        self.mounted_content()
            .map(|record| render::content(record).into_string())
    }

    pub fn headline_html(&self) -> String {
        render::headline(self.content, self.selection.active()).into_string()
    }

    // =========================================================================
    // INTERNAL HELPERS
    // =========================================================================

    fn unchanged(&self) -> SelectionChange {
        SelectionChange {
            previous: self.selection.active(),
            current: self.selection.active(),
        }
    }

    fn sync_presence(&mut self) {
        if let Some(mut drag) = self.drag.take() {
            drag.tracker.cancel();
        }
        let policy = self.policy();
        let events = match self.selection.active() {
            Some(identity) if self.content.contains(identity) => self.presence.show(identity, &policy),
            Some(identity) => {
                tracing::debug!(%identity, edition = self.content.name(), "identity not in edition");
                self.presence.hide(&policy)
            }
            None => self.presence.hide(&policy),
        };
        log_events(&events);
    }
}

fn axis_velocity(axis: DragAxis, release: &DragRelease) -> (f32, f32) {
    match axis {
        DragAxis::X => (release.velocity, 0.0),
        DragAxis::Y => (0.0, release.velocity),
    }
}

fn axis_position(axis: DragAxis, pose: Pose) -> f32 {
    match axis {
        DragAxis::X => pose.x,
        DragAxis::Y => pose.y,
    }
}

fn log_events(events: &[PresenceEvent]) {
    for event in events {
        tracing::trace!(?event, "presence");
    }
}
