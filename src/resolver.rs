//! Responsive layout mode resolution
//!
//! The mode is resolved synchronously once at mount so the first frame is
//! never in the wrong layout. After that, resize events are debounced: the
//! last width of a burst is acted on once the burst has been quiet for the
//! idle window.

use bio_input::Debouncer;
use bio_types::{LayoutMode, Viewport};
use serde::{Deserialize, Serialize};

/// `width < breakpoint → Narrow`, else `Wide`. Depends on width alone.
pub fn resolve(width_px: f32, breakpoint_px: f32) -> LayoutMode {
    LayoutMode::from_width(width_px, breakpoint_px)
}

/// A settled resize, reported by [`LayoutResolver::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recomputed {
    pub viewport: Viewport,
    pub previous: LayoutMode,
    pub mode: LayoutMode,
}

impl Recomputed {
    pub fn mode_changed(&self) -> bool {
        self.previous != self.mode
    }
}

#[derive(Debug, Clone)]
pub struct LayoutResolver {
    breakpoint_px: f32,
    viewport: Viewport,
    mode: LayoutMode,
    pending: Debouncer<Viewport>,
    recomputations: u64,
}

impl LayoutResolver {
    /// Resolve immediately from the mount-time viewport.
    pub fn mount(viewport: Viewport, breakpoint_px: f32, idle_ms: u64) -> Self {
        Self {
            breakpoint_px,
            viewport,
            mode: resolve(viewport.width, breakpoint_px),
            pending: Debouncer::new(idle_ms),
            recomputations: 0,
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Viewport the current mode was resolved from.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn breakpoint_px(&self) -> f32 {
        self.breakpoint_px
    }

    /// Resolutions performed since mount, excluding the mount itself.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Record a resize. Restarts the idle window.
    pub fn on_resize(&mut self, viewport: Viewport, now_ms: u64) {
        self.pending.push(viewport, now_ms);
    }

    /// Recompute if the idle window has elapsed since the last resize.
    pub fn poll(&mut self, now_ms: u64) -> Option<Recomputed> {
        let viewport = self.pending.poll(now_ms)?;
        let previous = self.mode;
        self.viewport = viewport;
        self.mode = resolve(viewport.width, self.breakpoint_px);
        self.recomputations += 1;

        let recomputed = Recomputed {
            viewport,
            previous,
            mode: self.mode,
        };
        if recomputed.mode_changed() {
            tracing::info!(
                width = viewport.width,
                from = previous.as_str(),
                to = self.mode.as_str(),
                "layout mode switched"
            );
        }
        Some(recomputed)
    }

    /// Drop any pending resize (teardown).
    pub fn cancel(&mut self) {
        self.pending.cancel();
    }
}
