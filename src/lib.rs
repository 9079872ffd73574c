//! Interactive bio panel
//!
//! A headline introduces a person through a handful of identities; tapping
//! one reveals its content in a panel. This crate is the panel's brain:
//!
//! - [`selection`]: which identity (if any) is active
//! - [`resolver`]: wide vs. narrow layout from the viewport width, debounced
//! - [`policy`]: placement, entry/exit motion and drag axis per mode
//! - [`presence`]: ordered mount/unmount so two bodies never share the screen
//! - [`motion`]: easing curves, springs and pose animations
//! - [`panel`]: [`BioPanel`], the single owner the host talks to
//! - [`render`]: headline and content markup
//! - [`prefetch`]: once-per-URL background fetches on link hover
//!
//! Shared vocabulary (identities, content editions) lives in `bio-types`;
//! pointer and resize input primitives live in `bio-input`.
//!
//! The browser entry point is [`web::BioPanelHandle`] (wasm32 only).

pub mod error;
pub mod motion;
pub mod panel;
pub mod policy;
pub mod prefetch;
pub mod presence;
pub mod render;
pub mod resolver;
pub mod selection;
pub mod settings;
pub mod telemetry;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use bio_input::{DragAxis, DragOutcome, Vec2};
pub use bio_types::{ContentEdition, ContentRecord, Edition, Identity, LayoutMode, NarrowStyle, Viewport};
pub use error::{PanelError, PrefetchError};
pub use motion::{Motion, Pose, TransitionSpec};
pub use panel::{BioPanel, MountedView, PanelView};
pub use policy::{Placement, PresentationPolicy};
pub use prefetch::{LinkFetcher, PrefetchCache, PrefetchRequest, Prefetcher};
pub use presence::{PresenceEvent, PresencePhase};
pub use resolver::{resolve, LayoutResolver};
pub use selection::{SelectionChange, SelectionEvent, SelectionState};
pub use settings::{global_settings, PanelSettings};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tracing::info!("interactive bio loaded");
}
