//! Browser binding
//!
//! [`BioPanelHandle`] is what the page's script holds. It forwards DOM
//! events to the panel, runs prefetches through `<link rel="prefetch">` and
//! hands back the view as JSON plus content markup. Timestamps are
//! `performance.now()` milliseconds.

use crate::panel::BioPanel;
use crate::prefetch::{LinkTagFetcher, Prefetcher};
use crate::settings::global_settings;
use bio_input::{DragOutcome, Vec2};
use bio_types::{Edition, Identity, Viewport};
use wasm_bindgen::prelude::*;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn edition_named(name: &str) -> Result<Edition, JsValue> {
    match name {
        "" | "full" => Ok(Edition::Full),
        "no_contact" => Ok(Edition::NoContact),
        other => Err(js_error(format!("Unknown edition '{other}'"))),
    }
}

fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .is_some_and(|query| query.matches())
}

fn millis(now_ms: f64) -> u64 {
    now_ms.max(0.0) as u64
}

#[wasm_bindgen]
pub struct BioPanelHandle {
    panel: BioPanel<'static>,
    prefetcher: Prefetcher<LinkTagFetcher>,
}

#[wasm_bindgen]
impl BioPanelHandle {
    /// Mount with the embedded settings. `edition` is `"full"` or `"no_contact"`.
    #[wasm_bindgen(constructor)]
    pub fn new(edition: &str, width: f32, height: f32) -> Result<BioPanelHandle, JsValue> {
        let content = edition_named(edition)?.load().map_err(js_error)?;
        let panel = BioPanel::mount(
            global_settings().clone(),
            content,
            Viewport::new(width, height),
            prefers_reduced_motion(),
        )
        .map_err(js_error)?;
        Ok(Self {
            panel,
            prefetcher: Prefetcher::new(LinkTagFetcher),
        })
    }

    pub fn select(&mut self, identity: &str) -> Result<(), JsValue> {
        let identity: Identity = identity.parse().map_err(js_error)?;
        self.panel.select(identity);
        Ok(())
    }

    pub fn back(&mut self) {
        self.panel.back();
    }

    #[wasm_bindgen(js_name = backdropTap)]
    pub fn backdrop_tap(&mut self) {
        self.panel.backdrop_tap();
    }

    pub fn escape(&mut self) {
        self.panel.escape();
    }

    pub fn resize(&mut self, width: f32, height: f32, now_ms: f64) {
        self.panel.on_resize(Viewport::new(width, height), millis(now_ms));
    }

    #[wasm_bindgen(js_name = setReducedMotion)]
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.panel.set_reduced_motion(reduced);
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32, now_ms: f64) -> bool {
        self.panel.pointer_down(Vec2::new(x, y), millis(now_ms))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32, now_ms: f64) {
        self.panel.pointer_move(Vec2::new(x, y), millis(now_ms));
    }

    /// `true` if the release dismissed the panel.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f32, y: f32, now_ms: f64) -> bool {
        self.panel.pointer_up(Vec2::new(x, y), millis(now_ms)) == Some(DragOutcome::Dismiss)
    }

    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self) {
        self.panel.pointer_cancel();
    }

    /// Hover or focus on a link inside the panel.
    #[wasm_bindgen(js_name = linkIntent)]
    pub fn link_intent(&mut self, url: &str) {
        if let Some(request) = self.panel.hover_link(url) {
            self.prefetcher.spawn(request);
        }
    }

    /// Advance one frame. Returns whether another frame is needed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.panel.tick(millis(now_ms));
        self.panel.needs_frame()
    }

    #[wasm_bindgen(js_name = viewJson)]
    pub fn view_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.panel.view()).map_err(js_error)
    }

    #[wasm_bindgen(js_name = contentHtml)]
    pub fn content_html(&self) -> Option<String> {
        self.panel.content_html()
    }

    #[wasm_bindgen(js_name = headlineHtml)]
    pub fn headline_html(&self) -> String {
        self.panel.headline_html()
    }

    pub fn unmount(&mut self) {
        self.panel.unmount();
    }
}
