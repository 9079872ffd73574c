//! Panel settings
//!
//! Settings ship as YAML (`config/panel_settings.yaml`) embedded in the
//! binary and parsed once per process through [`global_settings`]. Hosts that
//! need different values build a [`PanelSettings`] themselves, either from
//! their own YAML or by editing the defaults.
//!
//! # Spring presets
//!
//! Springs are looked up by name with [`AnimationSettings::spring`]:
//! - `panel`: narrow-mode entry and exit (slide and drawer)
//! - `snap_back`: return to rest after a drag that did not dismiss

use crate::error::PanelError;
use crate::motion::{EasingFn, SpringConfig};
use bio_input::{DismissThresholds, DragAxis, DragConfig};
use bio_types::NarrowStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

const EMBEDDED_SETTINGS: &str = include_str!("../config/panel_settings.yaml");

/// Process-wide settings, loaded from the embedded YAML on first use.
///
/// Falls back to [`PanelSettings::default`] (with a warning) if the embedded
/// file fails to parse or validate.
pub fn global_settings() -> &'static PanelSettings {
    static SETTINGS: OnceLock<PanelSettings> = OnceLock::new();
    SETTINGS.get_or_init(|| match PanelSettings::from_yaml(EMBEDDED_SETTINGS) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(error = %err, "embedded panel settings rejected, using defaults");
            PanelSettings::default()
        }
    })
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    pub layout: LayoutSettings,
    pub animation: AnimationSettings,
    pub gestures: GestureSettings,
    pub prefetch: PrefetchSettings,
}

impl PanelSettings {
    pub fn from_yaml(source: &str) -> Result<Self, PanelError> {
        let settings: PanelSettings = serde_yaml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), PanelError> {
        let layout = &self.layout;
        if !(layout.breakpoint_px > 0.0) {
            return Err(invalid("layout.breakpoint_px", "must be positive"));
        }
        if !(layout.drawer_height_fraction > 0.0 && layout.drawer_height_fraction <= 1.0) {
            return Err(invalid(
                "layout.drawer_height_fraction",
                "must be within (0.0, 1.0]",
            ));
        }
        if !(self.animation.wide.duration_s >= 0.0) {
            return Err(invalid("animation.wide.duration_s", "must not be negative"));
        }
        for (name, spring) in &self.animation.springs {
            if !(spring.stiffness > 0.0 && spring.damping > 0.0) {
                return Err(PanelError::InvalidSetting {
                    field: "animation.springs",
                    reason: format!("preset '{name}' needs positive stiffness and damping"),
                });
            }
        }
        self.gestures.thresholds().validate()?;
        self.gestures.drag_config(DragAxis::X).validate()?;
        Ok(())
    }

    pub fn with_narrow_style(mut self, style: NarrowStyle) -> Self {
        self.layout.narrow_style = style;
        self
    }
}

fn invalid(field: &'static str, reason: &str) -> PanelError {
    PanelError::InvalidSetting {
        field,
        reason: reason.to_string(),
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Widths strictly below this are narrow
    pub breakpoint_px: f32,
    /// Quiet period before a resize burst is acted on
    pub resize_idle_ms: u64,
    pub narrow_style: NarrowStyle,
    /// Drawer height cap as a fraction of viewport height
    pub drawer_height_fraction: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            breakpoint_px: 768.0,
            resize_idle_ms: bio_input::DEFAULT_RESIZE_IDLE_MS,
            narrow_style: NarrowStyle::Slide,
            drawer_height_fraction: 0.85,
        }
    }
}

// =============================================================================
// ANIMATION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WideTweenSettings {
    pub duration_s: f32,
    pub entry_offset_x: f32,
    pub exit_offset_x: f32,
    pub easing: EasingFn,
}

impl Default for WideTweenSettings {
    fn default() -> Self {
        Self {
            duration_s: 0.4,
            entry_offset_x: -20.0,
            exit_offset_x: 10.0,
            easing: EasingFn::EaseOutCubic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub wide: WideTweenSettings,
    pub springs: BTreeMap<String, SpringConfig>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        let mut springs = BTreeMap::new();
        springs.insert(
            "panel".to_string(),
            SpringConfig {
                stiffness: 300.0,
                damping: 1.0,
            },
        );
        springs.insert(
            "snap_back".to_string(),
            SpringConfig {
                stiffness: 500.0,
                damping: 1.0,
            },
        );
        Self {
            wide: WideTweenSettings::default(),
            springs,
        }
    }
}

impl AnimationSettings {
    /// Spring preset by name. Unknown names get the critically damped default.
    pub fn spring(&self, name: &str) -> SpringConfig {
        match self.springs.get(name) {
            Some(config) => *config,
            None => {
                tracing::debug!(preset = name, "unknown spring preset, using default");
                SpringConfig::default()
            }
        }
    }
}

// =============================================================================
// GESTURES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    pub dismiss_distance_px: f32,
    pub dismiss_velocity_px_s: f32,
    pub elastic: f32,
    pub velocity_window_ms: u64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            dismiss_distance_px: bio_input::DEFAULT_DISMISS_DISTANCE,
            dismiss_velocity_px_s: bio_input::DEFAULT_DISMISS_VELOCITY,
            elastic: bio_input::DEFAULT_ELASTIC,
            velocity_window_ms: bio_input::DEFAULT_VELOCITY_WINDOW_MS,
        }
    }
}

impl GestureSettings {
    pub fn thresholds(&self) -> DismissThresholds {
        DismissThresholds {
            distance: self.dismiss_distance_px,
            velocity: self.dismiss_velocity_px_s,
        }
    }

    pub fn drag_config(&self, axis: DragAxis) -> DragConfig {
        DragConfig {
            axis,
            elastic: self.elastic,
            velocity_window_ms: self.velocity_window_ms,
        }
    }
}

// =============================================================================
// PREFETCH
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefetchSettings {
    pub enabled: bool,
}

impl Default for PrefetchSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}
