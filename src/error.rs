//! Panel error types.

use bio_input::InputError;
use bio_types::ContentError;
use thiserror::Error;

/// Errors raised while building a panel.
///
/// Runtime interaction (taps, resizes, drags, frames) is infallible; only
/// construction from settings and content can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PanelError {
    #[error("Invalid settings source: {0}")]
    SettingsParse(String),

    #[error("Invalid setting '{field}': {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error(transparent)]
    Gesture(#[from] InputError),

    #[error(transparent)]
    Content(#[from] ContentError),
}

impl From<serde_yaml::Error> for PanelError {
    fn from(err: serde_yaml::Error) -> Self {
        PanelError::SettingsParse(err.to_string())
    }
}

/// Prefetch transport failure. Logged and dropped by the dispatcher, never
/// handed back to the panel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefetchError {
    #[error("Prefetch of '{url}' failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Prefetch of '{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Prefetch of '{0}' has no base to resolve against")]
    Unresolvable(String),
}
