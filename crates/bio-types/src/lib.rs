//! Shared types for the interactive bio panel
//!
//! This crate is the single source of truth for the vocabulary every other
//! layer speaks: which identities exist, which layout mode is in force, and
//! what content each identity reveals.
//!
//! ## Rules
//!
//! 1. Identities are a closed set, fixed at build time
//! 2. Content editions are immutable once loaded
//! 3. Tagged enums only: `#[serde(tag = "kind")]`

pub mod content;
pub mod edition;
pub mod error;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use content::{ContentBody, ContentRecord, LabeledList, Link, LinkSection, ResumeBlock, TextBody};
pub use edition::{ContentEdition, Edition};
pub use error::ContentError;

// ============================================================================
// IDENTITY
// ============================================================================

/// One of the named roles the subject presents in the headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Identity {
    Journalist,
    Advocate,
    Student,
    Resume,
    Contact,
}

impl Identity {
    /// Every identity, in headline order.
    pub const ALL: [Identity; 5] = [
        Identity::Journalist,
        Identity::Advocate,
        Identity::Student,
        Identity::Resume,
        Identity::Contact,
    ];

    /// Stable key used in content files and DOM data attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Identity::Journalist => "journalist",
            Identity::Advocate => "advocate",
            Identity::Student => "student",
            Identity::Resume => "resume",
            Identity::Contact => "contact",
        }
    }

    /// Text shown for the trigger inside the headline sentence.
    pub fn trigger_label(&self) -> &'static str {
        match self {
            Identity::Contact => "work together",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Identity {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identity::ALL
            .into_iter()
            .find(|identity| identity.as_str() == s)
            .ok_or_else(|| ContentError::UnknownIdentity(s.to_string()))
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Presentation profile selected from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Desktop: sticky headline with the panel in a side column.
    Wide,
    /// Mobile: the panel covers the viewport or rises as a drawer.
    Narrow,
}

impl LayoutMode {
    /// `width < breakpoint` is narrow, everything else is wide.
    pub fn from_width(width: f32, breakpoint: f32) -> Self {
        if width < breakpoint {
            LayoutMode::Narrow
        } else {
            LayoutMode::Wide
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Wide => "wide",
            LayoutMode::Narrow => "narrow",
        }
    }
}

/// How the panel presents itself in narrow mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrowStyle {
    /// Full-viewport overlay sliding in from the right edge.
    #[default]
    Slide,
    /// Bottom-anchored drawer with capped height.
    Drawer,
}

/// Viewport size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_round_trips_through_its_key() {
        for identity in Identity::ALL {
            assert_eq!(identity.as_str().parse::<Identity>().ok(), Some(identity));
        }
    }

    #[test]
    fn unknown_identity_is_an_error() {
        let err = "astronaut".parse::<Identity>().unwrap_err();
        assert!(matches!(err, ContentError::UnknownIdentity(ref key) if key == "astronaut"));
    }

    #[test]
    fn contact_trigger_reads_as_a_phrase() {
        assert_eq!(Identity::Contact.trigger_label(), "work together");
        assert_eq!(Identity::Resume.trigger_label(), "resume");
    }

    #[test]
    fn layout_mode_boundary() {
        assert_eq!(LayoutMode::from_width(767.0, 768.0), LayoutMode::Narrow);
        assert_eq!(LayoutMode::from_width(767.9, 768.0), LayoutMode::Narrow);
        assert_eq!(LayoutMode::from_width(768.0, 768.0), LayoutMode::Wide);
        assert_eq!(LayoutMode::from_width(1440.0, 768.0), LayoutMode::Wide);
    }

    #[test]
    fn identity_serializes_snake_case() {
        let json = serde_json::to_string(&Identity::Journalist).unwrap();
        assert_eq!(json, "\"journalist\"");
        let mode: LayoutMode = serde_json::from_str("\"narrow\"").unwrap();
        assert_eq!(mode, LayoutMode::Narrow);
    }
}
