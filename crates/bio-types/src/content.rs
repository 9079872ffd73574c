//! Content records revealed by the panel.

use crate::Identity;
use serde::{Deserialize, Serialize};

/// Outbound link. The URL is an opaque string and is never parsed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
    /// Opens in a new tab.
    #[serde(default)]
    pub external: bool,
    /// Served as a download rather than navigated to.
    #[serde(default)]
    pub download: bool,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            external: false,
            download: false,
        }
    }

    pub fn external(mut self) -> Self {
        self.external = true;
        self
    }
}

/// Ordered links under an optional heading.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkSection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl LinkSection {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Plain labelled list (press mentions, competencies, recognitions).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabeledList {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Paragraph text with optional link sections and notes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextBody {
    #[serde(default)]
    pub paragraph: String,
    #[serde(default)]
    pub sections: Vec<LinkSection>,
    #[serde(default)]
    pub notes: Option<LabeledList>,
}

impl TextBody {
    /// Sections that actually carry links. Empty sections render nothing.
    pub fn link_sections(&self) -> impl Iterator<Item = &LinkSection> {
        self.sections.iter().filter(|section| !section.is_empty())
    }

    pub fn link_count(&self) -> usize {
        self.sections.iter().map(|section| section.links.len()).sum()
    }
}

/// Bespoke resume layout: download action, dated badge, two lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeBlock {
    pub download: Link,
    pub badge: String,
    pub competencies: LabeledList,
    pub recognitions: LabeledList,
}

/// What a record renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBody {
    Text(TextBody),
    /// Rendered verbatim, no paragraph/link rules apply.
    Resume(ResumeBlock),
}

/// Content revealed for one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub identity: Identity,
    pub body: ContentBody,
}

impl ContentRecord {
    pub fn is_custom(&self) -> bool {
        matches!(self.body, ContentBody::Resume(_))
    }

    pub fn text(&self) -> Option<&TextBody> {
        match &self.body {
            ContentBody::Text(text) => Some(text),
            ContentBody::Resume(_) => None,
        }
    }

    /// Every link the record exposes, in render order.
    pub fn links(&self) -> Vec<&Link> {
        match &self.body {
            ContentBody::Text(text) => text
                .sections
                .iter()
                .flat_map(|section| section.links.iter())
                .collect(),
            ContentBody::Resume(resume) => vec![&resume.download],
        }
    }
}
