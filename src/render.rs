//! HTML rendering for the headline and panel content
//!
//! Markup only; styling belongs to the host page. Record bodies follow one
//! rule: a custom block renders as-is, anything else renders its paragraph,
//! then each non-empty link section (optional title, ordered links), then the
//! notes list if present.

use bio_types::{ContentBody, ContentEdition, ContentRecord, Identity, LabeledList, Link, ResumeBlock, TextBody};
use maud::{html, Markup};

// =============================================================================
// HEADLINE
// =============================================================================

fn article(identity: Identity) -> &'static str {
    match identity {
        Identity::Advocate => "an",
        _ => "a",
    }
}

pub fn trigger(identity: Identity, active: bool) -> Markup {
    html! {
        button.trigger.active[active] type="button" data-identity=(identity.as_str()) {
            (identity.trigger_label())
        }
    }
}

/// Introductory sentence with one trigger per identity in the roster.
pub fn headline(edition: &ContentEdition, active: Option<Identity>) -> Markup {
    let roles: Vec<Identity> = edition
        .roster()
        .iter()
        .copied()
        .filter(|identity| {
            matches!(
                identity,
                Identity::Journalist | Identity::Advocate | Identity::Student
            )
        })
        .collect();
    let is_active = |identity: Identity| active == Some(identity);

    html! {
        h1.headline {
            "Hi, I'm " span.subject { (edition.subject()) } "."
            @if !roles.is_empty() {
                " I am "
                @for (i, role) in roles.iter().enumerate() {
                    @if i > 0 {
                        @if i + 1 == roles.len() { ", and " } @else { ", " }
                    }
                    (article(*role)) " " (trigger(*role, is_active(*role)))
                }
                "."
            }
            @if edition.contains(Identity::Resume) {
                " Here's my " (trigger(Identity::Resume, is_active(Identity::Resume))) "."
            }
            @if edition.contains(Identity::Contact) {
                " I would love to " (trigger(Identity::Contact, is_active(Identity::Contact))) "!"
            }
        }
    }
}

// =============================================================================
// CONTENT
// =============================================================================

pub fn link(link: &Link) -> Markup {
    let target = link.external.then_some("_blank");
    let rel = link.external.then_some("noopener noreferrer");
    html! {
        a href=(link.url) target=[target] rel=[rel] download[link.download] { (link.label) }
    }
}

fn labeled_list(list: &LabeledList) -> Markup {
    html! {
        section.list {
            h3 { (list.title) }
            ul {
                @for item in &list.items {
                    li { (item) }
                }
            }
        }
    }
}

fn text_body(text: &TextBody) -> Markup {
    html! {
        @if !text.paragraph.is_empty() {
            p { (text.paragraph) }
        }
        @for group in text.link_sections() {
            section.links {
                @if let Some(title) = &group.title {
                    h3 { (title) }
                }
                ul {
                    @for entry in &group.links {
                        li { (link(entry)) }
                    }
                }
            }
        }
        @if let Some(notes) = &text.notes {
            (labeled_list(notes))
        }
    }
}

fn resume_block(resume: &ResumeBlock) -> Markup {
    html! {
        div.resume {
            div.resume-header {
                (link(&resume.download))
                span.badge { (resume.badge) }
            }
            (labeled_list(&resume.competencies))
            (labeled_list(&resume.recognitions))
        }
    }
}

/// Panel body for one record.
pub fn content(record: &ContentRecord) -> Markup {
    html! {
        article.content data-identity=(record.identity.as_str()) {
            @match &record.body {
                ContentBody::Text(text) => { (text_body(text)) }
                ContentBody::Resume(resume) => { (resume_block(resume)) }
            }
        }
    }
}

/// Looks the identity up and renders it; identities outside the edition
/// render nothing.
pub fn lookup_and_render(edition: &ContentEdition, identity: Identity) -> Option<Markup> {
    edition.lookup(identity).map(content)
}
