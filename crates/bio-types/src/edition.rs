//! Content editions
//!
//! An edition is one immutable snapshot of the content table. Divergent copies
//! of the content (different link sets, different recognitions) are kept as
//! separate editions rather than merged.
//!
//! Built-in editions are embedded YAML, parsed and validated once per process
//! on first use.

use crate::content::{ContentBody, ContentRecord};
use crate::error::ContentError;
use crate::Identity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Built-in content snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edition {
    /// All five identities.
    #[default]
    Full,
    /// Four identities, no contact record.
    NoContact,
}

impl Edition {
    fn source(&self) -> &'static str {
        match self {
            Edition::Full => include_str!("../content/full.yaml"),
            Edition::NoContact => include_str!("../content/no_contact.yaml"),
        }
    }

    fn cell(&self) -> &'static OnceLock<Result<ContentEdition, ContentError>> {
        static FULL: OnceLock<Result<ContentEdition, ContentError>> = OnceLock::new();
        static NO_CONTACT: OnceLock<Result<ContentEdition, ContentError>> = OnceLock::new();
        match self {
            Edition::Full => &FULL,
            Edition::NoContact => &NO_CONTACT,
        }
    }

    /// Load (once) and return the edition.
    pub fn load(&self) -> Result<&'static ContentEdition, ContentError> {
        self.cell()
            .get_or_init(|| ContentEdition::from_yaml(self.source()))
            .as_ref()
            .map_err(Clone::clone)
    }
}

/// On-disk shape of an edition.
#[derive(Debug, Deserialize)]
struct EditionFile {
    name: String,
    subject: String,
    roster: Vec<Identity>,
    records: Vec<ContentRecord>,
}

/// Validated content table keyed by identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentEdition {
    name: String,
    subject: String,
    roster: Vec<Identity>,
    records: BTreeMap<Identity, ContentRecord>,
}

impl ContentEdition {
    /// Parse and validate an edition.
    ///
    /// Every roster identity must have exactly one record and no record may
    /// fall outside the roster.
    pub fn from_yaml(source: &str) -> Result<Self, ContentError> {
        let file: EditionFile = serde_yaml::from_str(source)?;
        Self::from_parts(file.name, file.subject, file.roster, file.records)
    }

    pub fn from_parts(
        name: impl Into<String>,
        subject: impl Into<String>,
        roster: Vec<Identity>,
        records: Vec<ContentRecord>,
    ) -> Result<Self, ContentError> {
        for (index, identity) in roster.iter().enumerate() {
            if roster[..index].contains(identity) {
                return Err(ContentError::DuplicateRoster(*identity));
            }
        }

        let mut keyed = BTreeMap::new();
        for record in records {
            let identity = record.identity;
            if !roster.contains(&identity) {
                return Err(ContentError::UnexpectedRecord(identity));
            }
            if matches!(record.body, ContentBody::Resume(_)) && identity != Identity::Resume {
                return Err(ContentError::MisplacedResumeBlock(identity));
            }
            if keyed.insert(identity, record).is_some() {
                return Err(ContentError::DuplicateRecord(identity));
            }
        }

        if let Some(missing) = roster.iter().find(|identity| !keyed.contains_key(identity)) {
            return Err(ContentError::MissingRecord(*missing));
        }

        Ok(Self {
            name: name.into(),
            subject: subject.into(),
            roster,
            records: keyed,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name shown in the headline greeting.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Identities offered by this edition, in headline order.
    pub fn roster(&self) -> &[Identity] {
        &self.roster
    }

    pub fn contains(&self, identity: Identity) -> bool {
        self.records.contains_key(&identity)
    }

    /// Pure read. `None` only for identities this edition leaves out.
    pub fn lookup(&self, identity: Identity) -> Option<&ContentRecord> {
        self.records.get(&identity)
    }
}
