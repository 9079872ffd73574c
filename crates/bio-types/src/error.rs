//! Content error types.

use crate::Identity;
use thiserror::Error;

/// Errors raised while loading or validating a content edition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// The edition source is not valid YAML for the edition schema.
    #[error("Invalid edition source: {0}")]
    Parse(String),

    /// A key does not name any identity.
    #[error("Unknown identity: '{0}'")]
    UnknownIdentity(String),

    /// The roster lists an identity twice.
    #[error("Duplicate roster entry: {0}")]
    DuplicateRoster(Identity),

    /// Two records are keyed by the same identity.
    #[error("Duplicate record for identity: {0}")]
    DuplicateRecord(Identity),

    /// A roster identity has no record.
    #[error("Missing record: roster lists '{0}' but no record is keyed by it")]
    MissingRecord(Identity),

    /// A record is keyed by an identity the roster does not list.
    #[error("Unexpected record: '{0}' is not on the edition roster")]
    UnexpectedRecord(Identity),

    /// Only the resume identity may carry the resume block.
    #[error("Resume block attached to '{0}' (only 'resume' may carry one)")]
    MisplacedResumeBlock(Identity),
}

impl From<serde_yaml::Error> for ContentError {
    fn from(err: serde_yaml::Error) -> Self {
        ContentError::Parse(err.to_string())
    }
}
