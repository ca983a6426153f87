//! Moderation state and thread position of a comment.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::domain::foundation::{CommentId, ValidationError};

/// Moderation state of a comment.
///
/// Deletion is not a state: it is a tombstone overlay tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentState {
    Unapproved,
    Approved,
    Flagged,
}

impl CommentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentState::Unapproved => "unapproved",
            CommentState::Approved => "approved",
            CommentState::Flagged => "flagged",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "unapproved" => Ok(CommentState::Unapproved),
            "approved" => Ok(CommentState::Approved),
            "flagged" => Ok(CommentState::Flagged),
            other => Err(ValidationError::invalid_format(
                "state",
                format!("unknown comment state '{}'", other),
            )),
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, CommentState::Approved)
    }
}

impl fmt::Display for CommentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire value of a top-level comment's parent.
pub const ROOT_PARENT: &str = "root";

/// Position of a comment in its thread.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ParentRef {
    #[default]
    Root,
    Comment(CommentId),
}

impl ParentRef {
    /// Parses the wire form: `"root"` or a comment identifier.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if value == ROOT_PARENT {
            return Ok(ParentRef::Root);
        }
        CommentId::new(value)
            .map(ParentRef::Comment)
            .map_err(|_| ValidationError::empty_field("parent_id"))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ParentRef::Root => ROOT_PARENT,
            ParentRef::Comment(id) => id.as_str(),
        }
    }

    pub fn comment_id(&self) -> Option<&CommentId> {
        match self {
            ParentRef::Root => None,
            ParentRef::Comment(id) => Some(id),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, ParentRef::Root)
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ParentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ParentRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ParentRef::parse(&raw).map_err(serde::de::Error::custom)
    }
}
