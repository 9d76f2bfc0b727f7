//! Non-fatal findings about incomplete or inconsistent content.

use crate::error::Collection;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    PendingTitle,
    PendingBio,
    PendingAbstract,
    MissingLink,
    TentativeName,
    /// Scheduled speaker without any abstract.
    MissingAbstract,
    /// Speaker defined but absent from the talk order.
    Unscheduled,
    /// Slug listed more than once in the talk order.
    RepeatedInOrder { count: usize },
    /// Same slug is both organizer and speaker and the two records disagree.
    RoleMismatch { field: &'static str },
}

impl WarningKind {
    /// The record field this warning is about, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            WarningKind::PendingTitle => Some("title"),
            WarningKind::PendingBio => Some("bio"),
            WarningKind::PendingAbstract | WarningKind::MissingAbstract => Some("abstract"),
            WarningKind::MissingLink => Some("linkedin"),
            WarningKind::TentativeName => Some("name"),
            WarningKind::RoleMismatch { field } => Some(*field),
            WarningKind::Unscheduled | WarningKind::RepeatedInOrder { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub collection: Collection,
    pub slug: String,
    #[serde(flatten)]
    pub kind: WarningKind,
}

impl ValidationWarning {
    pub fn new(collection: Collection, slug: &str, kind: WarningKind) -> Self {
        ValidationWarning {
            collection,
            slug: slug.to_string(),
            kind,
        }
    }

    pub fn field(&self) -> Option<&'static str> {
        self.kind.field()
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}: ", self.collection, self.slug)?;
        match &self.kind {
            WarningKind::PendingTitle => f.write_str("title not announced yet"),
            WarningKind::PendingBio => f.write_str("bio not written yet"),
            WarningKind::PendingAbstract => f.write_str("abstract not written yet"),
            WarningKind::MissingLink => f.write_str("no linkedin link"),
            WarningKind::TentativeName => f.write_str("speaker not confirmed"),
            WarningKind::MissingAbstract => f.write_str("scheduled talk has no abstract"),
            WarningKind::Unscheduled => f.write_str("not in talk order"),
            WarningKind::RepeatedInOrder { count } => {
                write!(f, "appears {} times in talk order", count)
            }
            WarningKind::RoleMismatch { field } => {
                write!(f, "`{}` differs between organizer and speaker records", field)
            }
        }
    }
}
