//! Fatal errors raised while merging sources or building the registry.

use std::fmt;
use thiserror::Error;

/// The two keyed mappings a record can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Organizers,
    Speakers,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Organizers => f.write_str("organizers"),
            Collection::Speakers => f.write_str("speakers"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A record is missing a required field or carries a malformed one.
    #[error("schema error in {collection}/{slug}: field `{field}` {reason}")]
    Schema {
        collection: Collection,
        slug: String,
        field: &'static str,
        reason: String,
    },

    /// The talk order names a speaker that does not exist.
    #[error("talk order references unknown speaker `{slug}`")]
    ReferentialIntegrity { slug: String },

    #[error("duplicate slug `{slug}` in {collection}: first defined in {first}, again in {second}")]
    DuplicateSlug {
        collection: Collection,
        slug: String,
        first: String,
        second: String,
    },

    #[error("talk order declared twice: first in {first}, again in {second}")]
    DuplicateTalkOrder { first: String, second: String },
}

impl RegistryError {
    pub(crate) fn schema(
        collection: Collection,
        slug: &str,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        RegistryError::Schema {
            collection,
            slug: slug.to_string(),
            field,
            reason: reason.into(),
        }
    }
}
