//! Strict profile records shared by organizers and speakers.

use crate::error::{Collection, RegistryError};
use crate::schema::RawProfile;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Validated records keyed by slug.
pub type ProfileMap = BTreeMap<String, ProfileRecord>;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

// "Title coming soon", "Full bio coming soon.", "Title: coming soon", "TBA", ...
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:(?:.*[\s:])?coming\s+soon[.!]*|(?:tba|tbc|tbd)\.?)\s*$")
        .expect("valid placeholder regex")
});

// "[Jane Doe]", "Jane Doe (TBC)", "Jane Doe, tentative"
static TENTATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\[.+\]\s*$|\b(?:tba|tbc|tbd|tentative)\b")
        .expect("valid tentative regex")
});

/// A text value that is either known or explicitly not announced yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum Field<T> {
    Given(T),
    Pending,
}

impl<T> Field<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Field::Pending)
    }

    pub fn given(&self) -> Option<&T> {
        match self {
            Field::Given(v) => Some(v),
            Field::Pending => None,
        }
    }
}

impl Field<String> {
    /// Parse authored text, turning placeholder sentinels into `Pending`.
    pub fn parse(text: &str) -> Self {
        if PLACEHOLDER_RE.is_match(text) {
            Field::Pending
        } else {
            Field::Given(text.trim().to_string())
        }
    }
}

/// Profile link. `"#"` in the source means there is none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Link {
    Url(String),
    Absent,
}

impl Link {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("#") => Link::Absent,
            Some(url) => Link::Url(url.to_string()),
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Link::Url(u) => Some(u),
            Link::Absent => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    pub slug: String,
    pub name: String,
    /// The name carries a "not confirmed yet" marker.
    pub tentative: bool,
    /// Talk title for speakers, role for organizers.
    pub title: Field<String>,
    pub affiliation: String,
    /// Asset path or URL; never checked for existence.
    pub image: Option<String>,
    pub linkedin: Link,
    pub bio: Option<Field<String>>,
    #[serde(rename = "abstract")]
    pub talk_abstract: Option<Field<String>>,
}

impl ProfileRecord {
    /// Validate one raw entry of `collection`.
    ///
    /// Fails on an invalid slug, a missing or blank `name`, `title` or
    /// `affiliation`, and on an organizer that carries an abstract.
    pub fn from_raw(
        collection: Collection,
        slug: &str,
        raw: &RawProfile,
    ) -> Result<Self, RegistryError> {
        if !SLUG_RE.is_match(slug) {
            return Err(RegistryError::schema(
                collection,
                slug,
                "slug",
                "must be lowercase kebab-case",
            ));
        }

        let name = required(collection, slug, "name", raw.name.as_deref())?;
        let title = required(collection, slug, "title", raw.title.as_deref())?;
        let affiliation = required(collection, slug, "affiliation", raw.affiliation.as_deref())?;

        if collection == Collection::Organizers && raw.talk_abstract.is_some() {
            return Err(RegistryError::schema(
                collection,
                slug,
                "abstract",
                "is only allowed on speakers",
            ));
        }

        Ok(ProfileRecord {
            slug: slug.to_string(),
            tentative: TENTATIVE_RE.is_match(&name),
            name,
            title: Field::parse(&title),
            affiliation,
            image: optional(raw.image.as_deref()).map(str::to_string),
            linkedin: Link::parse(raw.linkedin.as_deref()),
            bio: optional(raw.bio.as_deref()).map(Field::parse),
            talk_abstract: optional(raw.talk_abstract.as_deref()).map(Field::parse),
        })
    }
}

fn required(
    collection: Collection,
    slug: &str,
    field: &'static str,
    value: Option<&str>,
) -> Result<String, RegistryError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        Some(_) => Err(RegistryError::schema(collection, slug, field, "is blank")),
        None => Err(RegistryError::schema(collection, slug, field, "is missing")),
    }
}

fn optional(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
