//! One input batch (a single JSON or TOML file).
//!
//! JSON shape:
//! {
//!   "organizers": { "lei-ge": { "name": "Lei Ge", "title": "PhD Student", ... } },
//!   "speakers":   { "lei-ge": { "name": "Lei Ge", "abstract": "...", ... } },
//!   "talk_order": ["hassan-sirelkhatim", "peter-coveney", ...]
//! }
//!
//! Every key is optional; a batch may carry only speakers, only the talk
//! order, and so on.

use crate::schema::SlugEntries;
use anyhow::Context;
use serde::Deserialize;

/// Raw profile shape as it appears in a batch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawProfile {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub affiliation: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub linkedin: Option<String>,

    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default, rename = "abstract")]
    pub talk_abstract: Option<String>,
}

impl RawProfile {
    /// A profile with the three required fields filled in.
    pub fn new(name: &str, title: &str, affiliation: &str) -> Self {
        RawProfile {
            name: Some(name.to_string()),
            title: Some(title.to_string()),
            affiliation: Some(affiliation.to_string()),
            ..RawProfile::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceBatch {
    /// Where the batch came from (file path or a caller-chosen label).
    #[serde(skip)]
    pub origin: String,

    #[serde(default)]
    pub organizers: SlugEntries,

    #[serde(default)]
    pub speakers: SlugEntries,

    #[serde(default, alias = "talkOrder")]
    pub talk_order: Option<Vec<String>>,
}

impl SourceBatch {
    pub fn new(origin: impl Into<String>) -> Self {
        SourceBatch {
            origin: origin.into(),
            ..SourceBatch::default()
        }
    }

    pub fn from_json_str(origin: &str, text: &str) -> anyhow::Result<Self> {
        let mut batch: SourceBatch =
            serde_json::from_str(text).with_context(|| format!("parse JSON batch {}", origin))?;
        batch.origin = origin.to_string();
        Ok(batch)
    }

    pub fn from_toml_str(origin: &str, text: &str) -> anyhow::Result<Self> {
        let mut batch: SourceBatch =
            toml::from_str(text).with_context(|| format!("parse TOML batch {}", origin))?;
        batch.origin = origin.to_string();
        Ok(batch)
    }

    pub fn organizer(mut self, slug: &str, profile: RawProfile) -> Self {
        self.organizers.push(slug, profile);
        self
    }

    pub fn speaker(mut self, slug: &str, profile: RawProfile) -> Self {
        self.speakers.push(slug, profile);
        self
    }

    pub fn with_talk_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.talk_order = Some(order.into_iter().map(Into::into).collect());
        self
    }
}
