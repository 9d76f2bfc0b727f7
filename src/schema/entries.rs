//! Keyed record collections that remember authoring order and repeats.
//!
//! A plain `BTreeMap` keeps only the last of two identical keys in one
//! object. We read the object entry by entry instead and leave repeats to
//! the merge policy.

use crate::schema::RawProfile;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlugEntries(pub Vec<(String, RawProfile)>);

impl SlugEntries {
    pub fn push(&mut self, slug: impl Into<String>, profile: RawProfile) {
        self.0.push((slug.into(), profile));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawProfile)> {
        self.0.iter().map(|(slug, p)| (slug.as_str(), p))
    }
}

impl IntoIterator for SlugEntries {
    type Item = (String, RawProfile);
    type IntoIter = std::vec::IntoIter<(String, RawProfile)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de> Deserialize<'de> for SlugEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SlugEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of slug to profile record")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((slug, profile)) = map.next_entry::<String, RawProfile>()? {
                    out.push((slug, profile));
                }
                Ok(SlugEntries(out))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
