//! Merging input batches into one content source.
//!
//! Batches are folded in the order given. Each collection keeps the first
//! position a slug was seen at, so authoring order survives a `last_wins`
//! override.

use crate::config::DuplicatePolicy;
use crate::error::{Collection, RegistryError};
use crate::profile::{ProfileMap, ProfileRecord};
use crate::schema::{RawProfile, SourceBatch};
use anyhow::{Context, bail};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
struct Entry {
    origin: String,
    profile: RawProfile,
}

/// Raw records of every batch, merged but not yet schema-checked.
#[derive(Debug, Clone, Default)]
pub struct ContentSource {
    organizers: Vec<(String, Entry)>,
    speakers: Vec<(String, Entry)>,
    talk_order: Option<(String, Vec<String>)>,
}

impl ContentSource {
    /// Read one `.json` or `.toml` batch from disk.
    pub fn read_batch(path: &Path) -> anyhow::Result<SourceBatch> {
        let origin = path.display().to_string();
        let text = fs::read_to_string(path).with_context(|| format!("read source {}", origin))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => SourceBatch::from_json_str(&origin, &text),
            Some("toml") => SourceBatch::from_toml_str(&origin, &text),
            _ => bail!("unsupported source format (expected .json or .toml): {}", origin),
        }
    }

    /// Read every path in order and merge them.
    pub fn read_all<P: AsRef<Path>>(
        paths: &[P],
        policy: DuplicatePolicy,
    ) -> anyhow::Result<ContentSource> {
        let mut batches = Vec::with_capacity(paths.len());
        for path in paths {
            batches.push(Self::read_batch(path.as_ref())?);
        }
        Ok(Self::merge(batches, policy)?)
    }

    pub fn merge<I>(batches: I, policy: DuplicatePolicy) -> Result<ContentSource, RegistryError>
    where
        I: IntoIterator<Item = SourceBatch>,
    {
        let mut out = ContentSource::default();
        for batch in batches {
            debug!(
                origin = %batch.origin,
                organizers = batch.organizers.len(),
                speakers = batch.speakers.len(),
                talk_order = batch.talk_order.is_some(),
                "merging batch"
            );
            if batch.organizers.is_empty() && batch.speakers.is_empty() && batch.talk_order.is_none() {
                warn!(origin = %batch.origin, "batch declares no content");
            }
            for (slug, profile) in batch.organizers {
                let entry = Entry {
                    origin: batch.origin.clone(),
                    profile,
                };
                insert(&mut out.organizers, Collection::Organizers, slug, entry, policy)?;
            }
            for (slug, profile) in batch.speakers {
                let entry = Entry {
                    origin: batch.origin.clone(),
                    profile,
                };
                insert(&mut out.speakers, Collection::Speakers, slug, entry, policy)?;
            }
            if let Some(order) = batch.talk_order {
                if let Some((first, _)) = &out.talk_order {
                    match policy {
                        DuplicatePolicy::Reject => {
                            return Err(RegistryError::DuplicateTalkOrder {
                                first: first.clone(),
                                second: batch.origin.clone(),
                            });
                        }
                        DuplicatePolicy::LastWins => {
                            warn!(first = %first, second = %batch.origin, "talk order overridden");
                        }
                    }
                }
                out.talk_order = Some((batch.origin.clone(), order));
            }
        }
        Ok(out)
    }

    pub fn load_organizers(&self) -> Result<ProfileMap, RegistryError> {
        load(&self.organizers, Collection::Organizers)
    }

    pub fn load_speakers(&self) -> Result<ProfileMap, RegistryError> {
        load(&self.speakers, Collection::Speakers)
    }

    /// The merged talk order; empty when no batch declared one.
    pub fn load_talk_order(&self) -> Vec<String> {
        self.talk_order
            .as_ref()
            .map(|(_, order)| order.clone())
            .unwrap_or_default()
    }
}

fn insert(
    entries: &mut Vec<(String, Entry)>,
    collection: Collection,
    slug: String,
    entry: Entry,
    policy: DuplicatePolicy,
) -> Result<(), RegistryError> {
    let Some(pos) = entries.iter().position(|(s, _)| *s == slug) else {
        entries.push((slug, entry));
        return Ok(());
    };
    let first = &entries[pos].1.origin;
    match policy {
        DuplicatePolicy::Reject => Err(RegistryError::DuplicateSlug {
            collection,
            slug,
            first: first.clone(),
            second: entry.origin,
        }),
        DuplicatePolicy::LastWins => {
            warn!(
                %collection,
                slug = %slug,
                first = %first,
                second = %entry.origin,
                "record overridden"
            );
            entries[pos].1 = entry;
            Ok(())
        }
    }
}

fn load(entries: &[(String, Entry)], collection: Collection) -> Result<ProfileMap, RegistryError> {
    let mut out = BTreeMap::new();
    for (slug, entry) in entries {
        let record = ProfileRecord::from_raw(collection, slug, &entry.profile)?;
        out.insert(slug.clone(), record);
    }
    Ok(out)
}
