//! The content registry: validated organizers, speakers and talk order.
//!
//! Built once from a [`ContentSource`] and read-only afterwards. Schema
//! problems abort construction; a dangling talk-order slug only fails the
//! operations that need the schedule, so the mappings stay inspectable.

use crate::config::DuplicatePolicy;
use crate::error::{Collection, RegistryError};
use crate::profile::{Link, ProfileMap, ProfileRecord};
use crate::schema::SourceBatch;
use crate::source::ContentSource;
use crate::warning::{ValidationWarning, WarningKind};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRegistry {
    organizers: ProfileMap,
    speakers: ProfileMap,
    talk_order: Vec<String>,
}

/// One slot of the resolved schedule, 1-based.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledTalk<'a> {
    pub position: usize,
    pub speaker: &'a ProfileRecord,
}

/// Snapshot handed to the rendering layer.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryExport<'a> {
    pub organizers: &'a ProfileMap,
    pub speakers: &'a ProfileMap,
    pub schedule: Vec<ScheduledTalk<'a>>,
}

impl ContentRegistry {
    pub fn from_source(source: &ContentSource) -> Result<Self, RegistryError> {
        let registry = ContentRegistry {
            organizers: source.load_organizers()?,
            speakers: source.load_speakers()?,
            talk_order: source.load_talk_order(),
        };
        info!(
            organizers = registry.organizers.len(),
            speakers = registry.speakers.len(),
            talks = registry.talk_order.len(),
            "content registry built"
        );
        Ok(registry)
    }

    pub fn from_batches<I>(batches: I, policy: DuplicatePolicy) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = SourceBatch>,
    {
        Self::from_source(&ContentSource::merge(batches, policy)?)
    }

    pub fn organizers(&self) -> &ProfileMap {
        &self.organizers
    }

    pub fn speakers(&self) -> &ProfileMap {
        &self.speakers
    }

    pub fn talk_order(&self) -> &[String] {
        &self.talk_order
    }

    /// Speaker records in talk order.
    ///
    /// The result has exactly one element per talk-order entry. Fails on the
    /// first slug with no speaker record.
    pub fn resolve_schedule(&self) -> Result<Vec<&ProfileRecord>, RegistryError> {
        self.talk_order
            .iter()
            .map(|slug| {
                self.speakers
                    .get(slug)
                    .ok_or_else(|| RegistryError::ReferentialIntegrity { slug: slug.clone() })
            })
            .collect()
    }

    pub fn export(&self) -> Result<RegistryExport<'_>, RegistryError> {
        let schedule = self
            .resolve_schedule()?
            .into_iter()
            .enumerate()
            .map(|(i, speaker)| ScheduledTalk {
                position: i + 1,
                speaker,
            })
            .collect();
        Ok(RegistryExport {
            organizers: &self.organizers,
            speakers: &self.speakers,
            schedule,
        })
    }

    /// Collect placeholder and consistency findings. Never fails.
    ///
    /// Order: organizers by slug, speakers by slug, then talk-order checks.
    pub fn validate(&self) -> Vec<ValidationWarning> {
        let mut out = Vec::new();
        let scheduled: BTreeSet<&str> = self.talk_order.iter().map(String::as_str).collect();

        for record in self.organizers.values() {
            record_warnings(Collection::Organizers, record, &mut out);
        }

        for record in self.speakers.values() {
            record_warnings(Collection::Speakers, record, &mut out);
            let warn = |kind| ValidationWarning::new(Collection::Speakers, &record.slug, kind);

            if let Some(abs) = &record.talk_abstract {
                if abs.is_pending() {
                    out.push(warn(WarningKind::PendingAbstract));
                }
            } else if scheduled.contains(record.slug.as_str()) {
                out.push(warn(WarningKind::MissingAbstract));
            }
            if !scheduled.contains(record.slug.as_str()) {
                out.push(warn(WarningKind::Unscheduled));
            }
            if let Some(org) = self.organizers.get(&record.slug) {
                for field in mismatched_fields(org, record) {
                    out.push(warn(WarningKind::RoleMismatch { field }));
                }
            }
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for slug in &self.talk_order {
            *counts.entry(slug.as_str()).or_default() += 1;
        }
        let mut reported = BTreeSet::new();
        for slug in &self.talk_order {
            let count = counts[slug.as_str()];
            if count > 1 && reported.insert(slug.as_str()) {
                out.push(ValidationWarning::new(
                    Collection::Speakers,
                    slug,
                    WarningKind::RepeatedInOrder { count },
                ));
            }
        }

        out
    }
}

fn record_warnings(collection: Collection, record: &ProfileRecord, out: &mut Vec<ValidationWarning>) {
    let warn = |kind| ValidationWarning::new(collection, &record.slug, kind);
    if record.tentative {
        out.push(warn(WarningKind::TentativeName));
    }
    if record.title.is_pending() {
        out.push(warn(WarningKind::PendingTitle));
    }
    if record.bio.as_ref().is_some_and(|b| b.is_pending()) {
        out.push(warn(WarningKind::PendingBio));
    }
    if record.linkedin == Link::Absent {
        out.push(warn(WarningKind::MissingLink));
    }
}

/// Fields that describe the person (not the role) and must agree.
fn mismatched_fields(organizer: &ProfileRecord, speaker: &ProfileRecord) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if organizer.name != speaker.name {
        fields.push("name");
    }
    if organizer.affiliation != speaker.affiliation {
        fields.push("affiliation");
    }
    if organizer.image != speaker.image {
        fields.push("image");
    }
    if organizer.linkedin != speaker.linkedin {
        fields.push("linkedin");
    }
    if organizer.bio != speaker.bio {
        fields.push("bio");
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Field;
    use crate::schema::RawProfile;
    use pretty_assertions::assert_eq;

    fn complete(name: &str, title: &str) -> RawProfile {
        RawProfile {
            image: Some(format!("images/{}.jpg", name.to_lowercase())),
            linkedin: Some(format!("https://www.linkedin.com/in/{}/", name.to_lowercase())),
            bio: Some(format!("{} does research.", name)),
            talk_abstract: Some(format!("{} talks about {}.", name, title)),
            ..RawProfile::new(name, title, "Somewhere")
        }
    }

    fn registry(batch: SourceBatch) -> ContentRegistry {
        ContentRegistry::from_batches([batch], DuplicatePolicy::Reject).unwrap()
    }

    #[test]
    fn schedule_follows_talk_order() {
        let reg = registry(
            SourceBatch::new("inline")
                .speaker("c", complete("C", "Gamma"))
                .speaker("a", complete("A", "Alpha"))
                .speaker("b", complete("B", "Beta"))
                .with_talk_order(["a", "b", "c"]),
        );
        let schedule = reg.resolve_schedule().unwrap();
        assert_eq!(schedule.len(), reg.talk_order().len());
        let slugs: Vec<&str> = schedule.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "c"]);
    }

    #[test]
    fn dangling_slug_fails_schedule_only() {
        let reg = registry(
            SourceBatch::new("inline")
                .speaker("a", complete("A", "Alpha"))
                .with_talk_order(["a", "missing-speaker"]),
        );
        assert_eq!(reg.speakers().len(), 1);
        assert_eq!(
            reg.resolve_schedule().unwrap_err(),
            RegistryError::ReferentialIntegrity {
                slug: "missing-speaker".into()
            }
        );
        assert!(reg.export().is_err());
    }

    #[test]
    fn pending_title_yields_exactly_one_warning() {
        let mut raw = complete("A", "Alpha");
        raw.title = Some("Title coming soon".into());
        let reg = registry(
            SourceBatch::new("inline")
                .speaker("a", raw)
                .with_talk_order(["a"]),
        );
        assert_eq!(reg.speakers()["a"].title, Field::Pending);

        let warnings = reg.validate();
        assert_eq!(
            warnings,
            vec![ValidationWarning::new(
                Collection::Speakers,
                "a",
                WarningKind::PendingTitle
            )]
        );
        assert_eq!(warnings[0].field(), Some("title"));
    }

    #[test]
    fn complete_lineup_has_no_warnings() {
        let reg = registry(
            SourceBatch::new("inline")
                .organizer("o", RawProfile {
                    talk_abstract: None,
                    ..complete("O", "Chair")
                })
                .speaker("a", complete("A", "Alpha"))
                .with_talk_order(["a"]),
        );
        assert!(reg.validate().is_empty(), "{:?}", reg.validate());
    }

    #[test]
    fn placeholder_and_order_warnings() {
        let mut pending = complete("B", "Beta");
        pending.bio = Some("Bio coming soon".into());
        pending.linkedin = Some("#".into());
        pending.talk_abstract = None;

        let reg = registry(
            SourceBatch::new("inline")
                .speaker("a", complete("A", "Alpha"))
                .speaker("b", pending)
                .speaker("c", complete("[C]", "Gamma"))
                .with_talk_order(["b", "a", "b"]),
        );
        let kinds: Vec<(String, WarningKind)> = reg
            .validate()
            .into_iter()
            .map(|w| (w.slug, w.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("b".to_string(), WarningKind::PendingBio),
                ("b".to_string(), WarningKind::MissingLink),
                ("b".to_string(), WarningKind::MissingAbstract),
                ("c".to_string(), WarningKind::TentativeName),
                ("c".to_string(), WarningKind::Unscheduled),
                ("b".to_string(), WarningKind::RepeatedInOrder { count: 2 }),
            ]
        );
        // Repeats still resolve, one slot each.
        assert_eq!(reg.resolve_schedule().unwrap().len(), 3);
    }

    #[test]
    fn organizer_and_speaker_records_disagree() {
        let mut organizer = complete("Lei", "PhD Student");
        organizer.talk_abstract = None;
        let mut speaker = complete("Lei", "Do Llamas understand the periodic table?");
        speaker.bio = Some("A different bio.".into());

        let reg = registry(
            SourceBatch::new("inline")
                .organizer("lei-ge", organizer)
                .speaker("lei-ge", speaker)
                .with_talk_order(["lei-ge"]),
        );
        assert_eq!(
            reg.validate(),
            vec![ValidationWarning::new(
                Collection::Speakers,
                "lei-ge",
                WarningKind::RoleMismatch { field: "bio" }
            )]
        );
    }

    #[test]
    fn export_numbers_the_schedule() {
        let reg = registry(
            SourceBatch::new("inline")
                .speaker("a", complete("A", "Alpha"))
                .speaker("b", complete("B", "Beta"))
                .with_talk_order(["b", "a"]),
        );
        let json = serde_json::to_value(reg.export().unwrap()).unwrap();
        assert_eq!(json["schedule"][0]["position"], 1);
        assert_eq!(json["schedule"][0]["speaker"]["slug"], "b");
        assert_eq!(json["schedule"][1]["speaker"]["title"]["state"], "given");
        assert_eq!(json["schedule"][1]["speaker"]["title"]["value"], "Alpha");
        assert_eq!(json["organizers"], serde_json::json!({}));
    }
}
