//! Publishing gate: resolve the schedule, collect warnings, decide pass/fail.

use crate::registry::ContentRegistry;
use crate::error::RegistryError;
use crate::warning::ValidationWarning;
use thiserror::Error;

/// Where warnings may be denied from. Either switch is enough.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarningGate {
    /// `--deny-warnings` on the command line.
    pub cli: bool,
    /// `deny_warnings` in the manifest.
    pub manifest: bool,
}

impl WarningGate {
    pub fn denies(&self) -> bool {
        self.cli || self.manifest
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{count} warning(s) reported and warnings are denied")]
pub struct WarningsDenied {
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct CheckReport {
    pub organizers: usize,
    pub speakers: usize,
    pub talks: usize,
    pub warnings: Vec<ValidationWarning>,
}

impl CheckReport {
    pub fn verdict(&self, gate: WarningGate) -> Result<(), WarningsDenied> {
        if gate.denies() && !self.warnings.is_empty() {
            return Err(WarningsDenied {
                count: self.warnings.len(),
            });
        }
        Ok(())
    }
}

/// Fails only on a dangling talk-order slug; warnings are left to `verdict`.
pub fn check(registry: &ContentRegistry) -> Result<CheckReport, RegistryError> {
    let talks = registry.resolve_schedule()?.len();
    Ok(CheckReport {
        organizers: registry.organizers().len(),
        speakers: registry.speakers().len(),
        talks,
        warnings: registry.validate(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicatePolicy;
    use crate::schema::{RawProfile, SourceBatch};
    use pretty_assertions::assert_eq;

    fn report(title: &str) -> CheckReport {
        let raw = RawProfile {
            linkedin: Some("https://www.linkedin.com/in/jamesgin/".into()),
            talk_abstract: Some("Orb, diffusion models and LLM agents.".into()),
            ..RawProfile::new("James Gin-Pollock", title, "Orbital Materials")
        };
        let batch = SourceBatch::new("inline")
            .speaker("james-gin", raw)
            .with_talk_order(["james-gin"]);
        let registry = ContentRegistry::from_batches([batch], DuplicatePolicy::Reject).unwrap();
        check(&registry).unwrap()
    }

    #[test]
    fn manifest_flag_denies_warnings() {
        let report = report("Title coming soon");
        let gate = WarningGate {
            cli: false,
            manifest: true,
        };
        assert_eq!(report.verdict(gate), Err(WarningsDenied { count: 1 }));
    }

    #[test]
    fn cli_flag_denies_warnings() {
        let report = report("Talk title coming soon");
        let gate = WarningGate {
            cli: true,
            manifest: false,
        };
        assert_eq!(report.verdict(gate), Err(WarningsDenied { count: 1 }));
    }

    #[test]
    fn warnings_pass_when_not_denied() {
        let report = report("Title coming soon");
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.verdict(WarningGate::default()), Ok(()));
    }

    #[test]
    fn clean_lineup_passes_a_strict_gate() {
        let report = report("Generate, Simulate, Reason");
        assert_eq!(report.talks, 1);
        assert!(report.warnings.is_empty());
        let gate = WarningGate {
            cli: true,
            manifest: true,
        };
        assert_eq!(report.verdict(gate), Ok(()));
    }

    #[test]
    fn dangling_slug_fails_before_the_gate() {
        let batch = SourceBatch::new("inline").with_talk_order(["missing-speaker"]);
        let registry = ContentRegistry::from_batches([batch], DuplicatePolicy::Reject).unwrap();
        assert_eq!(
            check(&registry).unwrap_err(),
            RegistryError::ReferentialIntegrity {
                slug: "missing-speaker".into()
            }
        );
    }
}
