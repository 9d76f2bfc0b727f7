//! Conference lineup registry: organizer and speaker profiles plus the talk
//! order, merged from authored batches and validated before publishing.

pub mod check;
pub mod config;
pub mod error;
pub mod profile;
pub mod registry;
pub mod schema;
pub mod source;
pub mod warning;

pub use check::{CheckReport, WarningGate, WarningsDenied, check};
pub use config::{ConfigError, DuplicatePolicy, RegistryConfig};
pub use error::{Collection, RegistryError};
pub use profile::{Field, Link, ProfileMap, ProfileRecord};
pub use registry::{ContentRegistry, RegistryExport, ScheduledTalk};
pub use schema::{RawProfile, SourceBatch};
pub use source::ContentSource;
pub use warning::{ValidationWarning, WarningKind};

pub type Result<T> = anyhow::Result<T>;
