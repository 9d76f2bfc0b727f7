//! Schema layer: serde shapes of one input batch, exactly as authored.
//!
//! Nothing here enforces required fields; that is the loaders' job, so a
//! missing field surfaces as a schema error naming the slug instead of a
//! parser error pointing at a byte offset.

pub mod batch;
pub mod entries;

pub use batch::{RawProfile, SourceBatch};
pub use entries::SlugEntries;
