//! Core pipelines and domain logic for tooldb.
//!
//! Two independent pipelines produce the same artifact, a ranked JSON
//! [`ToolDatabase`]:
//! - [`search`]: fixed GitHub search queries
//! - [`lists`]: curated "awesome list" markdown documents
//!
//! Both are best-effort. Failures of individual queries, lists or lookups are
//! logged and skipped, and a database is always produced.

pub mod database;
pub mod lists;
pub mod progress;
pub mod rank;
pub mod search;
pub mod tags;

#[cfg(test)]
mod testing;

pub use database::{DatabaseMetadata, PipelineKind, ToolDatabase, write_database};
pub use lists::run_lists_pipeline;
pub use progress::{ProgressReporter, SilentProgress};
pub use search::run_search_pipeline;
pub use tags::generate_tags;
