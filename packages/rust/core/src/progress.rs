//! Progress reporting seam between the pipelines and whatever displays them.

use crate::database::ToolDatabase;

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each search query, with the running count of unique tools.
    fn query_finished(&self, query: &str, found: usize, total_unique: usize);
    /// Called after a curated list has been fetched and scanned.
    fn list_extracted(&self, source: &str, candidates: usize, rejected: usize);
    /// Called periodically while star counts are being looked up.
    fn candidate_progress(&self, current: usize, total: usize, kept: usize);
    /// Called when the pipeline completes.
    fn done(&self, db: &ToolDatabase);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn query_finished(&self, _query: &str, _found: usize, _total_unique: usize) {}
    fn list_extracted(&self, _source: &str, _candidates: usize, _rejected: usize) {}
    fn candidate_progress(&self, _current: usize, _total: usize, _kept: usize) {}
    fn done(&self, _db: &ToolDatabase) {}
}
