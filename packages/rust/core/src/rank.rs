//! Ordering and truncation shared by both pipelines.

use tooldb_shared::Tool;

/// Sort by stars, highest first, and keep at most `max` tools.
///
/// The sort is stable: tools with equal stars keep their insertion order.
pub fn rank_and_truncate(tools: &mut Vec<Tool>, max: usize) {
    tools.sort_by(|a, b| b.stars.cmp(&a.stars));
    tools.truncate(max);
}
