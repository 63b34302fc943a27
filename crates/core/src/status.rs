//! Status aggregation for the collapsed view
//!
//! A collapsed build shows a bar of colored segments, one per tracked status
//! category with at least one task. Segment order is fixed and matches the
//! left-to-right order of the bar.

use crate::data::{Build, TaskStatusCount};
use serde::Serialize;

/// Status categories counted by the server, in bar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusCategory {
    Success,
    Dispatched,
    SystemFailed,
    Undispatched,
    Inactive,
}

impl StatusCategory {
    /// All categories in display order
    pub const ALL: [StatusCategory; 5] = [
        StatusCategory::Success,
        StatusCategory::Dispatched,
        StatusCategory::SystemFailed,
        StatusCategory::Undispatched,
        StatusCategory::Inactive,
    ];

    /// CSS/status label of the category
    pub fn label(&self) -> &'static str {
        match self {
            StatusCategory::Success => "success",
            StatusCategory::Dispatched => "dispatched",
            StatusCategory::SystemFailed => "system-failed",
            StatusCategory::Undispatched => "undispatched",
            StatusCategory::Inactive => "inactive",
        }
    }

    /// Count for this category in the server tally
    pub fn count_in(&self, counts: &TaskStatusCount) -> u32 {
        match self {
            StatusCategory::Success => counts.succeeded,
            StatusCategory::Dispatched => counts.started,
            StatusCategory::SystemFailed => counts.timed_out,
            StatusCategory::Undispatched => counts.undispatched,
            StatusCategory::Inactive => counts.inactive,
        }
    }
}

/// One segment of a collapsed status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusSegment {
    pub status: StatusCategory,
    pub count: u32,
}

impl StatusSegment {
    pub fn label(&self) -> &'static str {
        self.status.label()
    }
}

/// Summarize a build's task counts into bar segments
///
/// Categories with zero tasks are dropped. Tasks whose status falls outside
/// the five tracked categories are not represented, so the segment counts may
/// add up to less than the build's task count.
pub fn summarize(build: &Build) -> Vec<StatusSegment> {
    summarize_counts(&build.status_count)
}

pub fn summarize_counts(counts: &TaskStatusCount) -> Vec<StatusSegment> {
    StatusCategory::ALL
        .iter()
        .map(|&status| StatusSegment {
            status,
            count: status.count_in(counts),
        })
        .filter(|segment| segment.count > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{build_with_counts, counts, task};
    use pretty_assertions::assert_eq;

    fn labels(segments: &[StatusSegment]) -> Vec<(&'static str, u32)> {
        segments.iter().map(|s| (s.label(), s.count)).collect()
    }

    #[test]
    fn test_summarize_drops_zero_counts() {
        let build = build_with_counts("A", vec![], counts(5, 0, 2, 0, 0));
        assert_eq!(
            labels(&summarize(&build)),
            vec![("success", 5), ("system-failed", 2)]
        );
    }

    #[test]
    fn test_summarize_all_zero_is_empty() {
        let build = build_with_counts("A", vec![task("t1", "success")], counts(0, 0, 0, 0, 0));
        assert!(summarize(&build).is_empty());
    }

    #[test]
    fn test_summarize_canonical_order() {
        let segments = summarize_counts(&counts(1, 2, 3, 4, 5));
        assert_eq!(
            labels(&segments),
            vec![
                ("success", 1),
                ("dispatched", 2),
                ("system-failed", 3),
                ("undispatched", 4),
                ("inactive", 5),
            ]
        );
    }

    #[test]
    fn test_summarize_never_exceeds_total() {
        let tasks = vec![
            task("t1", "success"),
            task("t2", "success"),
            task("t3", "failed"),
        ];
        // "failed" is not one of the tracked categories
        let build = build_with_counts("A", tasks, counts(2, 0, 0, 0, 0));
        let sum: u32 = summarize(&build).iter().map(|s| s.count).sum();
        assert_eq!(sum, 2);
        assert!(sum as usize <= build.tasks.len());
    }

    #[test]
    fn test_category_serializes_as_label() {
        for category in StatusCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
    }
}
