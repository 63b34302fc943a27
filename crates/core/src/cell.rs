//! Build cell model
//!
//! Decides what a single grid cell shows. Rolled-up columns are inactive.
//! Active cells list every task, or in the collapsed view list only the
//! tasks matching the status filter above a bar of status counts.

use crate::data::{Task, Version};
use crate::error::{Error, Result};
use crate::grid::GridIndex;
use crate::status::{summarize, StatusSegment};

/// Task statuses shown individually in the collapsed view
///
/// Matching is exact against the configured strings; no status spelling is
/// normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFilter {
    statuses: Vec<String>,
}

impl Default for StatusFilter {
    fn default() -> Self {
        Self::new(["failed", "system-failed"])
    }
}

impl StatusFilter {
    pub fn new<I, S>(statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            statuses: statuses.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma-separated status list (e.g. "failed,system-failed")
    pub fn parse(list: &str) -> Result<Self> {
        let statuses: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        if statuses.is_empty() {
            return Err(Error::ConfigError(format!(
                "Status filter must name at least one status: '{}'",
                list
            )));
        }

        Ok(Self { statuses })
    }

    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }

    pub fn matches(&self, status: &str) -> bool {
        self.statuses.iter().any(|s| s == status)
    }

    /// Tasks whose status is in the filter, in their original order
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(&task.status)).collect()
    }
}

/// What one cell of the grid renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellPlan<'a> {
    /// The column is a rolled-up version; no task data is shown
    Inactive,
    /// Every task of the build
    ActiveExpanded { tasks: &'a [Task] },
    /// Filtered tasks inline, plus the status bar of the whole build
    ActiveCollapsed {
        failing: Vec<&'a Task>,
        summary: Vec<StatusSegment>,
        /// Task count of the unfiltered build, the bar's full width
        total: usize,
    },
}

impl<'a> CellPlan<'a> {
    /// Plan the cell at a grid coordinate
    ///
    /// The build is only resolved for standalone columns.
    pub fn for_coordinate(
        grid: &'a GridIndex,
        version_index: usize,
        variant_index: usize,
        collapsed: bool,
        filter: &StatusFilter,
    ) -> Self {
        match grid.version(version_index) {
            Version::RolledUp { .. } => CellPlan::Inactive,
            Version::Standalone { .. } => {
                let build = grid.resolve(version_index, variant_index);
                if collapsed {
                    CellPlan::ActiveCollapsed {
                        failing: filter.apply(&build.tasks),
                        summary: summarize(build),
                        total: build.tasks.len(),
                    }
                } else {
                    CellPlan::ActiveExpanded {
                        tasks: &build.tasks,
                    }
                }
            }
        }
    }
}
