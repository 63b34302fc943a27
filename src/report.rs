//! Plain-text waterfall report
//!
//! Prints the collapsed view of every cell as markdown: one section per build
//! variant, one line per version.

use waterfall_core::{
    classify, CellPlan, DisplayZone, GridIndex, StatusFilter, StatusSegment, Task, VersionHeader,
};

/// Generate the report for a normalized grid
pub fn summary(grid: &GridIndex, filter: &StatusFilter, zone: &DisplayZone) -> String {
    if grid.variant_count() == 0 || grid.version_count() == 0 {
        return "No builds to report.".to_string();
    }

    let columns: Vec<String> = grid
        .versions()
        .iter()
        .map(|version| column_label(&classify(version, zone)))
        .collect();

    let mut lines = Vec::new();

    for (row, name) in grid.build_variants().iter().enumerate() {
        lines.push(format!("## {}\n", name));

        for (column, label) in columns.iter().enumerate() {
            let cell = match CellPlan::for_coordinate(grid, column, row, true, filter) {
                CellPlan::Inactive => "inactive build".to_string(),
                CellPlan::ActiveExpanded { .. } => unreachable!("collapsed plans only"),
                CellPlan::ActiveCollapsed {
                    failing,
                    summary,
                    total,
                } => collapsed_line(&failing, &summary, total),
            };
            lines.push(format!("- {}: {}", label, cell));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn column_label(header: &VersionHeader) -> String {
    match header {
        VersionHeader::Standalone(commit) => format!("{} {}", commit.revision, commit.time),
        VersionHeader::RolledUp { label, .. } => label.clone(),
    }
}

fn collapsed_line(failing: &[&Task], summary: &[StatusSegment], total: usize) -> String {
    if total == 0 && summary.is_empty() {
        return "no tasks".to_string();
    }

    let bar = if summary.is_empty() {
        "-".to_string()
    } else {
        summary
            .iter()
            .map(|segment| format!("{} +{}", segment.label(), segment.count))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut line = format!("{} of {} tasks", bar, total);
    if !failing.is_empty() {
        let names: Vec<String> = failing
            .iter()
            .map(|task| format!("{} ({})", task.display_name, task.status))
            .collect();
        line.push_str(&format!("; failing: {}", names.join(", ")));
    }
    line
}
