//! Render composer
//!
//! Walks the grid index row by row and column by column and assembles the
//! scene tree for the whole waterfall: toolbar, version headers, then one
//! row per build variant. Composition only reads the grid, so recomposing
//! after a collapse toggle is a plain second call.

use crate::cell::{CellPlan, StatusFilter};
use crate::data::Task;
use crate::grid::GridIndex;
use crate::header::{classify, CommitSummary, VersionHeader};
use crate::links::{build_variant_link, task_link};
use crate::scene::{Element, Node};
use crate::status::StatusSegment;
use crate::time::DisplayZone;
use tracing::debug;

/// Id of the collapsed-view checkbox in the toolbar
pub const COLLAPSE_TOGGLE_ID: &str = "collapsed-builds";

/// Inputs of a composition besides the grid itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Collapsed view flag, toggled by the toolbar checkbox
    pub collapsed: bool,
    /// Project identifier used in build variant links
    pub project: String,
    /// Statuses listed individually in the collapsed view
    pub status_filter: StatusFilter,
    /// Zone for header timestamps
    pub zone: DisplayZone,
}

impl ViewOptions {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            collapsed: false,
            project: project.into(),
            status_filter: StatusFilter::default(),
            zone: DisplayZone::default(),
        }
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn with_status_filter(mut self, status_filter: StatusFilter) -> Self {
        self.status_filter = status_filter;
        self
    }

    pub fn with_zone(mut self, zone: DisplayZone) -> Self {
        self.zone = zone;
        self
    }
}

/// Compose the full waterfall scene
pub fn compose(grid: &GridIndex, options: &ViewOptions) -> Node {
    debug!(
        "Composing {}x{} waterfall (collapsed: {})",
        grid.variant_count(),
        grid.version_count(),
        options.collapsed
    );

    Element::new("div")
        .class("waterfall")
        .child(toolbar(options.collapsed))
        .child(headers(grid, &options.zone))
        .child(variant_rows(grid, options))
        .into()
}

fn toolbar(collapsed: bool) -> Element {
    let mut checkbox = Element::new("input")
        .class("checkbox")
        .prop("id", COLLAPSE_TOGGLE_ID)
        .prop("type", "checkbox")
        .prop("style", "display:inline");
    if collapsed {
        checkbox = checkbox.prop("checked", "checked");
    }

    Element::new("div").class("waterfall-toolbar").child(
        Element::new("label")
            .prop("style", "display:inline-block")
            .child(
                Element::new("span")
                    .prop("style", "font-weight:normal")
                    .text("Show Collapsed View "),
            )
            .child(checkbox),
    )
}

fn headers(grid: &GridIndex, zone: &DisplayZone) -> Element {
    Element::new("div")
        .class("row version-header")
        .child(
            Element::new("div")
                .class("variant-col col-xs-2 version-header-full text-right")
                .text("Variant"),
        )
        .children(
            grid.versions()
                .iter()
                .map(|version| version_header(&classify(version, zone)).into()),
        )
        .child(Element::new("br"))
}

fn version_header(header: &VersionHeader) -> Element {
    let content = match header {
        VersionHeader::Standalone(commit) => Element::new("div")
            .class("version-header-expanded")
            .child(
                Element::new("div")
                    .child(
                        Element::new("span")
                            .class("btn btn-default btn-hash history-item-revision")
                            .child(Element::new("a").prop("href", &commit.link).text(&commit.revision)),
                    )
                    .text(&commit.time),
            )
            .text(&commit.author)
            .text(" - ")
            .text(&commit.message),
        VersionHeader::RolledUp { label, members } => Element::new("OverlayTrigger")
            .prop("trigger", "click")
            .prop("placement", "bottom")
            .child(
                Element::new("Button")
                    .class("rolled-up-button")
                    .child(Element::new("a").prop("href", "#").text(label)),
            )
            .child(
                Element::new("Popover")
                    .prop("id", "popover-positioned-bottom")
                    .children(members.iter().map(|member| rolled_up_member(member).into())),
            ),
    };

    Element::new("div").class("col-xs-2").child(content)
}

fn rolled_up_member(commit: &CommitSummary) -> Element {
    Element::new("div")
        .class("rolled-up-version-summary")
        .child(
            Element::new("span")
                .class("version-header-time")
                .text(&commit.time),
        )
        .child(Element::new("br"))
        .child(Element::new("a").prop("href", &commit.link).text(&commit.revision))
        .text(" - ")
        .child(Element::new("strong").text(&commit.author))
        .child(Element::new("br"))
        .text(&commit.message)
        .child(Element::new("br"))
}

fn variant_rows(grid: &GridIndex, options: &ViewOptions) -> Element {
    Element::new("div")
        .class("waterfall-grid")
        .children((0..grid.variant_count()).map(|row| variant_row(grid, row, options).into()))
}

fn variant_row(grid: &GridIndex, row: usize, options: &ViewOptions) -> Element {
    let name = &grid.build_variants()[row];
    let label: Node = match grid.variant_id(row) {
        Some(id) => Element::new("a")
            .prop("href", build_variant_link(&options.project, id))
            .text(name)
            .into(),
        None => Node::text(name),
    };

    let cells = (0..grid.version_count()).map(|column| {
        let plan = CellPlan::for_coordinate(
            grid,
            column,
            row,
            options.collapsed,
            &options.status_filter,
        );
        Node::from(build_cell(&plan))
    });

    Element::new("div")
        .class("row variant-row")
        .child(
            Element::new("div")
                .class("col-xs-2 build-variant-name distro-col")
                .child(label),
        )
        .child(
            Element::new("div")
                .class("col-xs-10")
                .child(Element::new("div").class("row build-cols").children(cells)),
        )
}

fn build_cell(plan: &CellPlan<'_>) -> Element {
    match plan {
        CellPlan::Inactive => Element::new("div")
            .class("inactive-build")
            .text(" inactive build "),
        CellPlan::ActiveExpanded { tasks } => Element::new("div")
            .class("build")
            .child(active_build(tasks.iter())),
        CellPlan::ActiveCollapsed {
            failing,
            summary,
            total,
        } => Element::new("div")
            .class("build")
            .child(active_build(failing.iter().copied()))
            .child(collapsed_bar(summary, *total)),
    }
}

fn active_build<'a>(tasks: impl Iterator<Item = &'a Task>) -> Element {
    Element::new("div")
        .class("active-build")
        .children(tasks.map(|task| task_box(task).into()))
}

fn task_box(task: &Task) -> Element {
    Element::new("div").class("waterfall-box").child(
        Element::new("a")
            .prop("href", task_link(&task.id))
            .class(format!("task-result {}", task.status))
            .prop("title", format!("{} - {}", task.display_name, task.status)),
    )
}

fn collapsed_bar(summary: &[StatusSegment], total: usize) -> Element {
    Element::new("div")
        .class("collapsed-bar")
        .children(summary.iter().map(|segment| task_summary(segment, total).into()))
}

fn task_summary(segment: &StatusSegment, total: usize) -> Element {
    let mut element = Element::new("div").class(format!("{} task-summary", segment.label()));
    if total > 0 {
        let width = (f64::from(segment.count) * 100.0 / total as f64).min(100.0);
        element = element.prop("style", format!("width:{:.2}%", width));
    }
    element.text(format!("+{}", segment.count))
}
