//! waterfall-core - Grid model and view composition for the waterfall page
//!
//! This crate contains WASM-compatible code shared between the CLI and any
//! other rendering surface.
//!
//! # Features
//!
//! - Parse the server payload (versions, rolled-up groups, builds, tasks)
//! - Normalize it into a validated grid index
//! - Classify version headers and plan each build cell
//! - Aggregate task statuses for the collapsed view
//! - Compose a renderer-independent scene tree

pub mod cell;
pub mod compose;
pub mod data;
pub mod error;
pub mod grid;
pub mod header;
pub mod links;
pub mod normalize;
pub mod scene;
pub mod status;
pub mod time;

#[cfg(test)]
pub(crate) mod testing;

pub use cell::{CellPlan, StatusFilter};
pub use compose::{compose, ViewOptions, COLLAPSE_TOGGLE_ID};
pub use data::{Build, BuildVariant, Commit, Payload, RawVersion, Task, TaskStatusCount, Version};
pub use error::{Error, Result};
pub use grid::GridIndex;
pub use header::{classify, CommitSummary, VersionHeader};
pub use normalize::normalize;
pub use scene::{Element, Node};
pub use status::{summarize, StatusCategory, StatusSegment};
pub use time::{DisplayZone, Timestamp};
