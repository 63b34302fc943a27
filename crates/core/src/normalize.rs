//! Payload normalization
//!
//! Runs once at load. Sorts every standalone version's builds and the
//! variant row list by display name, records the last standalone version as
//! the anchor for row links, and binds the result into a [`GridIndex`].

use crate::data::{Build, Payload, Version};
use crate::error::Result;
use crate::grid::GridIndex;
use tracing::debug;

/// Normalize a payload into a grid index
///
/// Rolled-up versions keep their builds as delivered: they are rendered as a
/// single inactive column and never resolved per row.
pub fn normalize(payload: Payload) -> Result<GridIndex> {
    let Payload {
        versions,
        mut build_variants,
    } = payload;

    let mut anchor = None;
    let mut normalized = Vec::with_capacity(versions.len());

    for (index, mut raw) in versions.into_iter().enumerate() {
        if !raw.rolled_up {
            anchor = Some(index);
            sort_builds(&mut raw.builds);
        }
        normalized.push(Version::from_raw(index, raw)?);
    }

    build_variants.sort();

    debug!(
        "Normalized {} versions across {} build variants (anchor: {:?})",
        normalized.len(),
        build_variants.len(),
        anchor
    );

    GridIndex::new(normalized, build_variants, anchor)
}

/// Stable sort of builds by variant display name
pub fn sort_builds(builds: &mut [Build]) {
    builds.sort_by(|a, b| {
        a.build_variant
            .display_name
            .cmp(&b.build_variant.display_name)
    });
}
