//! Grid index: the coordinate system binding variant rows to version columns
//!
//! `versions[v].builds()[b]` is the build of variant row `b` in column `v`.
//! Every standalone version keeps its own build list sorted in row order, so
//! the alignment is checked once here instead of being assumed at each lookup.

use crate::data::{Build, Version};
use crate::error::{Error, Result};

/// A normalized waterfall, indexed by `(version_index, variant_index)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridIndex {
    versions: Vec<Version>,
    build_variants: Vec<String>,
    anchor: Option<usize>,
}

impl GridIndex {
    /// Bind already sorted versions to already sorted variant rows
    ///
    /// Fails if a standalone version does not hold exactly one build per row
    /// in row order.
    pub fn new(
        versions: Vec<Version>,
        build_variants: Vec<String>,
        anchor: Option<usize>,
    ) -> Result<Self> {
        for version in versions.iter().filter(|v| !v.is_rolled_up()) {
            let builds = version.builds();
            if builds.len() != build_variants.len() {
                return Err(Error::MisalignedBuilds {
                    version: version.id().to_string(),
                    builds: builds.len(),
                    variants: build_variants.len(),
                });
            }

            for (row, (build, expected)) in builds.iter().zip(&build_variants).enumerate() {
                if &build.build_variant.display_name != expected {
                    return Err(Error::MismatchedVariant {
                        version: version.id().to_string(),
                        row,
                        expected: expected.clone(),
                        found: build.build_variant.display_name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            versions,
            build_variants,
            anchor,
        })
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn version(&self, version_index: usize) -> &Version {
        &self.versions[version_index]
    }

    /// Variant display names in row order
    pub fn build_variants(&self) -> &[String] {
        &self.build_variants
    }

    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    pub fn variant_count(&self) -> usize {
        self.build_variants.len()
    }

    /// Index of the last standalone version, if any
    pub fn anchor_version(&self) -> Option<usize> {
        self.anchor
    }

    /// Build at a grid coordinate
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid, or if the column is a
    /// rolled-up version without per-row builds. Coordinates are always
    /// derived from the grid's own axes, so either case is a caller bug.
    pub fn resolve(&self, version_index: usize, variant_index: usize) -> &Build {
        &self.versions[version_index].builds()[variant_index]
    }

    /// Non-panicking form of [`GridIndex::resolve`]
    pub fn get(&self, version_index: usize, variant_index: usize) -> Option<&Build> {
        self.versions
            .get(version_index)
            .and_then(|version| version.builds().get(variant_index))
    }

    /// Variant identifier for a row, taken from the anchor version's build
    pub fn variant_id(&self, variant_index: usize) -> Option<&str> {
        self.anchor
            .map(|anchor| self.resolve(anchor, variant_index).build_variant.id.as_str())
    }
}
