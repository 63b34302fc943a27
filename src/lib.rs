//! waterfall - Render continuous-integration waterfall grids
//!
//! This library turns a waterfall payload (versions x build variants, each
//! cell a build with its tasks) into HTML pages, a scene tree, or a text
//! report. The grid model and view composition live in `waterfall-core`.
//!
//! # Features
//!
//! - Normalize the payload into a validated grid index
//! - Expanded and collapsed views with aggregated status bars
//! - Static HTML pages with a working collapsed-view toggle
//! - Plain-text report of every cell
//!
//! # Example
//!
//! ```no_run
//! use waterfall::{html, report};
//! use waterfall_core::{normalize, Payload, ViewOptions};
//!
//! let payload = Payload::load_from_file("waterfall.json".as_ref()).unwrap();
//! let grid = normalize(payload).unwrap();
//!
//! let options = ViewOptions::new("mongodb-mongo-master").collapsed(true);
//! let page = html::generate_page(&grid, &options, &html::PageConfig::default(), None).unwrap();
//! println!("{}", report::summary(&grid, &options.status_filter, &options.zone));
//! # let _ = page;
//! ```

pub mod error;
pub mod html;
pub mod report;

pub use error::{Error, Result};

/// Load a payload file and normalize it into a grid
pub fn load_grid(path: &std::path::Path) -> Result<waterfall_core::GridIndex> {
    let payload = waterfall_core::Payload::load_from_file(path)?;
    Ok(waterfall_core::normalize(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waterfall.json");
        std::fs::write(
            &path,
            r#"{
                "versions": [{
                    "ids": ["v1"], "messages": ["m"], "authors": ["kim"],
                    "revisions": ["abc"], "create_times": ["2017-06-20T17:04:59Z"],
                    "builds": [{"build_variant": {"id": "x", "display_name": "X"}}]
                }],
                "build_variants": ["X"]
            }"#,
        )
        .unwrap();

        let grid = load_grid(&path).unwrap();
        assert_eq!(grid.version_count(), 1);
        assert_eq!(grid.variant_id(0), Some("x"));
    }

    #[test]
    fn test_load_grid_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_grid(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(
            err,
            Error::Core(waterfall_core::Error::FileReadError { .. })
        ));
    }
}
