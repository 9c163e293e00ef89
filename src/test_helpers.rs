//! Shared test utilities for the mdpress test suite.
//!
//! Provides fixture setup and manifest lookups that panic with a clear
//! message on a miss.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(&tmp.path().join("content"), &tmp.path().join("public")).unwrap();
//!
//! let page = find_page(&manifest, "blog/first-post.md");
//! assert!(page.dest.ends_with("blog/first-post.html"));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::assets::copy_static;
use crate::scan::{Manifest, PageSource};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_static(&fixtures, tmp.path()).unwrap();
    tmp
}

// =========================================================================
// Manifest lookups
// =========================================================================

/// Find a page by its content-relative path. Panics if not found.
pub fn find_page<'a>(manifest: &'a Manifest, relative: &str) -> &'a PageSource {
    manifest
        .pages
        .iter()
        .find(|p| p.relative == relative)
        .unwrap_or_else(|| {
            let available = page_paths(manifest);
            panic!("page '{relative}' not found. Available: {available:?}")
        })
}

/// Content-relative paths of all pages, in manifest order.
pub fn page_paths(manifest: &Manifest) -> Vec<&str> {
    manifest.pages.iter().map(|p| p.relative.as_str()).collect()
}
