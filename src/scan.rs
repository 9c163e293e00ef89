//! Content discovery.
//!
//! Walks the content tree and pairs every markdown file with the HTML file it
//! becomes. The output tree mirrors the content tree:
//!
//! ```text
//! content/                      public/
//! ├── index.md          →       ├── index.html
//! └── blog/                     └── blog/
//!     ├── first.md      →           ├── first.html
//!     └── notes.txt                 (not a page)
//! ```
//!
//! Entries are visited in file-name order so the manifest, and the build
//! output derived from it, is stable across runs and platforms.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Content directory does not exist: {0}")]
    MissingContent(PathBuf),
}

/// Every page the build will produce.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub content_root: PathBuf,
    pub output_root: PathBuf,
    pub pages: Vec<PageSource>,
}

/// One markdown document and where its HTML goes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSource {
    /// Path relative to the content root, `/`-separated (`blog/first.md`)
    pub relative: String,
    /// Markdown file on disk
    pub source: PathBuf,
    /// HTML file to write
    pub dest: PathBuf,
}

/// Find every `.md` file under `content_root` and map it under `output_root`.
pub fn scan(content_root: &Path, output_root: &Path) -> Result<Manifest, ScanError> {
    if !content_root.is_dir() {
        return Err(ScanError::MissingContent(content_root.to_path_buf()));
    }

    let mut pages = Vec::new();
    for entry in WalkDir::new(content_root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown(path) {
            continue;
        }
        let Ok(rel) = path.strip_prefix(content_root) else {
            continue;
        };
        pages.push(PageSource {
            relative: relative_string(rel),
            source: path.to_path_buf(),
            dest: output_path(output_root, rel),
        });
    }

    Ok(Manifest {
        content_root: content_root.to_path_buf(),
        output_root: output_root.to_path_buf(),
        pages,
    })
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

/// `a/b.md` under `output_root` becomes `output_root/a/b.html`.
pub fn output_path(output_root: &Path, relative: &Path) -> PathBuf {
    output_root.join(relative).with_extension("html")
}

fn relative_string(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
