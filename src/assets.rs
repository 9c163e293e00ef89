//! Static asset copying.
//!
//! Everything under the static directory (stylesheets, images, fonts) lands
//! in the output root unchanged. The output directory is wiped first so files
//! removed from the sources do not linger in the published site.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Static directory does not exist or is not a directory: {0}")]
    MissingSource(PathBuf),
}

/// Files copied by [`copy_static`], relative to the static root, sorted.
#[derive(Debug, Default)]
pub struct CopyReport {
    pub files: Vec<PathBuf>,
}

/// Replace `dst` with a fresh copy of the `src` tree.
pub fn copy_static(src: &Path, dst: &Path) -> Result<CopyReport, AssetError> {
    if !src.is_dir() {
        return Err(AssetError::MissingSource(src.to_path_buf()));
    }
    if dst.exists() {
        fs::remove_dir_all(dst)?;
    }
    fs::create_dir_all(dst)?;

    let mut report = CopyReport::default();
    copy_dir_recursive(src, dst, Path::new(""), &mut report.files)?;
    report.files.sort();
    Ok(report)
}

fn copy_dir_recursive(
    src: &Path,
    dst: &Path,
    rel: &Path,
    copied: &mut Vec<PathBuf>,
) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        let rel_path = rel.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path, &rel_path, copied)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            copied.push(rel_path);
        }
    }
    Ok(())
}
