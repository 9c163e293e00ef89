//! CLI output formatting for all build steps.
//!
//! # Information-First Display
//!
//! Each page is shown by its positional index and title, with filesystem
//! paths as indented context lines. The output reads as a content inventory
//! while still letting users trace every page back to its source file.
//!
//! # Output Format
//!
//! ## Copy
//!
//! ```text
//! Static static/ → public/
//!     images/logo.svg
//!     index.css
//! Copied 2 files
//! ```
//!
//! ## Scan
//!
//! ```text
//! Pages
//! 001 blog/first-post.md
//!     Output: blog/first-post.html
//! ```
//!
//! ## Generate
//!
//! ```text
//! 001 First Post → blog/first-post.html
//!     Source: blog/first-post.md
//!
//! Generated 1 page
//! ```
//!
//! # Architecture
//!
//! Each step has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::assets::CopyReport;
use crate::generate::GeneratedPage;
use crate::scan::Manifest;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `path` relative to `root` with `/` separators, or the full path if it lies
/// outside `root`.
fn display_relative(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Static copy output
// ============================================================================

pub fn format_copy_output(report: &CopyReport, static_dir: &Path, output: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Static {}/ \u{2192} {}/",
        static_dir.display(),
        output.display()
    )];
    for file in &report.files {
        lines.push(format!("{}{}", indent(1), display_relative(file, Path::new(""))));
    }
    lines.push(format!("Copied {}", plural(report.files.len(), "file")));
    lines
}

pub fn print_copy_output(report: &CopyReport, static_dir: &Path, output: &Path) {
    for line in format_copy_output(report, static_dir, output) {
        println!("{}", line);
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the discovered pages with their destination paths.
pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    for (i, page) in manifest.pages.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), page.relative));
        lines.push(format!(
            "{}Output: {}",
            indent(1),
            display_relative(&page.dest, &manifest.output_root)
        ));
    }
    if manifest.pages.is_empty() {
        lines.push(format!("{}(no markdown files)", indent(1)));
    }
    lines
}

pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format generated pages: `NNN Title → output/path.html`, with the source as
/// context, followed by a summary line.
pub fn format_generate_output(pages: &[GeneratedPage], output_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, page) in pages.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            page.title,
            display_relative(&page.dest, output_root)
        ));
        lines.push(format!("{}Source: {}", indent(1), page.relative));
    }
    if !pages.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("Generated {}", plural(pages.len(), "page")));
    lines
}

pub fn print_generate_output(pages: &[GeneratedPage], output_root: &Path) {
    for line in format_generate_output(pages, output_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format pages that converted cleanly during `check`.
pub fn format_check_output(checked: &[(String, String)]) -> Vec<String> {
    let mut lines: Vec<String> = checked
        .iter()
        .enumerate()
        .map(|(i, (relative, title))| format!("{} {} ({})", format_index(i + 1), title, relative))
        .collect();
    lines.push(format!("Checked {}", plural(checked.len(), "page")));
    lines
}

pub fn print_check_output(checked: &[(String, String)]) {
    for line in format_check_output(checked) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::PageSource;
    use std::path::PathBuf;

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(1), "    ");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(0, "page"), "0 pages");
        assert_eq!(plural(1, "page"), "1 page");
        assert_eq!(plural(2, "file"), "2 files");
    }

    #[test]
    fn display_relative_strips_root() {
        assert_eq!(
            display_relative(Path::new("public/blog/a.html"), Path::new("public")),
            "blog/a.html"
        );
        assert_eq!(
            display_relative(Path::new("/elsewhere/a.html"), Path::new("public")),
            "/elsewhere/a.html"
        );
    }

    #[test]
    fn copy_output_lists_files() {
        let report = CopyReport {
            files: vec![PathBuf::from("images/logo.svg"), PathBuf::from("index.css")],
        };
        let lines = format_copy_output(&report, Path::new("static"), Path::new("public"));
        assert_eq!(
            lines,
            vec![
                "Static static/ \u{2192} public/",
                "    images/logo.svg",
                "    index.css",
                "Copied 2 files",
            ]
        );
    }

    #[test]
    fn scan_output_shows_destinations() {
        let manifest = Manifest {
            content_root: PathBuf::from("content"),
            output_root: PathBuf::from("public"),
            pages: vec![PageSource {
                relative: "blog/a.md".to_string(),
                source: PathBuf::from("content/blog/a.md"),
                dest: PathBuf::from("public/blog/a.html"),
            }],
        };
        assert_eq!(
            format_scan_output(&manifest),
            vec!["Pages", "001 blog/a.md", "    Output: blog/a.html"]
        );
    }

    #[test]
    fn scan_output_empty() {
        let manifest = Manifest {
            content_root: PathBuf::from("content"),
            output_root: PathBuf::from("public"),
            pages: vec![],
        };
        assert_eq!(
            format_scan_output(&manifest),
            vec!["Pages", "    (no markdown files)"]
        );
    }

    #[test]
    fn generate_output_lines() {
        let pages = vec![
            GeneratedPage {
                relative: "index.md".to_string(),
                title: "Welcome".to_string(),
                dest: PathBuf::from("public/index.html"),
            },
            GeneratedPage {
                relative: "blog/a.md".to_string(),
                title: "First".to_string(),
                dest: PathBuf::from("public/blog/a.html"),
            },
        ];
        let lines = format_generate_output(&pages, Path::new("public"));
        assert_eq!(
            lines,
            vec![
                "001 Welcome \u{2192} index.html",
                "    Source: index.md",
                "002 First \u{2192} blog/a.html",
                "    Source: blog/a.md",
                "",
                "Generated 2 pages",
            ]
        );
    }

    #[test]
    fn generate_output_empty() {
        assert_eq!(
            format_generate_output(&[], Path::new("public")),
            vec!["Generated 0 pages"]
        );
    }

    #[test]
    fn check_output_lines() {
        let checked = vec![("index.md".to_string(), "Welcome".to_string())];
        assert_eq!(
            format_check_output(&checked),
            vec!["001 Welcome (index.md)", "Checked 1 page"]
        );
    }
}
