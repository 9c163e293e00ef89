//! Page generation.
//!
//! Turns each scanned markdown document into a finished HTML page:
//!
//! ```text
//! read .md  →  markdown_to_tree  →  serialize  ─┐
//!          └→  extract_title  ──────────────────┴→  template  →  write .html
//! ```
//!
//! ## Templates
//!
//! A template is a plain HTML file with two placeholders. `{{ Title }}` is
//! replaced with the document title and `{{ Content }}` with the converted
//! body. Every occurrence is replaced; a template missing a placeholder simply
//! renders without it.
//!
//! ## Parallelism
//!
//! Documents are independent, so pages are converted in parallel with
//! [rayon](https://docs.rs/rayon). Results come back in manifest order. The
//! first failing document aborts the build and its error names the file.

use crate::markdown::{self, MarkdownError};
use crate::scan::{Manifest, PageSource};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot read template {path}: {source}")]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Markdown {
        path: PathBuf,
        source: MarkdownError,
    },
}

/// A loaded page template.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, GenerateError> {
        fs::read_to_string(path)
            .map(Self::new)
            .map_err(|source| GenerateError::Template {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Substitute the title, then the content.
    pub fn render(&self, title: &str, content: &str) -> String {
        self.source
            .replace(TITLE_PLACEHOLDER, title)
            .replace(CONTENT_PLACEHOLDER, content)
    }
}

/// A document converted in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub title: String,
    pub html: String,
}

/// Convert a markdown document to a complete page.
pub fn render_page(markdown: &str, template: &Template) -> Result<RenderedPage, MarkdownError> {
    let content = markdown::markdown_to_html(markdown)?;
    let title = markdown::extract_title(markdown)?;
    let html = template.render(&title, &content);
    Ok(RenderedPage { title, html })
}

/// A page written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub relative: String,
    pub title: String,
    pub dest: PathBuf,
}

/// Read `page.source`, render it, and write `page.dest`.
pub fn generate_page(page: &PageSource, template: &Template) -> Result<GeneratedPage, GenerateError> {
    let rendered = convert(page, template)?;
    if let Some(parent) = page.dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&page.dest, &rendered.html)?;
    Ok(GeneratedPage {
        relative: page.relative.clone(),
        title: rendered.title,
        dest: page.dest.clone(),
    })
}

fn convert(page: &PageSource, template: &Template) -> Result<RenderedPage, GenerateError> {
    let markdown = fs::read_to_string(&page.source).map_err(|source| GenerateError::Read {
        path: page.source.clone(),
        source,
    })?;
    render_page(&markdown, template).map_err(|source| GenerateError::Markdown {
        path: page.source.clone(),
        source,
    })
}

/// Generate every page in the manifest.
pub fn generate_pages(
    manifest: &Manifest,
    template: &Template,
) -> Result<Vec<GeneratedPage>, GenerateError> {
    manifest
        .pages
        .par_iter()
        .map(|page| generate_page(page, template))
        .collect()
}

/// Convert every page without writing anything. Returns `(relative, title)` pairs.
pub fn check_pages(
    manifest: &Manifest,
    template: &Template,
) -> Result<Vec<(String, String)>, GenerateError> {
    manifest
        .pages
        .par_iter()
        .map(|page| {
            let rendered = convert(page, template)?;
            Ok((page.relative.clone(), rendered.title))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    const TEMPLATE: &str = "<title>{{ Title }}</title><main>{{ Content }}</main>";

    #[test]
    fn template_replaces_placeholders() {
        let template = Template::new(TEMPLATE);
        assert_eq!(
            template.render("Hi", "<p>x</p>"),
            "<title>Hi</title><main><p>x</p></main>"
        );
    }

    #[test]
    fn template_replaces_every_occurrence() {
        let template = Template::new("{{ Title }} | {{ Title }}");
        assert_eq!(template.render("A", ""), "A | A");
    }

    #[test]
    fn template_without_placeholders_is_unchanged() {
        let template = Template::new("<html></html>");
        assert_eq!(template.render("A", "B"), "<html></html>");
    }

    #[test]
    fn missing_template_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = Template::load(&tmp.path().join("template.html"));
        assert!(matches!(result, Err(GenerateError::Template { .. })));
    }

    #[test]
    fn render_page_fills_template() {
        let page = render_page(
            "# Title\n\nSome **bold** and _italic_ text",
            &Template::new(TEMPLATE),
        )
        .unwrap();
        assert_eq!(page.title, "Title");
        assert_eq!(
            page.html,
            "<title>Title</title><main><div><h1>Title</h1><p>Some <b>bold</b> and <i>italic</i> text</p></div></main>"
        );
    }

    #[test]
    fn render_page_without_title_fails() {
        let result = render_page("no heading here", &Template::new(TEMPLATE));
        assert_eq!(result, Err(MarkdownError::NoTitle));
    }

    #[test]
    fn generate_page_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("doc.md");
        fs::write(&source, "# Deep\n\ntext").unwrap();
        let dest = tmp.path().join("out/a/b/doc.html");
        let page = PageSource {
            relative: "doc.md".to_string(),
            source,
            dest: dest.clone(),
        };

        let generated = generate_page(&page, &Template::new(TEMPLATE)).unwrap();

        assert_eq!(generated.title, "Deep");
        assert_eq!(
            fs::read_to_string(dest).unwrap(),
            "<title>Deep</title><main><div><h1>Deep</h1><p>text</p></div></main>"
        );
    }

    #[test]
    fn generate_pages_in_manifest_order() {
        let tmp = setup_fixtures();
        let manifest = scan(&tmp.path().join("content"), &tmp.path().join("public")).unwrap();
        let template = Template::load(&tmp.path().join("template.html")).unwrap();

        let generated = generate_pages(&manifest, &template).unwrap();

        let relatives: Vec<&str> = generated.iter().map(|g| g.relative.as_str()).collect();
        assert_eq!(relatives, page_paths(&manifest));
        for g in &generated {
            assert!(g.dest.exists(), "{} not written", g.dest.display());
        }
    }

    #[test]
    fn failing_document_names_its_path() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        fs::create_dir_all(&content).unwrap();
        fs::write(content.join("bad.md"), "# Bad\n\nunclosed `code").unwrap();
        let manifest = scan(&content, &tmp.path().join("out")).unwrap();

        let err = generate_pages(&manifest, &Template::new(TEMPLATE)).unwrap_err();

        match &err {
            GenerateError::Markdown { path, source } => {
                assert!(path.ends_with("bad.md"));
                assert!(matches!(source, MarkdownError::Inline(_)));
            }
            other => panic!("expected markdown error, got {other:?}"),
        }
        assert!(err.to_string().contains("bad.md"));
        assert!(!tmp.path().join("out/bad.html").exists());
    }

    #[test]
    fn check_pages_writes_nothing() {
        let tmp = setup_fixtures();
        let output = tmp.path().join("public");
        let manifest = scan(&tmp.path().join("content"), &output).unwrap();
        let template = Template::load(&tmp.path().join("template.html")).unwrap();

        let checked = check_pages(&manifest, &template).unwrap();

        assert_eq!(checked.len(), manifest.pages.len());
        assert!(checked.iter().any(|(_, title)| title == "Welcome"));
        assert!(!output.exists());
    }
}
