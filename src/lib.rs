//! # mdpress
//!
//! A small static site generator: markdown files in, HTML pages out.
//! The content tree is the site map. `content/blog/first.md` becomes
//! `public/blog/first.html`, wrapped in a single HTML template.
//!
//! # Architecture: Convert, Then Assemble
//!
//! ```text
//! 1. Copy      static/   →  public/           (assets, verbatim)
//! 2. Scan      content/  →  Manifest          (.md → .html path pairs)
//! 3. Generate  Manifest  →  public/**.html    (markdown → tree → template)
//! ```
//!
//! The markdown conversion itself is a pure function from text to an
//! [`html::HtmlNode`] tree, with no I/O and no shared state:
//!
//! ```text
//! text ─ split_blocks ─ classify ─ compile_block ─┬─ <div> ─ serialize
//!                                     │           │
//!                                text_to_spans ───┘
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`html`] | Generic HTML node tree and serialization |
//! | [`inline`] | Inline spans and the bold/italic/code/image/link splitting rules |
//! | [`block`] | Blank-line block splitting and block classification |
//! | [`markdown`] | Block-to-tree compilation, `markdown_to_tree`, `extract_title` |
//! | [`config`] | `site.toml` loading, validation, and merging |
//! | [`assets`] | Static directory copy |
//! | [`scan`] | Content walk producing the page manifest |
//! | [`generate`] | Template substitution and page writing |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## A Fixed Markdown Subset
//!
//! Only paragraphs, `#` headings, `>` quotes, `- ` and `1. ` lists, fenced code,
//! and inline bold, italic, code, images, and links are understood. Inline
//! markup does not nest. A delimiter left open fails the document instead of
//! rendering something surprising.
//!
//! ## Fail Per Document
//!
//! Conversion either succeeds or returns one error; there is no partial output
//! and no recovery. The build stops at the first failing document and the
//! error names the file. Retrying is pointless since conversion is
//! deterministic.
//!
//! ## No Escaping
//!
//! Text and attribute values pass through unescaped. Markdown sources belong
//! to the site owner, and raw HTML in them is kept as written.

pub mod assets;
pub mod block;
pub mod config;
pub mod generate;
pub mod html;
pub mod inline;
pub mod markdown;
pub mod output;
pub mod scan;

pub use html::{HtmlError, HtmlNode};
pub use markdown::{MarkdownError, extract_title, markdown_to_html, markdown_to_tree};

#[cfg(test)]
pub(crate) mod test_helpers;
