//! Markdown to HTML tree compilation.
//!
//! [`markdown_to_tree`] is the entry point: it splits a document into blocks,
//! classifies each one, compiles it to an [`HtmlNode`], and gathers the results
//! under a single `<div>`.
//!
//! ## Block Output
//!
//! | Block | Markup |
//! |-------|--------|
//! | paragraph | `<p>…</p>` |
//! | heading | `<h1>…</h1>` through `<h6>…</h6>` |
//! | quote | `<blockquote>…</blockquote>` |
//! | unordered list | `<ul><li>…</li></ul>` |
//! | ordered list | `<ol><li>…</li></ol>` |
//! | code | `<pre><code>…</code></pre>` |
//!
//! Code blocks are passed through untouched. Every other block runs its text
//! through the inline pipeline in [`crate::inline`].

use crate::block::{self, BlockType};
use crate::html::{HtmlError, HtmlNode};
use crate::inline::{self, InlineError, Span, SpanKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkdownError {
    #[error(transparent)]
    Inline(#[from] InlineError),
    #[error(transparent)]
    Html(#[from] HtmlError),
    #[error("No title: document has no `# ` heading line")]
    NoTitle,
}

/// Convert one span to its leaf node.
///
/// Plain text has embedded newlines collapsed to spaces so that wrapped
/// paragraph lines read as one run.
pub fn span_to_node(span: Span) -> HtmlNode {
    let Span { text, kind, url } = span;
    let url = url.unwrap_or_default();
    match kind {
        SpanKind::Plain => HtmlNode::text(text.replace('\n', " ")),
        SpanKind::Bold => HtmlNode::leaf("b", text),
        SpanKind::Italic => HtmlNode::leaf("i", text),
        SpanKind::Code => HtmlNode::leaf("code", text),
        SpanKind::Link => HtmlNode::leaf("a", text).with_attribute("href", url),
        SpanKind::Image => HtmlNode::leaf("img", "")
            .with_attribute("src", url)
            .with_attribute("alt", text),
    }
}

/// Run the inline pipeline and convert every span to a node.
fn text_to_children(text: &str) -> Result<Vec<HtmlNode>, InlineError> {
    Ok(inline::text_to_spans(text)?
        .into_iter()
        .map(span_to_node)
        .collect())
}

/// Compile one classified block to its HTML node.
pub fn compile_block(block_type: BlockType, block: &str) -> Result<HtmlNode, MarkdownError> {
    let node = match block_type {
        BlockType::Quote => {
            let text = block
                .lines()
                .map(|line| line.strip_prefix('>').map_or(line, str::trim_start))
                .collect::<Vec<_>>()
                .join("\n");
            HtmlNode::parent("blockquote", text_to_children(&text)?)
        }
        BlockType::UnorderedList => {
            HtmlNode::parent("ul", list_items(block, strip_unordered_marker)?)
        }
        BlockType::OrderedList => HtmlNode::parent("ol", list_items(block, strip_ordered_marker)?),
        BlockType::Code => {
            let code = Span::styled(code_body(block), SpanKind::Code);
            HtmlNode::parent("pre", vec![span_to_node(code)])
        }
        BlockType::Heading => {
            let level = block.bytes().take_while(|b| *b == b'#').count();
            let text = block[level..].trim_start();
            HtmlNode::parent(format!("h{level}"), text_to_children(text)?)
        }
        BlockType::Paragraph => HtmlNode::parent("p", text_to_children(block)?),
    };
    Ok(node)
}

fn list_items(block: &str, strip_marker: fn(&str) -> &str) -> Result<Vec<HtmlNode>, InlineError> {
    block
        .lines()
        .map(|line| -> Result<HtmlNode, InlineError> {
            let children = text_to_children(strip_marker(line).trim_start())?;
            Ok(HtmlNode::parent("li", children))
        })
        .collect()
}

fn strip_unordered_marker(line: &str) -> &str {
    line.strip_prefix("- ").unwrap_or(line)
}

fn strip_ordered_marker(line: &str) -> &str {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    rest.strip_prefix(". ").unwrap_or(line)
}

/// The lines between the opening and closing fences, each newline-terminated.
fn code_body(block: &str) -> String {
    let lines: Vec<&str> = block.lines().collect();
    let inner = lines
        .get(1..lines.len().saturating_sub(1))
        .unwrap_or_default();
    let mut body = inner.join("\n");
    body.push('\n');
    body
}

/// Convert a whole document to a tree rooted at `<div>`.
pub fn markdown_to_tree(text: &str) -> Result<HtmlNode, MarkdownError> {
    let children = block::split_blocks(text)
        .into_iter()
        .map(|b| compile_block(block::classify(b), b))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("div", children))
}

/// Convert a whole document straight to markup.
pub fn markdown_to_html(text: &str) -> Result<String, MarkdownError> {
    Ok(markdown_to_tree(text)?.serialize()?)
}

/// The text of the first `# ` line, trimmed.
pub fn extract_title(text: &str) -> Result<String, MarkdownError> {
    text.lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or(MarkdownError::NoTitle)
}
