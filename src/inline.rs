//! Inline markup: spans and the rules that split them.
//!
//! A line of markdown text starts life as one plain [`Span`]. Each rule walks
//! the current sequence, leaves typed spans untouched, and re-splits plain
//! spans around the markup it recognizes. [`text_to_spans`] applies the rules
//! in a fixed order:
//!
//! ```text
//! bold (**)  →  italic (_)  →  code (`)  →  images ![alt](url)  →  links [text](url)
//! ```
//!
//! The order matters. `_` must not see the inside of `**`, and images must be
//! taken before links or `![alt](url)` would be read as a link preceded by `!`.
//!
//! Markup does not nest: once a run of text becomes bold, later rules never
//! look inside it.

use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InlineError {
    #[error("Malformed inline markup: unbalanced delimiter `{delimiter}`")]
    MalformedInline { delimiter: String },
}

/// The kind of text a [`Span`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl SpanKind {
    /// Whether spans of this kind carry a destination URL.
    pub fn has_url(self) -> bool {
        matches!(self, SpanKind::Link | SpanKind::Image)
    }
}

/// A contiguous run of inline text tagged with its kind.
///
/// `url` is `Some` exactly when `kind` is [`SpanKind::Link`] or [`SpanKind::Image`];
/// the constructors keep it that way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub kind: SpanKind,
    pub url: Option<String>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, SpanKind::Plain)
    }

    /// A span of a kind without a URL (plain, bold, italic, code).
    pub fn styled(text: impl Into<String>, kind: SpanKind) -> Self {
        debug_assert!(!kind.has_url(), "{kind:?} spans need a url");
        Self {
            text: text.into(),
            kind,
            url: None,
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SpanKind::Link,
            url: Some(url.into()),
        }
    }

    /// An image span; `text` is the alt text.
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: alt.into(),
            kind: SpanKind::Image,
            url: Some(url.into()),
        }
    }

    pub fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }
}

/// Split plain spans on a delimiter pair, turning enclosed runs into `kind` spans.
///
/// Pieces at odd positions are the enclosed runs. An even number of pieces
/// means a delimiter was left open and fails with [`InlineError::MalformedInline`].
/// Empty pieces are dropped, so `**bold**` yields a single bold span.
pub fn split_delimiter(
    spans: Vec<Span>,
    delimiter: &str,
    kind: SpanKind,
) -> Result<Vec<Span>, InlineError> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        let pieces: Vec<&str> = span.text.split(delimiter).collect();
        if pieces.len() % 2 == 0 {
            return Err(InlineError::MalformedInline {
                delimiter: delimiter.to_string(),
            });
        }

        for (i, piece) in pieces.into_iter().enumerate() {
            if piece.is_empty() {
                continue;
            }
            let piece_kind = if i % 2 == 0 { SpanKind::Plain } else { kind };
            out.push(Span::styled(piece, piece_kind));
        }
    }
    Ok(out)
}

static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("image pattern is valid"));

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("link pattern is valid"));

/// A `[label](url)` occurrence located in some text.
struct Reference<'a> {
    range: Range<usize>,
    label: &'a str,
    url: &'a str,
}

fn reference<'a>(caps: &Captures<'a>) -> Option<Reference<'a>> {
    let whole = caps.get(0)?;
    Some(Reference {
        range: whole.range(),
        label: caps.get(1).map_or("", |m| m.as_str()),
        url: caps.get(2).map_or("", |m| m.as_str()),
    })
}

fn find_images(text: &str) -> Vec<Reference<'_>> {
    IMAGE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| reference(&caps))
        .collect()
}

/// Links are bracket references not directly preceded by `!`.
fn find_links(text: &str) -> Vec<Reference<'_>> {
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(found_ref) = LINK_PATTERN
        .captures_at(text, pos)
        .and_then(|caps| reference(&caps))
    {
        if text[..found_ref.range.start].ends_with('!') {
            // `[` is one byte, so this stays on a char boundary
            pos = found_ref.range.start + 1;
            continue;
        }
        pos = found_ref.range.end;
        found.push(found_ref);
    }
    found
}

/// Extract `(alt, url)` pairs for every `![alt](url)` in `text`.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    find_images(text)
        .into_iter()
        .map(|r| (r.label.to_string(), r.url.to_string()))
        .collect()
}

/// Extract `(text, url)` pairs for every `[text](url)` not preceded by `!`.
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    find_links(text)
        .into_iter()
        .map(|r| (r.label.to_string(), r.url.to_string()))
        .collect()
}

fn split_references(
    spans: Vec<Span>,
    find: fn(&str) -> Vec<Reference<'_>>,
    make: fn(&str, &str) -> Span,
) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }
        match split_at_references(&span.text, find, make) {
            Some(pieces) => out.extend(pieces),
            None => out.push(span),
        }
    }
    out
}

/// Cut `text` around every reference; `None` when there are none.
fn split_at_references(
    text: &str,
    find: fn(&str) -> Vec<Reference<'_>>,
    make: fn(&str, &str) -> Span,
) -> Option<Vec<Span>> {
    let references = find(text);
    if references.is_empty() {
        return None;
    }

    let mut pieces = Vec::with_capacity(references.len() * 2 + 1);
    let mut consumed = 0;
    for r in &references {
        let before = &text[consumed..r.range.start];
        if !before.is_empty() {
            pieces.push(Span::plain(before));
        }
        pieces.push(make(r.label, r.url));
        consumed = r.range.end;
    }
    let rest = &text[consumed..];
    if !rest.is_empty() {
        pieces.push(Span::plain(rest));
    }
    Some(pieces)
}

/// Split plain spans around `![alt](url)` image references.
pub fn split_images(spans: Vec<Span>) -> Vec<Span> {
    split_references(spans, find_images, |alt, url| Span::image(alt, url))
}

/// Split plain spans around `[text](url)` link references.
pub fn split_links(spans: Vec<Span>) -> Vec<Span> {
    split_references(spans, find_links, |text, url| Span::link(text, url))
}

/// Run the full inline pipeline over a run of text.
pub fn text_to_spans(text: &str) -> Result<Vec<Span>, InlineError> {
    let spans = vec![Span::plain(text)];
    let spans = split_delimiter(spans, "**", SpanKind::Bold)?;
    let spans = split_delimiter(spans, "_", SpanKind::Italic)?;
    let spans = split_delimiter(spans, "`", SpanKind::Code)?;
    let spans = split_images(spans);
    Ok(split_links(spans))
}
