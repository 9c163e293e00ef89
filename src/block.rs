//! Block splitting and classification.
//!
//! A document is cut into blocks at blank lines. Each block is classified by
//! looking at its leading characters, first rule wins:
//!
//! | Rule | Type |
//! |------|------|
//! | starts with `>` | [`BlockType::Quote`] |
//! | starts with `- ` | [`BlockType::UnorderedList`] |
//! | starts and ends with ```` ``` ```` | [`BlockType::Code`] |
//! | 1–6 `#` then a space | [`BlockType::Heading`] |
//! | every line `N. ` with N = 1, 2, 3… | [`BlockType::OrderedList`] |
//! | anything else | [`BlockType::Paragraph`] |
//!
//! Ordered lists get no partial credit: one line out of sequence and the whole
//! block is a paragraph.

use regex::Regex;
use std::sync::LazyLock;

/// Structural type of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

const CODE_FENCE: &str = "```";

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").expect("blank line pattern is valid"));

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6} ").expect("heading pattern is valid"));

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\. ").expect("ordered item pattern is valid"));

/// Split a document into trimmed, non-empty blocks in document order.
///
/// Any run of one or more blank lines separates blocks. Lines holding only
/// spaces or tabs count as blank.
pub fn split_blocks(text: &str) -> Vec<&str> {
    BLANK_LINES
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a trimmed block.
pub fn classify(block: &str) -> BlockType {
    if block.starts_with('>') {
        BlockType::Quote
    } else if block.starts_with("- ") {
        BlockType::UnorderedList
    } else if block.starts_with(CODE_FENCE) && block.ends_with(CODE_FENCE) {
        BlockType::Code
    } else if HEADING.is_match(block) {
        BlockType::Heading
    } else if is_ordered_list(block) {
        BlockType::OrderedList
    } else {
        BlockType::Paragraph
    }
}

fn is_ordered_list(block: &str) -> bool {
    let bytes = block.as_bytes();
    if bytes.len() < 2 || !bytes[0].is_ascii_digit() || bytes[1] != b'.' {
        return false;
    }
    block
        .lines()
        .enumerate()
        .all(|(i, line)| ordered_item_number(line) == Some(i + 1))
}

/// The `N` of an `N. ` list marker at the start of `line`.
fn ordered_item_number(line: &str) -> Option<usize> {
    ORDERED_ITEM
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|n| n.as_str().parse().ok())
}
