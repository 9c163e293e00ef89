//! Generic HTML node tree.
//!
//! Every converted document ends up as a tree of [`HtmlNode`]s rooted at a
//! `<div>`. A node takes one of two shapes:
//!
//! - **Leaf**: optional tag, a text value, no children. A leaf without a tag is
//!   raw text and serializes to its value verbatim.
//! - **Parent**: a tag and an ordered list of children, no value.
//!
//! Construction is permissive; shape violations surface as
//! [`HtmlError::InvalidNode`] when the tree is serialized.
//!
//! ## No Escaping
//!
//! Neither text values nor attribute values are escaped. Markdown sources are
//! authored by the site owner, so the tree passes their markup through as-is.
//! Callers rendering untrusted input must sanitize before building nodes.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HtmlError {
    #[error("Invalid node: {0}")]
    InvalidNode(&'static str),
}

/// One node of an output tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlNode {
    /// Element name; `None` marks a raw text leaf.
    pub tag: Option<String>,
    /// Literal text content (leaf shape).
    pub value: Option<String>,
    /// Child nodes (parent shape).
    pub children: Option<Vec<HtmlNode>>,
    /// Attributes in insertion order.
    pub attributes: Vec<(String, String)>,
}

impl HtmlNode {
    /// A tagless leaf: serializes to `value` unchanged.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// A tagged leaf: `<tag>value</tag>`.
    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// A container node: `<tag>children…</tag>`.
    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        Self {
            tag: Some(tag.into()),
            children: Some(children),
            ..Self::default()
        }
    }

    /// Set an attribute. Re-setting an existing name keeps its original position.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Render attributes as ` name="value"` pairs, or an empty string.
    pub fn attributes_to_html(&self) -> String {
        self.attributes
            .iter()
            .map(|(name, value)| format!(" {name}=\"{value}\""))
            .collect()
    }

    /// Serialize this node and its descendants to markup.
    pub fn serialize(&self) -> Result<String, HtmlError> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<(), HtmlError> {
        let Some(tag) = &self.tag else {
            return match &self.value {
                Some(value) => {
                    out.push_str(value);
                    Ok(())
                }
                None if self.children.is_some() => {
                    Err(HtmlError::InvalidNode("container node has no tag"))
                }
                None => Err(HtmlError::InvalidNode("text node has no value")),
            };
        };

        if self.value.is_some() && self.children.is_some() {
            return Err(HtmlError::InvalidNode(
                "node cannot have both a value and children",
            ));
        }

        out.push('<');
        out.push_str(tag);
        out.push_str(&self.attributes_to_html());
        out.push('>');
        if let Some(children) = &self.children {
            for child in children {
                child.write_html(out)?;
            }
        } else if let Some(value) = &self.value {
            out.push_str(value);
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_leaf_renders_raw_value() {
        let node = HtmlNode::text("Hello, <world>!");
        assert_eq!(node.serialize().unwrap(), "Hello, <world>!");
    }

    #[test]
    fn tagless_node_without_value_is_invalid() {
        let node = HtmlNode::default();
        assert!(matches!(node.serialize(), Err(HtmlError::InvalidNode(_))));
    }

    #[test]
    fn tagged_leaf() {
        let node = HtmlNode::leaf("p", "This is a paragraph");
        assert_eq!(node.serialize().unwrap(), "<p>This is a paragraph</p>");
    }

    #[test]
    fn leaf_with_attributes_in_insertion_order() {
        let node = HtmlNode::leaf("img", "")
            .with_attribute("src", "/cat.png")
            .with_attribute("alt", "a cat");
        assert_eq!(node.attributes_to_html(), " src=\"/cat.png\" alt=\"a cat\"");
        assert_eq!(
            node.serialize().unwrap(),
            "<img src=\"/cat.png\" alt=\"a cat\"></img>"
        );
    }

    #[test]
    fn resetting_attribute_keeps_position() {
        let node = HtmlNode::leaf("a", "x")
            .with_attribute("href", "/old")
            .with_attribute("target", "_blank")
            .with_attribute("href", "/new");
        assert_eq!(node.attributes_to_html(), " href=\"/new\" target=\"_blank\"");
    }

    #[test]
    fn attributes_are_not_escaped() {
        let node = HtmlNode::leaf("a", "q").with_attribute("title", "say \"hi\" & go");
        assert_eq!(
            node.serialize().unwrap(),
            "<a title=\"say \"hi\" & go\">q</a>"
        );
    }

    #[test]
    fn no_attributes_renders_empty() {
        assert_eq!(HtmlNode::leaf("b", "x").attributes_to_html(), "");
    }

    #[test]
    fn parent_with_mixed_children() {
        let node = HtmlNode::parent(
            "p",
            vec![
                HtmlNode::leaf("b", "Bold text"),
                HtmlNode::text("Normal text"),
                HtmlNode::leaf("i", "italic text"),
                HtmlNode::text("Normal text"),
            ],
        );
        assert_eq!(
            node.serialize().unwrap(),
            "<p><b>Bold text</b>Normal text<i>italic text</i>Normal text</p>"
        );
    }

    #[test]
    fn nested_parents() {
        let grandchild = HtmlNode::leaf("b", "grandchild");
        let child = HtmlNode::parent("span", vec![grandchild]);
        let parent = HtmlNode::parent("div", vec![child]);
        assert_eq!(
            parent.serialize().unwrap(),
            "<div><span><b>grandchild</b></span></div>"
        );
    }

    #[test]
    fn parent_with_attributes() {
        let node = HtmlNode::parent("ul", vec![HtmlNode::leaf("li", "one")])
            .with_attribute("class", "items");
        assert_eq!(
            node.serialize().unwrap(),
            "<ul class=\"items\"><li>one</li></ul>"
        );
    }

    #[test]
    fn parent_with_no_children_renders_empty_element() {
        let node = HtmlNode::parent("li", vec![]);
        assert_eq!(node.serialize().unwrap(), "<li></li>");
    }

    #[test]
    fn tag_without_value_or_children_renders_empty_element() {
        let node = HtmlNode {
            tag: Some("hr".to_string()),
            ..HtmlNode::default()
        };
        assert_eq!(node.serialize().unwrap(), "<hr></hr>");
    }

    #[test]
    fn parent_without_tag_is_invalid() {
        let node = HtmlNode {
            children: Some(vec![HtmlNode::text("x")]),
            ..HtmlNode::default()
        };
        assert_eq!(
            node.serialize(),
            Err(HtmlError::InvalidNode("container node has no tag"))
        );
    }

    #[test]
    fn value_and_children_together_is_invalid() {
        let node = HtmlNode {
            tag: Some("p".to_string()),
            value: Some("x".to_string()),
            children: Some(vec![]),
            attributes: vec![],
        };
        assert!(matches!(node.serialize(), Err(HtmlError::InvalidNode(_))));
    }

    #[test]
    fn invalid_descendant_fails_whole_tree() {
        let node = HtmlNode::parent("div", vec![HtmlNode::parent("p", vec![HtmlNode::default()])]);
        assert!(node.serialize().is_err());
    }

    #[test]
    fn serialization_is_repeatable() {
        let node = HtmlNode::parent("div", vec![HtmlNode::leaf("code", "x")]);
        assert_eq!(node.serialize().unwrap(), node.serialize().unwrap());
    }
}
