//! HTML node tree.
//!
//! Rendered markdown is represented as a tree of [`HtmlNode`] values: leaves
//! carry a literal value, parents carry an ordered list of children. The tree
//! is serialized with [`HtmlNode::serialize`].
//!
//! No escaping is applied to values or attribute values.

use crate::error::RenderError;

/// Element attributes in insertion order.
pub type Attributes = Vec<(String, String)>;

/// Node in the rendered HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// Literal value, optionally wrapped in an element.
    Leaf {
        /// Element tag. `None` or empty renders the bare value.
        tag: Option<String>,
        /// Element content.
        value: String,
        /// Element attributes. Only allowed when `tag` is non-empty.
        attributes: Option<Attributes>,
    },
    /// Element composed of child nodes.
    Parent {
        /// Element tag. Required; empty renders the children without a wrapper.
        tag: Option<String>,
        /// Child nodes. Required, may be empty.
        children: Option<Vec<HtmlNode>>,
        /// Element attributes.
        attributes: Option<Attributes>,
    },
}

impl HtmlNode {
    /// Create an untagged leaf holding raw text.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Leaf {
            tag: None,
            value: value.into(),
            attributes: None,
        }
    }

    /// Create a tagged leaf.
    #[must_use]
    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Leaf {
            tag: Some(tag.into()),
            value: value.into(),
            attributes: None,
        }
    }

    /// Create a parent node.
    ///
    /// An empty `tag` makes the node a transparent wrapper.
    #[must_use]
    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        Self::Parent {
            tag: Some(tag.into()),
            children: Some(children),
            attributes: None,
        }
    }

    /// Append an attribute, keeping insertion order.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let attributes = match &mut self {
            Self::Leaf { attributes, .. } | Self::Parent { attributes, .. } => attributes,
        };
        attributes
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    /// Element tag, if set.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Leaf { tag, .. } | Self::Parent { tag, .. } => tag.as_deref(),
        }
    }

    /// Literal value of a leaf node.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Leaf { value, .. } => Some(value),
            Self::Parent { .. } => None,
        }
    }

    /// Children of a parent node.
    ///
    /// Leaves and parents with an unset children list both return an empty slice.
    #[must_use]
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            Self::Parent {
                children: Some(children),
                ..
            } => children,
            _ => &[],
        }
    }

    /// Serialize the tree to an HTML string.
    ///
    /// # Errors
    ///
    /// - [`RenderError::LeafRequiresTagForAttributes`] for an untagged leaf with attributes
    /// - [`RenderError::MissingTag`] for a parent without a tag
    /// - [`RenderError::MissingChildren`] for a parent without a children list
    pub fn serialize(&self) -> Result<String, RenderError> {
        let mut out = String::with_capacity(1024);
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<(), RenderError> {
        match self {
            Self::Leaf {
                tag,
                value,
                attributes,
            } => match tag.as_deref() {
                None | Some("") => {
                    if attributes.is_some() {
                        return Err(RenderError::LeafRequiresTagForAttributes);
                    }
                    out.push_str(value);
                }
                Some(tag) => {
                    open_tag(tag, attributes.as_deref(), out);
                    out.push_str(value);
                    close_tag(tag, out);
                }
            },
            Self::Parent {
                tag,
                children,
                attributes,
            } => {
                let tag = tag.as_deref().ok_or(RenderError::MissingTag)?;
                let children = children.as_deref().ok_or(RenderError::MissingChildren)?;

                if tag.is_empty() {
                    for child in children {
                        child.write_html(out)?;
                    }
                } else {
                    open_tag(tag, attributes.as_deref(), out);
                    for child in children {
                        child.write_html(out)?;
                    }
                    close_tag(tag, out);
                }
            }
        }
        Ok(())
    }
}

fn open_tag(tag: &str, attributes: Option<&[(String, String)]>, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attributes.unwrap_or_default() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_text_leaf_renders_raw_value() {
        let node = HtmlNode::text("Just some text");
        assert_eq!(node.serialize().unwrap(), "Just some text");
    }

    #[test]
    fn test_tagged_leaf() {
        let node = HtmlNode::leaf("p", "Hello, world!");
        assert_eq!(node.serialize().unwrap(), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_leaf_attributes_in_insertion_order() {
        let node = HtmlNode::leaf("a", "Click me!")
            .with_attribute("href", "https://www.google.com")
            .with_attribute("target", "_blank");
        assert_eq!(
            node.serialize().unwrap(),
            r#"<a href="https://www.google.com" target="_blank">Click me!</a>"#
        );
    }

    #[test]
    fn test_img_is_not_self_closing() {
        let node = HtmlNode::leaf("img", "")
            .with_attribute("src", "cat.png")
            .with_attribute("alt", "a cat");
        assert_eq!(
            node.serialize().unwrap(),
            r#"<img src="cat.png" alt="a cat"></img>"#
        );
    }

    #[test]
    fn test_untagged_leaf_with_attributes_fails() {
        let node = HtmlNode::text("oops").with_attribute("href", "x");
        assert_eq!(
            node.serialize(),
            Err(RenderError::LeafRequiresTagForAttributes)
        );
    }

    #[test]
    fn test_empty_tag_leaf_with_attributes_fails() {
        let node = HtmlNode::leaf("", "oops").with_attribute("href", "x");
        assert_eq!(
            node.serialize(),
            Err(RenderError::LeafRequiresTagForAttributes)
        );
    }

    #[test]
    fn test_value_is_not_escaped() {
        let node = HtmlNode::leaf("b", "<script>&");
        assert_eq!(node.serialize().unwrap(), "<b><script>&</b>");
    }

    #[test]
    fn test_parent_with_children() {
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
    fn test_nested_parents() {
        let node = HtmlNode::parent(
            "div",
            vec![HtmlNode::parent("span", vec![HtmlNode::leaf("b", "grandchild")])],
        );
        assert_eq!(
            node.serialize().unwrap(),
            "<div><span><b>grandchild</b></span></div>"
        );
    }

    #[test]
    fn test_parent_with_attributes() {
        let node = HtmlNode::parent("div", vec![HtmlNode::text("x")])
            .with_attribute("class", "note");
        assert_eq!(node.serialize().unwrap(), r#"<div class="note">x</div>"#);
    }

    #[test]
    fn test_parent_with_empty_children() {
        let node = HtmlNode::parent("ul", Vec::new());
        assert_eq!(node.serialize().unwrap(), "<ul></ul>");
    }

    #[test]
    fn test_transparent_parent() {
        let node = HtmlNode::parent(
            "",
            vec![HtmlNode::leaf("b", "one"), HtmlNode::text(" two")],
        );
        assert_eq!(node.serialize().unwrap(), "<b>one</b> two");
        assert_eq!(HtmlNode::parent("", Vec::new()).serialize().unwrap(), "");
    }

    #[test]
    fn test_parent_without_tag_fails() {
        let node = HtmlNode::Parent {
            tag: None,
            children: Some(vec![HtmlNode::text("x")]),
            attributes: None,
        };
        assert_eq!(node.serialize(), Err(RenderError::MissingTag));
    }

    #[test]
    fn test_parent_without_children_fails() {
        let node = HtmlNode::Parent {
            tag: Some("div".to_owned()),
            children: None,
            attributes: None,
        };
        assert_eq!(node.serialize(), Err(RenderError::MissingChildren));
    }

    #[test]
    fn test_child_error_propagates() {
        let node = HtmlNode::parent(
            "div",
            vec![HtmlNode::Parent {
                tag: Some("p".to_owned()),
                children: None,
                attributes: None,
            }],
        );
        assert_eq!(node.serialize(), Err(RenderError::MissingChildren));
    }

    #[test]
    fn test_accessors() {
        let node = HtmlNode::parent("h1", vec![HtmlNode::text("Title")]);
        assert_eq!(node.tag(), Some("h1"));
        assert_eq!(node.value(), None);
        assert_eq!(node.children()[0].value(), Some("Title"));
        assert!(HtmlNode::text("x").children().is_empty());
    }
}
