// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render output: a small tree description.
//!
//! [`Widget::render`](crate::Widget::render) returns a [`Node`]. The tree is a
//! plain description with no templating rules of its own; the host decides how
//! to apply it. `Display` serializes it as markup, with text and attribute
//! values escaped.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// A node of a render tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(ElementNode),
    /// A text node.
    Text(String),
    /// A list of nodes without a wrapper.
    Fragment(Vec<Node>),
}

impl Node {
    /// Starts building an element node.
    #[must_use]
    pub fn element(tag: impl Into<String>) -> ElementNode {
        ElementNode::new(tag)
    }

    /// Creates a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a fragment.
    #[must_use]
    pub fn fragment(children: impl IntoIterator<Item = Self>) -> Self {
        Self::Fragment(children.into_iter().collect())
    }

    /// An empty fragment.
    #[must_use]
    pub fn empty() -> Self {
        Self::Fragment(Vec::new())
    }

    /// The tree committed when a render fails.
    #[must_use]
    pub fn render_error(message: &str) -> Self {
        Self::element("div")
            .attr("style", "color: red; padding: 1rem;")
            .text(format!("Render error: {message}"))
            .into()
    }

    /// Returns the element, if this is an element node.
    #[must_use]
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Concatenates all text in the subtree.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            Self::Fragment(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<ElementNode> for Node {
    fn from(element: ElementNode) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// An element node, also used as its own builder.
///
/// # Example
///
/// ```rust
/// use understory_element::Node;
///
/// let node: Node = Node::element("span")
///     .attr("class", "label")
///     .text("a < b")
///     .into();
/// assert_eq!(node.to_string(), r#"<span class="label">a &lt; b</span>"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementNode {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl ElementNode {
    /// Creates an element with no attributes or children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing an earlier value of the same name.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let (name, value) = (name.into(), value.into());
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Appends a child.
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends several children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Appends a text child.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Returns the tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over `(name, value)` attributes.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the children.
    #[must_use]
    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str, attribute: bool) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' if attribute => f.write_str("&quot;")?,
            c => fmt::Write::write_char(f, c)?,
        }
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(element) => fmt::Display::fmt(element, f),
            Self::Text(text) => write_escaped(f, text, false),
            Self::Fragment(children) => children
                .iter()
                .try_for_each(|child| fmt::Display::fmt(child, f)),
        }
    }
}

impl fmt::Display for ElementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attributes {
            write!(f, " {name}=\"")?;
            write_escaped(f, value, true)?;
            f.write_str("\"")?;
        }
        f.write_str(">")?;
        for child in &self.children {
            fmt::Display::fmt(child, f)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_escapes_text_and_attributes() {
        let node: Node = Node::element("div")
            .attr("title", "say \"hi\" & go")
            .child(Node::element("b").text("<x>"))
            .text(" tail")
            .into();
        assert_eq!(
            node.to_string(),
            r#"<div title="say &quot;hi&quot; &amp; go"><b>&lt;x&gt;</b> tail</div>"#
        );
        assert_eq!(node.text_content(), "<x> tail");
    }

    #[test]
    fn attr_replaces_same_name() {
        let element = Node::element("i").attr("a", "1").attr("a", "2");
        assert_eq!(element.attribute("a"), Some("2"));
        assert_eq!(element.attributes().count(), 1);
    }

    #[test]
    fn fragments_flatten_in_markup() {
        let node = Node::fragment([Node::text("a"), Node::element("br").into(), "b".into()]);
        assert_eq!(node.to_string(), "a<br></br>b");
        assert_eq!(Node::empty().to_string(), "");
    }

    #[test]
    fn render_error_tree() {
        let node = Node::render_error("boom");
        let element = node.as_element().unwrap();
        assert_eq!(element.tag(), "div");
        assert_eq!(element.attribute("style"), Some("color: red; padding: 1rem;"));
        assert_eq!(node.text_content(), "Render error: boom");
        assert_eq!(element.child_nodes().len(), 1);
    }
}
