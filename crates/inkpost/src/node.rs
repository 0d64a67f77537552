//! DOM-like node tree backing the editable surface.
//!
//! The tree mirrors what a contenteditable element holds: text nodes, line
//! breaks, block wrappers produced by the browser or by paste, and emoji
//! images. Nodes are addressed by child-index paths from the surface root.

use indexmap::IndexMap;
use inkpost_core::{escape_html, Options};

use crate::utilities::is_void;

/// A node of the editable surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with a lowercase tag, ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Node::Element(Element {
            tag: tag_name.to_lowercase(),
            ..Default::default()
        })
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        Node::Element(Element {
            tag: tag_name.to_lowercase(),
            attributes: attrs
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v.to_string()))
                .collect(),
            children: Vec::new(),
        })
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    /// A `<br>` line break
    pub fn line_break() -> Self {
        Node::element("br")
    }

    /// An atomic, non-editable emoji image labelled and classed per the
    /// dialect options
    pub fn emoji(url: &str, options: &Options) -> Self {
        Node::element_with_attrs(
            "img",
            vec![
                ("src", url),
                ("alt", &options.emoji_alt),
                ("class", &options.emoji_class),
                ("contenteditable", "false"),
            ],
        )
    }

    /// The contenteditable root of an empty surface
    pub fn surface_root() -> Self {
        Node::element_with_attrs("div", vec![("contenteditable", "true")])
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Lowercase tag name, `#text` for text nodes
    pub fn tag_name(&self) -> &str {
        match self {
            Node::Element(el) => &el.tag,
            Node::Text(_) => "#text",
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element(el) => el
                .attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            Node::Text(_) => None,
        }
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute, replacing an existing value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Node::Element(el) = self {
            el.attributes.insert(name.to_lowercase(), value.to_string());
        }
    }

    /// Text of a text node
    pub fn text_value(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    /// Length in characters of a text node, zero for elements
    pub fn char_len(&self) -> usize {
        self.text_value().map_or(0, |t| t.chars().count())
    }

    /// Get all child nodes
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(el) => &el.children,
            Node::Text(_) => &[],
        }
    }

    /// Mutable children; `None` for text nodes
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Element(el) => Some(&mut el.children),
            Node::Text(_) => None,
        }
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().iter().filter(|n| n.is_element())
    }

    /// Add a child node; ignored on text nodes
    pub fn add_child(&mut self, child: Node) {
        if let Some(children) = self.children_mut() {
            children.push(child);
        }
    }

    /// Descendant at `path`, the node itself for an empty path
    pub fn get(&self, path: &[usize]) -> Option<&Node> {
        path.iter()
            .try_fold(self, |node, &i| node.children().get(i))
    }

    /// Mutable descendant at `path`
    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let mut node = self;
        for &i in path {
            node = node.children_mut()?.get_mut(i)?;
        }
        Some(node)
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(el) => el.children.iter().map(|c| c.text_content()).collect(),
        }
    }

    /// Check if this is a void element (`br`, `img`, ...)
    pub fn is_void_element(&self) -> bool {
        match self {
            Node::Element(el) => is_void(&el.tag),
            Node::Text(_) => false,
        }
    }

    /// Reconstruct outer HTML
    pub fn outer_html(&self) -> String {
        match self {
            Node::Text(text) => escape_html(text),
            Node::Element(el) => {
                let mut out = String::new();
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attributes {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_html(value));
                        out.push('"');
                    }
                }
                out.push('>');

                if !self.is_void_element() {
                    out.push_str(&self.inner_html());
                    out.push_str("</");
                    out.push_str(&el.tag);
                    out.push('>');
                }
                out
            }
        }
    }

    /// Reconstruct inner HTML
    pub fn inner_html(&self) -> String {
        self.children().iter().map(|c| c.outer_html()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element() {
        let node = Node::element("DIV");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "div");
    }

    #[test]
    fn test_create_text() {
        let node = Node::text("Hello World");
        assert!(node.is_text());
        assert_eq!(node.text_content(), "Hello World");
        assert_eq!(node.char_len(), 11);
    }

    #[test]
    fn test_attributes() {
        let mut node = Node::element_with_attrs("img", vec![("SRC", "a.gif"), ("alt", "A")]);
        assert_eq!(node.attr("src"), Some("a.gif"));
        assert_eq!(node.attr("Alt"), Some("A"));
        assert_eq!(node.attr("class"), None);

        node.set_attr("alt", "B");
        assert_eq!(node.attr("alt"), Some("B"));
        assert!(!Node::text("x").has_attr("src"));
    }

    #[test]
    fn test_paths() {
        let mut root = Node::element("div");
        let mut p = Node::element("p");
        p.add_child(Node::text("inner"));
        root.add_child(Node::text("a"));
        root.add_child(p);

        assert_eq!(root.get(&[1, 0]).and_then(|n| n.text_value()), Some("inner"));
        assert!(root.get(&[2]).is_none());
        assert!(root.get(&[0, 0]).is_none());

        if let Some(Node::Text(t)) = root.get_mut(&[0]) {
            t.push('b');
        }
        assert_eq!(root.text_content(), "abinner");
        assert_eq!(root.element_children().count(), 1);
    }

    #[test]
    fn test_outer_html() {
        let mut div = Node::element("div");
        div.add_child(Node::text("a < b"));
        div.add_child(Node::line_break());
        assert_eq!(div.outer_html(), "<div>a &lt; b<br></div>");
    }

    #[test]
    fn test_emoji_node() {
        let img = Node::emoji("https://res.wx.qq.com/1.gif", &Options::default());
        assert!(img.is_void_element());
        assert_eq!(
            img.outer_html(),
            "<img src=\"https://res.wx.qq.com/1.gif\" alt=\"wechat_emoji\" class=\"inline-emoji\" contenteditable=\"false\">"
        );

        let options = Options {
            emoji_alt: "smiley".to_string(),
            emoji_class: "emote".to_string(),
            ..Options::default()
        };
        let img = Node::emoji("https://res.wx.qq.com/1.gif", &options);
        assert_eq!(img.attr("alt"), Some("smiley"));
        assert_eq!(img.attr("class"), Some("emote"));
    }
}
