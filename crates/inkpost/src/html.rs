//! HTML parsing support.
//!
//! Turns pasted HTML into surface nodes. Script-like elements and comments
//! never reach the surface.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;
use crate::utilities::is_dropped;

/// Parse an HTML fragment into a surface root holding its nodes.
///
/// # Example
///
/// ```rust
/// use inkpost::{parse_html, Serializer};
///
/// let root = parse_html("<div>Hello</div><div><br></div><div>World</div>");
/// let markdown = Serializer::new().serialize(&root);
/// assert_eq!(markdown, "Hello\n\nWorld");
/// ```
pub fn parse_html(html: &str) -> Node {
    let mut root = Node::surface_root();
    for node in parse_fragment(html) {
        root.add_child(node);
    }
    root
}

/// Parse an HTML fragment into a list of top-level nodes
pub fn parse_fragment(html: &str) -> Vec<Node> {
    let document = Html::parse_fragment(html);
    convert_children(document.root_element())
}

fn convert_children(element: ElementRef) -> Vec<Node> {
    let mut nodes = Vec::new();

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => nodes.push(Node::text(&text.text)),
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    if !is_dropped(child_element.value().name()) {
                        nodes.push(convert_element(child_element));
                    }
                }
            }
            _ => {}
        }
    }

    nodes
}

fn convert_element(element: ElementRef) -> Node {
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Node::element_with_attrs(element.value().name(), attrs);

    for child in convert_children(element) {
        node.add_child(child);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment() {
        let nodes = parse_fragment("Hello <b>World</b>");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].text_value(), Some("Hello "));
        assert_eq!(nodes[1].tag_name(), "b");
        assert_eq!(nodes[1].text_content(), "World");
    }

    #[test]
    fn test_drops_scripts_and_comments() {
        let nodes = parse_fragment("a<script>alert(1)</script><!-- note --><style>p{}</style>b");
        let text: String = nodes.iter().map(Node::text_content).collect();
        assert_eq!(text, "ab");
        assert!(nodes.iter().all(|n| n.tag_name() == "#text"));
    }

    #[test]
    fn test_keeps_image_attributes() {
        let nodes = parse_fragment(r#"<img src="https://example.com/x.png" alt="x">"#);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].attr("src"), Some("https://example.com/x.png"));
        assert_eq!(nodes[0].attr("alt"), Some("x"));
    }

    #[test]
    fn test_parse_html_root() {
        let root = parse_html("<p>Hello World</p>");
        assert_eq!(root.tag_name(), "div");
        assert_eq!(root.attr("contenteditable"), Some("true"));
        assert_eq!(root.children().len(), 1);
    }
}
