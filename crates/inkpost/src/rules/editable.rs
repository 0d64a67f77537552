//! Built-in normalization rules for contenteditable content.
//!
//! Browsers disagree on how line breaks look inside an editable surface
//! (`<br>`, `<div>…</div>`, `<p>…</p>`, `<div><br></div>`). These rules
//! collapse every shape to `\n` and turn images into emoji tokens or their
//! alt text.

use inkpost_core::Segment;

use super::{Filter, Rule};
use crate::node::Node;
use crate::utilities::{clean_attribute, is_block};

/// Create all built-in rules, in matching order
pub fn editable_rules() -> Vec<Rule> {
    vec![
        empty_line_rule(),
        block_wrapper_rule(),
        line_break_rule(),
        emoji_rule(),
        image_rule(),
    ]
}

/// A wrapper holding nothing but a `<br>` is one blank line
fn empty_line_rule() -> Rule {
    Rule::new(
        Filter::predicate(|tag, node, _| is_block(tag) && holds_only_line_break(node)),
        |_, _, _| vec![Segment::text("\n")],
    )
}

/// Any other wrapper starts a new line and keeps its content
fn block_wrapper_rule() -> Rule {
    Rule::new(Filter::predicate(|tag, _, _| is_block(tag)), |_, content, _| {
        let mut segments = Vec::with_capacity(content.len() + 1);
        segments.push(Segment::text("\n"));
        segments.extend(content);
        segments
    })
}

fn line_break_rule() -> Rule {
    Rule::for_tag("br", |_, _, _| vec![Segment::text("\n")])
}

fn emoji_rule() -> Rule {
    Rule::new(
        Filter::predicate(|tag, node, options| {
            tag == "img" && options.catalog.recognizes(&clean_attribute(node.attr("src")))
        }),
        |node, _, _| vec![Segment::emoji(clean_attribute(node.attr("src")))],
    )
}

/// Images from anywhere else only contribute their label
fn image_rule() -> Rule {
    Rule::for_tag("img", |node, _, _| {
        let alt = clean_attribute(node.attr("alt"));
        if alt.is_empty() {
            Vec::new()
        } else {
            vec![Segment::Text(alt)]
        }
    })
}

fn holds_only_line_break(node: &Node) -> bool {
    let mut content = node
        .children()
        .iter()
        .filter(|c| !matches!(c, Node::Text(t) if t.is_empty()));

    matches!(
        (content.next(), content.next()),
        (Some(only), None) if only.tag_name() == "br"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_only_line_break() {
        let mut div = Node::element("div");
        div.add_child(Node::line_break());
        assert!(holds_only_line_break(&div));

        div.add_child(Node::text(""));
        assert!(holds_only_line_break(&div));

        div.add_child(Node::text("x"));
        assert!(!holds_only_line_break(&div));

        assert!(!holds_only_line_break(&Node::element("div")));
    }

    #[test]
    fn test_rule_order() {
        let rules = editable_rules();
        let options = inkpost_core::Options::default();

        let mut blank = Node::element("div");
        blank.add_child(Node::line_break());
        let matched: Vec<usize> = rules
            .iter()
            .enumerate()
            .filter(|(_, r)| r.matches(&blank, &options))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(matched, vec![0, 1]);
    }
}
