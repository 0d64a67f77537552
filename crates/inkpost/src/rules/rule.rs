//! Filters pick the surface elements a rule handles; rules turn them into
//! segments.

use inkpost_core::{Options, Segment};

use crate::node::Node;

/// Builds the segments for a matched element from the element itself, the
/// segments its children produced, and the dialect options
pub type ReplacementFn = Box<dyn Fn(&Node, Vec<Segment>, &Options) -> Vec<Segment> + Send + Sync>;

type PredicateFn = Box<dyn Fn(&str, &Node, &Options) -> bool + Send + Sync>;

pub enum Filter {
    /// Exactly one (lowercase) tag
    Tag(String),
    /// Called with the lowercase tag, the element and the options
    Predicate(PredicateFn),
}

impl Filter {
    pub fn tag(name: &str) -> Self {
        Filter::Tag(name.to_lowercase())
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str, &Node, &Options) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Text nodes never match
    pub fn matches(&self, node: &Node, options: &Options) -> bool {
        if !node.is_element() {
            return false;
        }
        match self {
            Filter::Tag(tag) => node.tag_name() == tag.as_str(),
            Filter::Predicate(f) => f(node.tag_name(), node, options),
        }
    }
}

pub struct Rule {
    filter: Filter,
    replacement: ReplacementFn,
}

impl Rule {
    pub fn new<F>(filter: Filter, replacement: F) -> Self
    where
        F: Fn(&Node, Vec<Segment>, &Options) -> Vec<Segment> + Send + Sync + 'static,
    {
        Self {
            filter,
            replacement: Box::new(replacement),
        }
    }

    pub fn for_tag<F>(tag: &str, replacement: F) -> Self
    where
        F: Fn(&Node, Vec<Segment>, &Options) -> Vec<Segment> + Send + Sync + 'static,
    {
        Self::new(Filter::tag(tag), replacement)
    }

    pub fn matches(&self, node: &Node, options: &Options) -> bool {
        self.filter.matches(node, options)
    }

    pub fn replace(&self, node: &Node, content: Vec<Segment>, options: &Options) -> Vec<Segment> {
        (self.replacement)(node, content, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_filter_ignores_text_nodes() {
        let options = Options::default();
        let filter = Filter::tag("SPAN");

        assert!(filter.matches(&Node::element("span"), &options));
        assert!(!filter.matches(&Node::element("div"), &options));
        assert!(!filter.matches(&Node::text("span"), &options));
    }

    #[test]
    fn test_predicate_sees_lowercase_tag() {
        let options = Options::default();
        let filter = Filter::predicate(|tag, node, _| tag == "a" && node.has_attr("href"));

        assert!(filter.matches(
            &Node::element_with_attrs("A", vec![("href", "#")]),
            &options
        ));
        assert!(!filter.matches(&Node::element("a"), &options));
    }
}
