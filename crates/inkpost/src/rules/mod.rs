//! Rule system for surface normalization.

mod editable;
mod rule;

pub use editable::editable_rules;
pub use rule::{Filter, Rule};

use indexmap::IndexMap;
use inkpost_core::Options;

use crate::node::Node;
use crate::utilities::is_dropped;

/// Collection of rules for normalization
pub struct Rules {
    /// Custom rules added by the user (checked first)
    custom_rules: IndexMap<String, Rule>,
    /// Remove rules (drop the element and its content)
    remove_rules: Vec<Filter>,
    /// Built-in contenteditable rules
    editable_rules: Vec<Rule>,
}

impl Rules {
    /// Create a new Rules instance with the built-in rules.
    ///
    /// Script-like elements are removed by default.
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            remove_rules: vec![Filter::predicate(|tag, _, _| is_dropped(tag))],
            editable_rules: editable_rules(),
        }
    }

    /// Add a custom rule, replacing one with the same key
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Add a remove filter
    pub fn remove(&mut self, filter: Filter) {
        self.remove_rules.push(filter);
    }

    /// Find the appropriate rule for a node
    pub fn for_node<'a>(&'a self, node: &Node, options: &Options) -> Option<&'a Rule> {
        self.custom_rules
            .values()
            .chain(self.editable_rules.iter())
            .find(|rule| rule.matches(node, options))
    }

    /// Check if a node should be removed
    pub fn should_remove(&self, node: &Node, options: &Options) -> bool {
        // Custom rules win over removal
        if self
            .custom_rules
            .values()
            .any(|rule| rule.matches(node, options))
        {
            return false;
        }

        self.remove_rules
            .iter()
            .any(|filter| filter.matches(node, options))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpost_core::Segment;

    #[test]
    fn test_custom_rule_checked_first() {
        let mut rules = Rules::new();
        rules.add(
            "quote",
            Rule::for_tag("blockquote", |_, _, _| vec![Segment::text("> ")]),
        );

        let options = Options::default();
        let node = Node::element("blockquote");
        let rule = rules.for_node(&node, &options).expect("rule");
        assert_eq!(
            rule.replace(&node, Vec::new(), &options),
            vec![Segment::text("> ")]
        );
    }

    #[test]
    fn test_default_removals() {
        let rules = Rules::new();
        let options = Options::default();
        assert!(rules.should_remove(&Node::element("script"), &options));
        assert!(rules.should_remove(&Node::element("style"), &options));
        assert!(!rules.should_remove(&Node::element("span"), &options));
    }

    #[test]
    fn test_custom_rule_overrides_removal() {
        let mut rules = Rules::new();
        rules.add("keep-style", Rule::for_tag("style", |_, content, _| content));
        assert!(!rules.should_remove(&Node::element("style"), &Options::default()));
    }

    #[test]
    fn test_added_remove_filter() {
        let mut rules = Rules::new();
        rules.remove(Filter::predicate(|tag, node, _| {
            tag == "span" && node.attr("data-hidden").is_some()
        }));
        let hidden = Node::element_with_attrs("span", vec![("data-hidden", "")]);
        assert!(rules.should_remove(&hidden, &Options::default()));
        assert!(!rules.should_remove(&Node::element("span"), &Options::default()));
    }
}
