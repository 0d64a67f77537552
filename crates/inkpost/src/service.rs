//! Serializer - turns an editable surface into canonical comment markdown.

use inkpost_core::{normalize_segments, Options, Segment};

use crate::node::Node;
use crate::rules::{Filter, Rule, Rules};
use crate::utilities::clean_attribute;

/// Walks a surface tree with the normalization rules and writes the
/// canonical form
pub struct Serializer {
    options: Options,
    rules: Rules,
}

impl Serializer {
    /// Create a new Serializer with default options
    pub fn new() -> Self {
        Self {
            options: Options::default(),
            rules: Rules::new(),
        }
    }

    /// Create a Serializer with custom options
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// The normalized segment sequence of the surface below `root`.
    ///
    /// `root` itself is the editable container and contributes no line of
    /// its own, only its children are walked.
    pub fn segments(&self, root: &Node) -> Vec<Segment> {
        let segments = match root {
            Node::Text(_) => self.process_node(root),
            Node::Element(_) => self.process_children(root),
        };
        normalize_segments(segments)
    }

    /// Serialize a surface to the canonical string
    pub fn serialize(&self, root: &Node) -> String {
        inkpost_core::serialize(&self.segments(root), &self.options)
    }

    /// Parse an HTML fragment and serialize it
    #[cfg(feature = "html")]
    pub fn serialize_html(&self, html: &str) -> String {
        self.serialize(&crate::html::parse_html(html))
    }

    /// Add a custom rule
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Drop elements matching the filter, content included
    pub fn remove(&mut self, filter: Filter) -> &mut Self {
        self.rules.remove(filter);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Whether `node` is an image from the trusted emoji catalog
    pub fn is_embed(&self, node: &Node) -> bool {
        node.tag_name() == "img"
            && self
                .options
                .catalog
                .recognizes(&clean_attribute(node.attr("src")))
    }

    fn process_children(&self, node: &Node) -> Vec<Segment> {
        node.children()
            .iter()
            .flat_map(|child| self.process_node(child))
            .collect()
    }

    fn process_node(&self, node: &Node) -> Vec<Segment> {
        if let Node::Text(text) = node {
            return vec![Segment::text(text.as_str())];
        }

        if self.rules.should_remove(node, &self.options) {
            return Vec::new();
        }

        let content = self.process_children(node);

        match self.rules.for_node(node, &self.options) {
            Some(rule) => rule.replace(node, content, &self.options),
            None => content,
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}
