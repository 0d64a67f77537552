//! # inkpost
//!
//! An editable comment surface with inline emoji images, serialized to the
//! restricted markdown dialect of [`inkpost_core`].
//!
//! ## Design
//!
//! The surface is an owned [`Node`] tree that changes only through [`Editor`]
//! operations. Cursors are explicit [`Position`] / [`Selection`] values in
//! DOM boundary-point form, so the same behavior is testable without a
//! browser. Normalization is rule based ([`Rules`]): whatever shape the line
//! breaks take (`<br>`, `<div>`, `<p>`, `<div><br></div>`), they collapse to
//! `\n`, and only images from the trusted emoji catalog become embed tokens.
//!
//! ## Example
//!
//! ```rust
//! use inkpost::Editor;
//!
//! let mut editor = Editor::new();
//! let caret = editor.insert_text("Hello ", None);
//! let caret = editor.insert_catalog_embed(3, Some(&caret.into())).unwrap();
//! editor.insert_text(" world", Some(&caret.into()));
//!
//! assert_eq!(
//!     editor.markdown(),
//!     "Hello ![wechat_emoji](https://res.wx.qq.com/mpres/htmledition/images/icon/emotion/3.gif)  world"
//! );
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use inkpost::Serializer;
//!
//! let serializer = Serializer::new();
//! let markdown = serializer.serialize_html("<div>one</div><div><br></div><div>two</div>");
//! assert_eq!(markdown, "one\n\ntwo");
//! ```

pub mod cursor;
mod editor;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod rules;
mod service;
mod surface;
mod utilities;

pub use cursor::{DeleteDirection, Deletion, Position, Selection};
pub use editor::Editor;
#[cfg(feature = "html")]
pub use html::{parse_fragment, parse_html};
pub use node::{Element, Node};
pub use rules::{Filter, Rule, Rules};
pub use service::Serializer;
pub use surface::Surface;
pub use utilities::*;

/// Error type for editor operations
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Invalid position: path {:?}, offset {}", .0.path, .0.offset)]
    InvalidPosition(Position),
}

pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use inkpost_core::{deserialize, normalize_segments, Options, Segment};
    use proptest::prelude::*;

    const BASE: &str = "https://res.wx.qq.com/mpres/htmledition/images/icon/emotion/";
    const FOREIGN: &str = "https://evil.example/track.gif";

    fn leaf_strategy() -> impl Strategy<Value = Node> {
        prop_oneof![
            "[a-z ]{0,6}".prop_map(|s| Node::text(&s)),
            Just(Node::line_break()),
            (0usize..50).prop_map(|n| Node::emoji(&format!("{}{}.gif", BASE, n), &Options::default())),
            Just(Node::element_with_attrs("img", vec![("src", FOREIGN), ("alt", "x")])),
            Just(Node::element_with_attrs("img", vec![("src", FOREIGN)])),
        ]
    }

    fn tree_strategy() -> impl Strategy<Value = Node> {
        leaf_strategy().prop_recursive(4, 48, 6, |inner| {
            (
                prop_oneof![Just("div"), Just("p"), Just("span")],
                prop::collection::vec(inner, 0..6),
            )
                .prop_map(|(tag, children)| {
                    let mut node = Node::element(tag);
                    for child in children {
                        node.add_child(child);
                    }
                    node
                })
        })
    }

    fn surface_strategy() -> impl Strategy<Value = Node> {
        prop::collection::vec(tree_strategy(), 0..6).prop_map(|children| {
            let mut root = Node::surface_root();
            for child in children {
                root.add_child(child);
            }
            root
        })
    }

    /// What reading serialized segments back yields: each token's trailing
    /// space becomes text
    fn as_reread(segments: &[Segment]) -> Vec<Segment> {
        let mut out = Vec::new();
        for segment in segments {
            out.push(segment.clone());
            if matches!(segment, Segment::Emoji { .. }) {
                out.push(Segment::text(" "));
            }
        }
        normalize_segments(out)
    }

    proptest! {
        #[test]
        fn nested_wrappers_serialize_cleanly(root in surface_strategy()) {
            let serializer = Serializer::new();
            let markdown = serializer.serialize(&root);

            prop_assert_eq!(markdown.trim(), markdown.as_str());
            prop_assert_eq!(&markdown, &serializer.serialize(&root));
            prop_assert!(!markdown.contains(FOREIGN));
        }

        #[test]
        fn round_trip_keeps_text_and_embeds(root in surface_strategy()) {
            let serializer = Serializer::new();
            let options = Options::default();
            let segments = serializer.segments(&root);
            let markdown = inkpost_core::serialize(&segments, &options);

            let reread = deserialize(&markdown, &options).segments();

            prop_assert_eq!(reread, as_reread(&segments));
        }

        #[test]
        fn empty_markdown_means_no_content(root in surface_strategy()) {
            let serializer = Serializer::new();
            let markdown = serializer.serialize(&root);
            let segments = serializer.segments(&root);
            prop_assert_eq!(markdown.is_empty(), segments.is_empty());
        }
    }

    #[test]
    fn test_scenario_round_trip() {
        let mut editor = Editor::new();
        let caret = editor.insert_text("Hello ", None);
        let caret = editor.insert_catalog_embed(3, Some(&caret.into())).unwrap();
        editor.insert_text(" world", Some(&caret.into()));

        let url = format!("{}3.gif", BASE);
        let options = Options::default();
        let reread = deserialize(editor.markdown(), &options).segments();
        assert_eq!(
            reread,
            vec![
                Segment::text("Hello "),
                Segment::emoji(url),
                Segment::text("  world"),
            ]
        );
    }

    #[test]
    fn test_blank_lines_survive_round_trip() {
        let options = Options::default();
        for typed in ["a\n\n\nb", "a\n \nb", "a\n\n\n\n \n\nb"] {
            let mut editor = Editor::new();
            editor.insert_text(typed, None);
            assert_eq!(editor.markdown(), typed);

            let reread = deserialize(editor.markdown(), &options).segments();
            assert_eq!(reread, vec![Segment::text(typed)]);
        }
    }

    #[test]
    fn test_error_display() {
        let err = EditorError::InvalidPosition(Position::new(vec![1, 2], 3));
        assert_eq!(err.to_string(), "Invalid position: path [1, 2], offset 3");
    }
}
