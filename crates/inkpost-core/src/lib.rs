//! inkpost-core - restricted comment markdown
//!
//! This crate owns the comment content dialect: plain text, line breaks,
//! pipe tables on read, and one inline embed, an emoji image from a fixed
//! catalog written as `![wechat_emoji](<url>) `. It is used by `inkpost`
//! (the editable surface) and by anything that renders stored comments.
//!
//! # Architecture
//!
//! ```text
//! Editable surface ──rules──▶ ┌──────────┐ ──serialize──▶ stored markdown
//!                             │ Segments │                      │
//!                             └──────────┘                 deserialize
//!                                                               ▼
//!                       HTML ◀──render_html── ┌─────────────────────┐
//!                                             │ Block / Inline tree │
//!                                             └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use inkpost_core::{deserialize, render_html, serialize, Options, Segment};
//!
//! let options = Options::default();
//! let url = options.catalog.url(3).unwrap();
//!
//! let segments = vec![
//!     Segment::text("Hello "),
//!     Segment::emoji(url.clone()),
//!     Segment::text(" world"),
//! ];
//!
//! let markdown = serialize(&segments, &options);
//! assert_eq!(markdown, format!("Hello ![wechat_emoji]({})  world", url));
//!
//! let html = render_html(&deserialize(&markdown, &options), &options);
//! assert!(html.contains("<img"));
//! ```

mod ast;
mod catalog;
mod options;
mod parse;
mod render;
mod serialize;

pub use ast::{normalize_segments, Block, Inline, Segment};
pub use catalog::{CatalogError, EmojiCatalog, WECHAT_EMOJI_BASE_URL, WECHAT_EMOJI_COUNT};
pub use options::{LineBreakStyle, Options, EMOJI_ALT};
pub use parse::{deserialize, parse_inlines};
pub use render::{escape_html, render_html};
pub use serialize::{serialize, write_emoji_token};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn segment_strategy() -> impl Strategy<Value = Segment> {
        let catalog = EmojiCatalog::wechat();
        prop_oneof![
            // No `|`: pipe-table-shaped text reads back as a table
            "[a-zA-Z0-9 ,.?\n\t-]{1,12}".prop_map(Segment::Text),
            (0..WECHAT_EMOJI_COUNT).prop_map(move |n| {
                Segment::emoji(catalog.url(n).unwrap_or_default())
            }),
        ]
    }

    proptest! {
        #[test]
        fn round_trip_preserves_segments(
            segments in proptest::collection::vec(segment_strategy(), 0..12),
        ) {
            let options = Options::default();
            let markdown = serialize(&segments, &options);
            let parsed = deserialize(&markdown, &options).segments();

            // The token's own trailing space becomes text on read
            let mut expected = Vec::new();
            for segment in &segments {
                expected.push(segment.clone());
                if matches!(segment, Segment::Emoji { .. }) {
                    expected.push(Segment::text(" "));
                }
            }
            prop_assert_eq!(parsed, normalize_segments(expected));
        }

        #[test]
        fn serialize_is_idempotent(
            segments in proptest::collection::vec(segment_strategy(), 0..12),
        ) {
            let options = Options::default();
            prop_assert_eq!(serialize(&segments, &options), serialize(&segments, &options));
        }

        #[test]
        fn deserialize_never_panics(input in "\\PC{0,64}") {
            let options = Options::default();
            let _ = render_html(&deserialize(&input, &options), &options);
        }
    }
}
