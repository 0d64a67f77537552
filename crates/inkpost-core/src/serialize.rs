//! Canonical serialization
//!
//! Converts a segment sequence into the restricted markdown string that is
//! stored as comment content.

use crate::ast::Segment;
use crate::options::Options;

/// Serialize segments to the canonical comment form.
///
/// Text is written verbatim. Each emoji becomes `![<alt>](<url>) `, the
/// trailing space keeping it separate from following text. Emoji whose URL
/// the catalog does not recognize are dropped. The result is trimmed, so an
/// empty string means there is nothing to submit.
pub fn serialize(segments: &[Segment], options: &Options) -> String {
    let mut output = String::with_capacity(segments.iter().map(segment_len_hint).sum());

    for segment in segments {
        serialize_segment(segment, options, &mut output);
    }

    trim_in_place(&mut output);
    output
}

/// Write a single emoji token, including its trailing space
pub fn write_emoji_token(url: &str, options: &Options, out: &mut String) {
    out.push_str("![");
    out.push_str(&options.emoji_alt);
    out.push_str("](");
    out.push_str(url);
    out.push_str(") ");
}

fn serialize_segment(segment: &Segment, options: &Options, out: &mut String) {
    match segment {
        Segment::Text(text) => out.push_str(text),
        Segment::Emoji { url } => {
            if options.catalog.recognizes(url) {
                write_emoji_token(url, options, out);
            }
        }
    }
}

fn segment_len_hint(segment: &Segment) -> usize {
    match segment {
        Segment::Text(text) => text.len(),
        Segment::Emoji { url } => url.len() + 20,
    }
}

fn trim_in_place(s: &mut String) {
    let end = s.trim_end().len();
    s.truncate(end);
    let start = s.len() - s.trim_start().len();
    if start > 0 {
        s.drain(..start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emoji_url(n: usize) -> String {
        Options::default().catalog.url(n).unwrap()
    }

    #[test]
    fn test_plain_text() {
        let segments = vec![Segment::text("Hello World")];
        assert_eq!(serialize(&segments, &Options::default()), "Hello World");
    }

    #[test]
    fn test_emoji_between_text() {
        let url = emoji_url(3);
        let segments = vec![
            Segment::text("Hello "),
            Segment::emoji(url.clone()),
            Segment::text(" world"),
        ];
        assert_eq!(
            serialize(&segments, &Options::default()),
            format!("Hello ![wechat_emoji]({})  world", url)
        );
    }

    #[test]
    fn test_trailing_emoji_space_trimmed() {
        let url = emoji_url(0);
        let segments = vec![Segment::text("hi "), Segment::emoji(url.clone())];
        assert_eq!(
            serialize(&segments, &Options::default()),
            format!("hi ![wechat_emoji]({})", url)
        );
    }

    #[test]
    fn test_adjacent_emoji() {
        let a = emoji_url(1);
        let b = emoji_url(2);
        let segments = vec![Segment::emoji(a.clone()), Segment::emoji(b.clone())];
        assert_eq!(
            serialize(&segments, &Options::default()),
            format!("![wechat_emoji]({}) ![wechat_emoji]({})", a, b)
        );
    }

    #[test]
    fn test_unrecognized_emoji_dropped() {
        let segments = vec![
            Segment::text("a"),
            Segment::emoji("https://evil.example.com/x.gif"),
            Segment::text("b"),
        ];
        assert_eq!(serialize(&segments, &Options::default()), "ab");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let segments = vec![Segment::text("\n"), Segment::text("   \n\t")];
        assert_eq!(serialize(&segments, &Options::default()), "");
        assert_eq!(serialize(&[], &Options::default()), "");
    }

    #[test]
    fn test_inner_newlines_kept() {
        let segments = vec![Segment::text("\nline one\n\nline two\n")];
        assert_eq!(
            serialize(&segments, &Options::default()),
            "line one\n\nline two"
        );
    }

    #[test]
    fn test_custom_alt() {
        let options = Options {
            emoji_alt: "sticker".to_string(),
            ..Default::default()
        };
        let url = emoji_url(5);
        let segments = vec![Segment::emoji(url.clone())];
        assert_eq!(serialize(&segments, &options), format!("![sticker]({})", url));
    }
}
