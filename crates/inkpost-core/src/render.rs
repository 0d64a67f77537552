//! HTML rendering of the render tree
//!
//! Produces the markup a comment list shows: paragraphs, line breaks, tables
//! and inline emoji images. All text is escaped; the only element carrying a
//! URL is an emoji image whose source the catalog recognizes.

use crate::ast::{Block, Inline};
use crate::options::{LineBreakStyle, Options};

/// Render a block tree to an HTML fragment
pub fn render_html(block: &Block, options: &Options) -> String {
    let mut output = String::with_capacity(256);
    render_block(block, options, &mut output);
    output
}

fn render_block(block: &Block, options: &Options, out: &mut String) {
    match block {
        Block::Document(blocks) => {
            for block in blocks {
                if !block.is_blank() {
                    render_block(block, options, out);
                }
            }
        }

        Block::Paragraph(inlines) => {
            out.push_str("<p>");
            render_inlines(inlines, options, out);
            out.push_str("</p>\n");
        }

        Block::Table { headers, rows } => render_table(headers, rows, options, out),
    }
}

fn render_table(headers: &[Vec<Inline>], rows: &[Vec<Vec<Inline>>], options: &Options, out: &mut String) {
    if headers.is_empty() {
        return;
    }

    out.push_str("<table>\n<thead>\n<tr>");
    for header in headers {
        out.push_str("<th>");
        render_inlines(header, options, out);
        out.push_str("</th>");
    }
    out.push_str("</tr>\n</thead>\n");

    if !rows.is_empty() {
        out.push_str("<tbody>\n");
        for row in rows {
            out.push_str("<tr>");
            for cell in row {
                out.push_str("<td>");
                render_inlines(cell, options, out);
                out.push_str("</td>");
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n");
    }

    out.push_str("</table>\n");
}

fn render_inlines(inlines: &[Inline], options: &Options, out: &mut String) {
    for inline in inlines {
        render_inline(inline, options, out);
    }
}

fn render_inline(inline: &Inline, options: &Options, out: &mut String) {
    match inline {
        Inline::Text(text) => push_escaped(text, out),

        Inline::Emoji { url } => {
            if !options.catalog.recognizes(url) {
                return;
            }
            out.push_str("<img src=\"");
            push_escaped(url, out);
            out.push_str("\" alt=\"");
            push_escaped(&options.emoji_alt, out);
            out.push_str("\" class=\"");
            push_escaped(&options.emoji_class, out);
            out.push_str("\" loading=\"lazy\">");
        }

        Inline::LineBreak => match options.line_break_style {
            LineBreakStyle::Hard => out.push_str("<br>\n"),
            LineBreakStyle::Soft => out.push('\n'),
        },
    }
}

/// Escape text for use in HTML content and double-quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    push_escaped(s, &mut out);
    out
}

fn push_escaped(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::deserialize;

    fn render(markdown: &str, options: &Options) -> String {
        render_html(&deserialize(markdown, options), options)
    }

    #[test]
    fn test_paragraph_with_emoji() {
        let options = Options::default();
        let url = options.catalog.url(3).unwrap();
        let html = render(&format!("Hello ![wechat_emoji]({}) world", url), &options);
        assert_eq!(
            html,
            format!(
                "<p>Hello <img src=\"{}\" alt=\"wechat_emoji\" class=\"inline-emoji\" loading=\"lazy\"> world</p>\n",
                url
            )
        );
    }

    #[test]
    fn test_line_breaks() {
        let options = Options::default();
        assert_eq!(render("a\nb", &options), "<p>a<br>\nb</p>\n");

        let soft = Options {
            line_break_style: LineBreakStyle::Soft,
            ..Default::default()
        };
        assert_eq!(render("a\nb", &soft), "<p>a\nb</p>\n");
    }

    #[test]
    fn test_text_is_escaped() {
        let options = Options::default();
        assert_eq!(
            render("<script>alert('x')</script> & \"q\"", &options),
            "<p>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; &quot;q&quot;</p>\n"
        );
    }

    #[test]
    fn test_unrecognized_emoji_node_not_rendered() {
        let options = Options::default();
        let block = Block::Paragraph(vec![
            Inline::Text("x".to_string()),
            Inline::Emoji {
                url: "https://evil.example.com/a.gif".to_string(),
            },
        ]);
        assert_eq!(render_html(&block, &options), "<p>x</p>\n");
    }

    #[test]
    fn test_table() {
        let options = Options::default();
        let html = render("| a | b |\n| - | - |\n| 1 | 2 |", &options);
        assert_eq!(
            html,
            "<table>\n<thead>\n<tr><th>a</th><th>b</th></tr>\n</thead>\n<tbody>\n<tr><td>1</td><td>2</td></tr>\n</tbody>\n</table>\n"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>\"c\""), "a&lt;b&gt;&quot;c&quot;");
    }
}
