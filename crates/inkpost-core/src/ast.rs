//! Comment content model
//!
//! Two shapes live here. [`Segment`] is the write-side model: the linear
//! sequence of text and emoji an editable surface normalizes to. [`Block`]
//! and [`Inline`] form the read-side render tree produced by
//! [`deserialize`](crate::deserialize).

/// One unit of editable content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, may contain `\n`
    Text(String),

    /// Atomic emoji embed identified by its image URL
    Emoji { url: String },
}

impl Segment {
    pub fn text(value: impl Into<String>) -> Self {
        Segment::Text(value.into())
    }

    pub fn emoji(url: impl Into<String>) -> Self {
        Segment::Emoji { url: url.into() }
    }

    /// Check if this segment carries no visible content
    pub fn is_blank(&self) -> bool {
        match self {
            Segment::Text(text) => text.trim().is_empty(),
            Segment::Emoji { .. } => false,
        }
    }
}

/// Merge adjacent text, drop empty text and trim whitespace at both ends.
///
/// Two segment sequences that serialize to the same canonical string
/// normalize to the same sequence.
pub fn normalize_segments(segments: impl IntoIterator<Item = Segment>) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();

    for segment in segments {
        match segment {
            Segment::Text(text) if text.is_empty() => {}
            Segment::Text(text) => match out.last_mut() {
                Some(Segment::Text(prev)) => prev.push_str(&text),
                _ => out.push(Segment::Text(text)),
            },
            emoji => out.push(emoji),
        }
    }

    if let Some(Segment::Text(first)) = out.first_mut() {
        let trimmed = first.trim_start();
        if trimmed.len() != first.len() {
            *first = trimmed.to_string();
        }
    }
    if let Some(Segment::Text(last)) = out.last_mut() {
        let trimmed = last.trim_end();
        if trimmed.len() != last.len() {
            *last = trimmed.to_string();
        }
    }
    out.retain(|s| !matches!(s, Segment::Text(t) if t.is_empty()));
    out
}

/// A block-level render node
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Root document container
    Document(Vec<Block>),

    /// Paragraph containing inline content
    Paragraph(Vec<Inline>),

    /// Pipe table with a header row and body rows
    Table {
        headers: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
}

/// An inline render node
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// Plain text
    Text(String),

    /// Emoji image from the trusted catalog
    Emoji { url: String },

    /// Line break inside a paragraph
    LineBreak,
}

impl Block {
    /// Check if this block is empty/blank
    pub fn is_blank(&self) -> bool {
        match self {
            Block::Document(blocks) => blocks.iter().all(|b| b.is_blank()),
            Block::Paragraph(inlines) => inlines.iter().all(|i| i.is_blank()),
            Block::Table { headers, rows } => {
                headers.iter().all(|h| h.iter().all(|i| i.is_blank()))
                    && rows
                        .iter()
                        .all(|r| r.iter().all(|c| c.iter().all(|i| i.is_blank())))
            }
        }
    }

    /// Flatten the render tree back to segments in reading order.
    ///
    /// Paragraphs are separated by a blank line, line breaks become `\n`,
    /// table cells are separated by a tab and table rows by `\n`.
    pub fn segments(&self) -> Vec<Segment> {
        let mut out = Vec::new();
        self.push_segments(&mut out);
        normalize_segments(out)
    }

    fn push_segments(&self, out: &mut Vec<Segment>) {
        match self {
            Block::Document(blocks) => {
                for (i, block) in blocks.iter().enumerate() {
                    if i > 0 {
                        out.push(Segment::text("\n\n"));
                    }
                    block.push_segments(out);
                }
            }
            Block::Paragraph(inlines) => push_inline_segments(inlines, out),
            Block::Table { headers, rows } => {
                push_row_segments(headers, out);
                for row in rows {
                    out.push(Segment::text("\n"));
                    push_row_segments(row, out);
                }
            }
        }
    }
}

fn push_row_segments(cells: &[Vec<Inline>], out: &mut Vec<Segment>) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(Segment::text("\t"));
        }
        push_inline_segments(cell, out);
    }
}

fn push_inline_segments(inlines: &[Inline], out: &mut Vec<Segment>) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push(Segment::text(text.clone())),
            Inline::Emoji { url } => out.push(Segment::emoji(url.clone())),
            Inline::LineBreak => out.push(Segment::text("\n")),
        }
    }
}

impl Inline {
    /// Check if this inline is empty/blank
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::Text(text) => text.trim().is_empty(),
            Inline::Emoji { .. } => false,
            Inline::LineBreak => true,
        }
    }
}
