//! Restricted markdown parsing
//!
//! Turns stored comment content back into a render tree. The dialect knows
//! paragraphs, line breaks, pipe tables and the emoji token; everything else
//! is literal text. Parsing never fails.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Block, Inline};
use crate::options::Options;

static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]\n]*)\]\(([^()\s]*)\)").expect("valid image regex"));

static DELIMITER_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:?-+:?$").expect("valid delimiter regex"));

/// Parse comment markdown into a [`Block::Document`].
///
/// Only empty lines separate paragraphs, and every empty line past the first
/// in a run becomes a leading line break of the next paragraph, so
/// [`Block::segments`] gives back the exact text. Whitespace-only lines are
/// paragraph content. Blank paragraphs at either end of the document are
/// dropped.
pub fn deserialize(markdown: &str, options: &Options) -> Block {
    let normalized = markdown.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();
    let mut blocks = Vec::new();
    let mut empty_run: usize = 0;
    let mut i = 0;

    while i < lines.len() {
        if lines[i].is_empty() {
            empty_run += 1;
            i += 1;
            continue;
        }

        if let Some(columns) = table_columns(&lines, i) {
            let (table, next) = parse_table(&lines, i, columns, options);
            blocks.push(table);
            empty_run = 0;
            i = next;
            continue;
        }

        let start = i;
        i += 1;
        while i < lines.len() && !lines[i].is_empty() && table_columns(&lines, i).is_none() {
            i += 1;
        }

        let extra_breaks = if blocks.is_empty() {
            0
        } else {
            empty_run.saturating_sub(1)
        };
        empty_run = 0;

        let paragraph = parse_paragraph(&lines[start..i], extra_breaks, options);
        match &paragraph {
            Block::Paragraph(inlines) if inlines.is_empty() => {}
            _ if blocks.is_empty() && paragraph.is_blank() => {}
            _ => blocks.push(paragraph),
        }
    }

    while blocks
        .last()
        .is_some_and(|b| matches!(b, Block::Paragraph(_)) && b.is_blank())
    {
        blocks.pop();
    }

    Block::Document(blocks)
}

/// Parse a single line of inline content
pub fn parse_inlines(text: &str, options: &Options) -> Vec<Inline> {
    let mut out = Vec::new();
    push_inlines(text, options, &mut out);
    out
}

fn parse_paragraph(lines: &[&str], leading_breaks: usize, options: &Options) -> Block {
    let mut inlines = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            inlines.push(Inline::LineBreak);
        }
        push_inlines(line, options, &mut inlines);
    }

    if !inlines.is_empty() && leading_breaks > 0 {
        inlines.splice(0..0, std::iter::repeat(Inline::LineBreak).take(leading_breaks));
    }
    Block::Paragraph(inlines)
}

fn push_inlines(text: &str, options: &Options, out: &mut Vec<Inline>) {
    let mut last = 0;

    for caps in IMAGE.captures_iter(text) {
        let (Some(whole), Some(alt), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        push_text(&text[last..whole.start()], out);

        if alt.as_str() == options.emoji_alt && options.catalog.recognizes(url.as_str()) {
            out.push(Inline::Emoji {
                url: url.as_str().to_string(),
            });
        } else {
            // Foreign images only ever show their label
            push_text(alt.as_str(), out);
        }

        last = whole.end();
    }

    push_text(&text[last..], out);
}

fn push_text(text: &str, out: &mut Vec<Inline>) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(Inline::Text(prev)) => prev.push_str(text),
        _ => out.push(Inline::Text(text.to_string())),
    }
}

/// Column count if a table starts at `lines[i]`
fn table_columns(lines: &[&str], i: usize) -> Option<usize> {
    let header = lines.get(i)?;
    let delimiter = lines.get(i + 1)?;
    if !header.contains('|') || !delimiter.contains('|') {
        return None;
    }

    let delimiter_cells = split_row(delimiter);
    if delimiter_cells.is_empty() || !delimiter_cells.iter().all(|c| DELIMITER_CELL.is_match(c)) {
        return None;
    }

    let columns = split_row(header).len();
    (columns == delimiter_cells.len()).then_some(columns)
}

fn parse_table(lines: &[&str], start: usize, columns: usize, options: &Options) -> (Block, usize) {
    let headers = split_row(lines[start])
        .iter()
        .map(|cell| parse_inlines(cell, options))
        .collect();

    let mut rows = Vec::new();
    let mut i = start + 2;
    while i < lines.len() && !lines[i].is_empty() && lines[i].contains('|') {
        let mut row: Vec<Vec<Inline>> = split_row(lines[i])
            .iter()
            .take(columns)
            .map(|cell| parse_inlines(cell, options))
            .collect();
        row.resize_with(columns, Vec::new);
        rows.push(row);
        i += 1;
    }

    (Block::Table { headers, rows }, i)
}

/// Split a pipe table row into trimmed cells, honoring `\|` escapes
fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = match line.strip_suffix('|') {
        Some(rest) if !rest.ends_with('\\') => rest,
        _ => line,
    };

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                cell.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());
    cells
}
