//! Configuration options for the comment dialect

use crate::catalog::EmojiCatalog;

/// Alt label reserved for emoji embeds in the canonical form
pub const EMOJI_ALT: &str = "wechat_emoji";

/// How a `\n` inside a paragraph is rendered to HTML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineBreakStyle {
    /// Every newline is a visible `<br>`, matching the editor
    #[default]
    Hard,
    /// Newlines are kept as whitespace (CommonMark soft breaks)
    Soft,
}

/// Options shared by serialization, parsing and rendering
#[derive(Debug, Clone)]
pub struct Options {
    /// Alt label of the emoji token
    pub emoji_alt: String,

    /// CSS class put on rendered emoji images
    pub emoji_class: String,

    /// Trusted emoji sources
    pub catalog: EmojiCatalog,

    /// Line break rendering
    pub line_break_style: LineBreakStyle,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            emoji_alt: EMOJI_ALT.to_string(),
            emoji_class: "inline-emoji".to_string(),
            catalog: EmojiCatalog::wechat(),
            line_break_style: LineBreakStyle::Hard,
        }
    }
}
