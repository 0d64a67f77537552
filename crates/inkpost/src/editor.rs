//! The comment editor: a surface, its serializer and the derived markdown.
//!
//! Every mutating operation takes the cursor explicitly and returns where
//! the cursor ends up. The canonical markdown is recomputed after each
//! mutation, so [`Editor::markdown`] never walks the tree.

use inkpost_core::Segment;

use crate::cursor::{DeleteDirection, Deletion, Position, Selection};
use crate::node::Node;
use crate::service::Serializer;
use crate::surface::{shift_after_removal, Surface};
use crate::utilities::clean_attribute;
use crate::Result;

pub struct Editor {
    surface: Surface,
    serializer: Serializer,
    markdown: String,
}

impl Editor {
    /// An empty editor with the default dialect
    pub fn new() -> Self {
        Self::with_serializer(Serializer::new())
    }

    pub fn with_serializer(serializer: Serializer) -> Self {
        Self::with_surface(Surface::new(), serializer)
    }

    /// Start from existing content
    pub fn with_surface(surface: Surface, serializer: Serializer) -> Self {
        let mut editor = Self {
            surface,
            serializer,
            markdown: String::new(),
        };
        editor.refresh();
        editor
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn root(&self) -> &Node {
        self.surface.root()
    }

    pub fn serializer(&self) -> &Serializer {
        &self.serializer
    }

    /// The canonical form of the current content
    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.serializer.segments(self.surface.root())
    }

    /// True when there is nothing to submit
    pub fn is_empty(&self) -> bool {
        self.markdown.is_empty()
    }

    pub fn clear(&mut self) {
        self.surface.clear();
        self.refresh();
    }

    /// Insert literal text, replacing an active selection. Each `\n`
    /// becomes a `<br>`.
    pub fn insert_text(&mut self, text: &str, selection: Option<&Selection>) -> Position {
        let mut caret = self.insertion_caret(selection);
        let text = text.replace("\r\n", "\n");

        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                caret = self.place_node(&caret, Node::line_break());
            }
            if !line.is_empty() {
                caret = self.place_text(&caret, line);
            }
        }

        self.refresh();
        caret
    }

    pub fn insert_line_break(&mut self, selection: Option<&Selection>) -> Position {
        let caret = self.insertion_caret(selection);
        let caret = self.place_node(&caret, Node::line_break());
        self.refresh();
        caret
    }

    /// Insert one atomic emoji image.
    ///
    /// An active selection is deleted first. The returned cursor sits in the
    /// parent container right after the image, never inside it. Without a
    /// usable cursor the image is appended. A URL outside the catalog is not
    /// inserted.
    pub fn insert_embed(&mut self, url: &str, selection: Option<&Selection>) -> Position {
        let caret = self.insertion_caret(selection);

        let caret = if self.serializer.options().catalog.recognizes(url) {
            let node = Node::emoji(url, self.serializer.options());
            self.place_node(&caret, node)
        } else {
            caret
        };

        self.refresh();
        caret
    }

    /// Insert catalog entry `index`; `None` when the index is out of range
    pub fn insert_catalog_embed(
        &mut self,
        index: usize,
        selection: Option<&Selection>,
    ) -> Option<Position> {
        let url = self.serializer.options().catalog.url(index)?;
        Some(self.insert_embed(&url, selection))
    }

    /// Parse pasted HTML and insert its nodes at the cursor
    #[cfg(feature = "html")]
    pub fn paste_html(&mut self, html: &str, selection: Option<&Selection>) -> Position {
        let mut caret = self.insertion_caret(selection);
        for node in crate::html::parse_fragment(html) {
            caret = self.place_node(&caret, node);
        }
        self.refresh();
        caret
    }

    pub fn delete_selection(&mut self, selection: &Selection) -> Result<Position> {
        let caret = self.surface.delete_selection(selection)?;
        self.refresh();
        Ok(caret)
    }

    /// Remove an emoji image as one unit on backspace.
    ///
    /// Applies only to a collapsed selection deleting backward whose
    /// preceding node is a recognized emoji. Both cursor shapes are handled:
    /// offset 0 of the text node after the image, and a container offset
    /// right after it. Anything else returns [`Deletion::Default`] and
    /// leaves the surface untouched.
    pub fn handle_atomic_deletion(
        &mut self,
        selection: &Selection,
        direction: DeleteDirection,
    ) -> Result<Deletion> {
        if direction != DeleteDirection::Backward || !self.surface.is_collapsed(selection)? {
            return Ok(Deletion::Default);
        }

        let caret = selection.caret();
        let Some(path) = self.surface.node_before(caret)? else {
            return Ok(Deletion::Default);
        };

        let url = match self.surface.root().get(&path) {
            Some(node) if self.serializer.is_embed(node) => clean_attribute(node.attr("src")),
            _ => return Ok(Deletion::Default),
        };

        self.surface.remove(&path);
        let cursor = shift_after_removal(caret, &path);
        self.refresh();

        Ok(Deletion::Atomic { url, cursor })
    }

    /// The delete key: atomic emoji removal first, then the selection, then
    /// one character or void element. Block wrappers are never merged.
    pub fn delete(&mut self, selection: &Selection, direction: DeleteDirection) -> Result<Position> {
        if let Deletion::Atomic { cursor, .. } = self.handle_atomic_deletion(selection, direction)? {
            return Ok(cursor);
        }

        let caret = if self.surface.is_collapsed(selection)? {
            self.surface.delete_adjacent(selection.caret(), direction)?
        } else {
            self.surface.delete_selection(selection)?
        };

        self.refresh();
        Ok(caret)
    }

    /// Collapse the selection for an insert; falls back to the end
    fn insertion_caret(&mut self, selection: Option<&Selection>) -> Position {
        match selection.map(|s| self.surface.delete_selection(s)) {
            Some(Ok(caret)) => caret,
            _ => self.surface.end(),
        }
    }

    fn place_node(&mut self, caret: &Position, node: Node) -> Position {
        if !self.surface.contains(caret) {
            return self.surface.append(node);
        }
        self.surface
            .insert_node(caret, node)
            .unwrap_or_else(|_| self.surface.end())
    }

    fn place_text(&mut self, caret: &Position, text: &str) -> Position {
        let caret = if self.surface.contains(caret) {
            caret.clone()
        } else {
            self.surface.end()
        };
        self.surface
            .insert_text(&caret, text)
            .unwrap_or_else(|_| self.surface.end())
    }

    fn refresh(&mut self) {
        self.markdown = self.serializer.serialize(self.surface.root());
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
