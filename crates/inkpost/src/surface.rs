//! The editable surface and its tree edits.
//!
//! Edits work on boundary points ([`Position`]). For range work the surface
//! is flattened into its leaves (text nodes and void elements such as `br`
//! and `img`) in document order; a [`Point`] is a leaf index plus an offset
//! into that leaf, where a void element is one unit wide.

use crate::cursor::{DeleteDirection, Position, Selection};
use crate::node::Node;
use crate::utilities::byte_offset;
use crate::{EditorError, Result};

/// A location in the flattened leaf sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Point {
    leaf: usize,
    offset: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct Leaf {
    path: Vec<usize>,
    len: usize,
    atomic: bool,
}

enum Anchor {
    Text { path: Vec<usize> },
    Void { path: Vec<usize> },
    Container { path: Vec<usize> },
}

/// An owned contenteditable tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    root: Node,
}

impl Surface {
    /// An empty surface
    pub fn new() -> Self {
        Self {
            root: Node::surface_root(),
        }
    }

    /// Wrap an existing tree; anything but a container element is placed
    /// inside a fresh root
    pub fn from_root(root: Node) -> Self {
        if root.is_element() && !root.is_void_element() {
            return Self { root };
        }
        let mut wrapper = Node::surface_root();
        wrapper.add_child(root);
        Self { root: wrapper }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.children().is_empty()
    }

    /// Remove all content
    pub fn clear(&mut self) {
        if let Some(children) = self.root.children_mut() {
            children.clear();
        }
    }

    /// The point after the last child of the root
    pub fn end(&self) -> Position {
        Position::root(self.root.children().len())
    }

    /// Check whether `position` resolves inside this surface
    pub fn contains(&self, position: &Position) -> bool {
        self.locate(position).is_ok()
    }

    /// Append a node at the end; returns the point after it
    pub fn append(&mut self, node: Node) -> Position {
        self.root.add_child(node);
        self.end()
    }

    /// Insert `node` at `position`, splitting a text node when the position
    /// falls inside one. Returns the container point right after the node.
    pub fn insert_node(&mut self, position: &Position, node: Node) -> Result<Position> {
        let (parent, idx) = self.insertion_point(position)?;
        let children = self.children_at(&parent)?;
        let idx = idx.min(children.len());
        children.insert(idx, node);
        Ok(Position::new(parent, idx + 1))
    }

    /// Insert literal text at `position`, merging into a neighbouring text
    /// node when there is one. Returns the point after the inserted text.
    pub fn insert_text(&mut self, position: &Position, text: &str) -> Result<Position> {
        let inserted = text.chars().count();

        match self.locate(position)? {
            Anchor::Text { path } => {
                if let Some(Node::Text(existing)) = self.root.get_mut(&path) {
                    let at = byte_offset(existing, position.offset);
                    existing.insert_str(at, text);
                }
                Ok(Position::new(path, position.offset + inserted))
            }

            Anchor::Void { path } => {
                let (parent, idx) = split_path(&path);
                let after = Position::new(parent, idx + position.offset.min(1));
                self.insert_text(&after, text)
            }

            Anchor::Container { path } => {
                let k = position.offset;
                let children = self.children_at(&path)?;
                let mut child_path = path;

                if k > 0 {
                    if let Some(Node::Text(prev)) = children.get_mut(k - 1) {
                        let len = prev.chars().count();
                        prev.push_str(text);
                        child_path.push(k - 1);
                        return Ok(Position::new(child_path, len + inserted));
                    }
                }
                if let Some(Node::Text(next)) = children.get_mut(k) {
                    next.insert_str(0, text);
                    child_path.push(k);
                    return Ok(Position::new(child_path, inserted));
                }

                children.insert(k, Node::text(text));
                child_path.push(k);
                Ok(Position::new(child_path, inserted))
            }
        }
    }

    /// Check whether both ends of `selection` denote the same point
    pub fn is_collapsed(&self, selection: &Selection) -> Result<bool> {
        if selection.anchor == selection.focus {
            self.locate(&selection.focus)?;
            return Ok(true);
        }
        let leaves = self.leaves();
        Ok(self.point(&selection.anchor, &leaves)? == self.point(&selection.focus, &leaves)?)
    }

    /// Remove everything between the selection's ends.
    ///
    /// Text is cut by character, void elements go whole, wrappers stay.
    /// Returns the collapsed caret.
    pub fn delete_selection(&mut self, selection: &Selection) -> Result<Position> {
        let leaves = self.leaves();
        let anchor = self.point(&selection.anchor, &leaves)?;
        let focus = self.point(&selection.focus, &leaves)?;

        if anchor == focus {
            return Ok(selection.focus.clone());
        }

        let (start, end) = if anchor < focus {
            (anchor, focus)
        } else {
            (focus, anchor)
        };
        Ok(self.delete_points(start, end, &leaves))
    }

    /// Remove one character or void element next to `caret`
    pub fn delete_adjacent(&mut self, caret: &Position, direction: DeleteDirection) -> Result<Position> {
        let leaves = self.leaves();
        let point = self.point(caret, &leaves)?;

        let unit = match direction {
            DeleteDirection::Backward => previous_unit(point, &leaves),
            DeleteDirection::Forward => next_unit(point, &leaves),
        };

        Ok(match unit {
            Some((start, end)) => self.delete_points(start, end, &leaves),
            None => caret.clone(),
        })
    }

    /// Path of the node immediately before `caret`.
    ///
    /// A caret at offset 0 of a text node looks at the text node's previous
    /// sibling; a caret inside an element looks at the child before the
    /// offset.
    pub fn node_before(&self, caret: &Position) -> Result<Option<Vec<usize>>> {
        Ok(match self.locate(caret)? {
            Anchor::Text { path } if caret.offset == 0 => {
                let (mut parent, idx) = split_path(&path);
                idx.checked_sub(1).map(|prev| {
                    parent.push(prev);
                    parent
                })
            }
            Anchor::Container { mut path } => caret.offset.checked_sub(1).map(|prev| {
                path.push(prev);
                path
            }),
            Anchor::Void { path } if caret.offset == 1 => Some(path),
            _ => None,
        })
    }

    /// Detach the node at `path`
    pub fn remove(&mut self, path: &[usize]) -> Option<Node> {
        let (&last, parent) = path.split_last()?;
        let children = self.root.get_mut(parent)?.children_mut()?;
        (last < children.len()).then(|| children.remove(last))
    }

    fn locate(&self, position: &Position) -> Result<Anchor> {
        let invalid = || EditorError::InvalidPosition(position.clone());
        let node = self.root.get(&position.path).ok_or_else(invalid)?;
        let path = position.path.clone();

        let (anchor, max_offset) = match node {
            Node::Text(text) => (Anchor::Text { path }, text.chars().count()),
            _ if node.is_void_element() => (Anchor::Void { path }, 1),
            Node::Element(el) => (Anchor::Container { path }, el.children.len()),
        };

        if position.offset > max_offset {
            return Err(invalid());
        }
        Ok(anchor)
    }

    fn children_at(&mut self, path: &[usize]) -> Result<&mut Vec<Node>> {
        self.root
            .get_mut(path)
            .and_then(Node::children_mut)
            .ok_or_else(|| EditorError::InvalidPosition(Position::new(path.to_vec(), 0)))
    }

    /// Parent path and child index where a node can go, splitting text
    fn insertion_point(&mut self, position: &Position) -> Result<(Vec<usize>, usize)> {
        match self.locate(position)? {
            Anchor::Container { path } => Ok((path, position.offset)),

            Anchor::Void { path } => {
                let (parent, idx) = split_path(&path);
                Ok((parent, idx + position.offset.min(1)))
            }

            Anchor::Text { path } => {
                let (parent, idx) = split_path(&path);
                let len = self.root.get(&path).map_or(0, Node::char_len);

                if position.offset == 0 {
                    return Ok((parent, idx));
                }
                if position.offset >= len {
                    return Ok((parent, idx + 1));
                }

                let tail = match self.root.get_mut(&path) {
                    Some(Node::Text(text)) => {
                        let at = byte_offset(text, position.offset);
                        text.split_off(at)
                    }
                    _ => return Err(EditorError::InvalidPosition(position.clone())),
                };
                self.children_at(&parent)?.insert(idx + 1, Node::Text(tail));
                Ok((parent, idx + 1))
            }
        }
    }

    pub(crate) fn leaves(&self) -> Vec<Leaf> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        collect_leaves(&self.root, &mut path, &mut out);
        out
    }

    pub(crate) fn point(&self, position: &Position, leaves: &[Leaf]) -> Result<Point> {
        let point = match self.locate(position)? {
            Anchor::Text { path } | Anchor::Void { path } => {
                let leaf = leaves
                    .iter()
                    .position(|l| l.path == path)
                    .ok_or_else(|| EditorError::InvalidPosition(position.clone()))?;
                Point {
                    leaf,
                    offset: position.offset,
                }
            }
            Anchor::Container { mut path } => {
                path.push(position.offset);
                Point {
                    leaf: leaves.iter().filter(|l| l.path < path).count(),
                    offset: 0,
                }
            }
        };
        Ok(canonical(point, leaves))
    }

    fn position_of(&self, point: Point, leaves: &[Leaf]) -> Position {
        match leaves.get(point.leaf) {
            None => self.end(),
            Some(leaf) if !leaf.atomic => Position::new(leaf.path.clone(), point.offset),
            Some(leaf) => {
                let (parent, idx) = split_path(&leaf.path);
                Position::new(parent, idx + point.offset.min(1))
            }
        }
    }

    fn delete_points(&mut self, start: Point, end: Point, leaves: &[Leaf]) -> Position {
        let cursor = self.position_of(start, leaves);
        let mut removals = Vec::new();

        let span = end.leaf.saturating_sub(start.leaf) + 1;
        for (i, leaf) in leaves.iter().enumerate().skip(start.leaf).take(span) {
            let from = if i == start.leaf { start.offset } else { 0 };
            let to = if i == end.leaf { end.offset } else { leaf.len };
            if from >= to {
                continue;
            }

            if leaf.atomic {
                removals.push(leaf.path.clone());
            } else if let Some(Node::Text(text)) = self.root.get_mut(&leaf.path) {
                let range = byte_offset(text, from)..byte_offset(text, to);
                text.replace_range(range, "");
            }
        }

        // Later paths first so earlier ones stay valid
        for path in removals.iter().rev() {
            self.remove(path);
        }
        cursor
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

/// Adjust `position` for the removal of the node at `removed`
pub(crate) fn shift_after_removal(position: &Position, removed: &[usize]) -> Position {
    let mut position = position.clone();
    if let Some((&idx, parent)) = removed.split_last() {
        let depth = parent.len();
        if position.path.len() > depth
            && position.path[..depth] == *parent
            && position.path[depth] > idx
        {
            position.path[depth] -= 1;
        } else if position.path == parent && position.offset > idx {
            position.offset -= 1;
        }
    }
    position
}

fn split_path(path: &[usize]) -> (Vec<usize>, usize) {
    match path.split_last() {
        Some((&last, parent)) => (parent.to_vec(), last),
        None => (Vec::new(), 0),
    }
}

fn collect_leaves(node: &Node, path: &mut Vec<usize>, out: &mut Vec<Leaf>) {
    for (i, child) in node.children().iter().enumerate() {
        path.push(i);
        match child {
            Node::Text(text) => out.push(Leaf {
                path: path.clone(),
                len: text.chars().count(),
                atomic: false,
            }),
            _ if child.is_void_element() => out.push(Leaf {
                path: path.clone(),
                len: 1,
                atomic: true,
            }),
            _ => collect_leaves(child, path, out),
        }
        path.pop();
    }
}

/// Pick one representative for points that denote the same place: the end
/// of a leaf equals the start of the next one, and empty leaves are skipped.
fn canonical(point: Point, leaves: &[Leaf]) -> Point {
    let mut point = match leaves.len() {
        0 => return Point { leaf: 0, offset: 0 },
        n if point.leaf >= n => Point {
            leaf: n - 1,
            offset: leaves[n - 1].len,
        },
        _ => point,
    };

    while point.leaf + 1 < leaves.len() && point.offset >= leaves[point.leaf].len {
        point = Point {
            leaf: point.leaf + 1,
            offset: 0,
        };
    }
    point
}

fn previous_unit(point: Point, leaves: &[Leaf]) -> Option<(Point, Point)> {
    if point.offset > 0 {
        let start = Point {
            leaf: point.leaf,
            offset: point.offset - 1,
        };
        return Some((start, point));
    }

    (0..point.leaf.min(leaves.len()))
        .rev()
        .find(|&j| leaves[j].len > 0)
        .map(|j| {
            let len = leaves[j].len;
            (
                Point { leaf: j, offset: len - 1 },
                Point { leaf: j, offset: len },
            )
        })
}

fn next_unit(point: Point, leaves: &[Leaf]) -> Option<(Point, Point)> {
    let leaf = leaves.get(point.leaf)?;
    if point.offset < leaf.len {
        let end = Point {
            leaf: point.leaf,
            offset: point.offset + 1,
        };
        return Some((point, end));
    }

    (point.leaf + 1..leaves.len())
        .find(|&j| leaves[j].len > 0)
        .map(|j| (Point { leaf: j, offset: 0 }, Point { leaf: j, offset: 1 }))
}
