//! Explicit cursor and selection.
//!
//! A [`Position`] is a DOM-style boundary point: a node path from the surface
//! root plus an offset. Inside a text node the offset counts characters;
//! inside an element it counts children, so `offset = 2` sits between the
//! second and third child.

/// A boundary point in the surface
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub path: Vec<usize>,
    pub offset: usize,
}

impl Position {
    pub fn new(path: Vec<usize>, offset: usize) -> Self {
        Self { path, offset }
    }

    /// A point directly inside the surface root
    pub fn root(offset: usize) -> Self {
        Self {
            path: Vec::new(),
            offset,
        }
    }
}

/// A selection between an anchor and a focus; collapsed when both coincide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub focus: Position,
}

impl Selection {
    pub fn new(anchor: Position, focus: Position) -> Self {
        Self { anchor, focus }
    }

    /// A caret at `position`
    pub fn collapsed(position: Position) -> Self {
        Self {
            anchor: position.clone(),
            focus: position,
        }
    }

    /// Where typing continues
    pub fn caret(&self) -> &Position {
        &self.focus
    }
}

impl From<Position> for Selection {
    fn from(position: Position) -> Self {
        Selection::collapsed(position)
    }
}

/// Which way a delete key removes content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteDirection {
    /// Backspace
    #[default]
    Backward,
    /// Delete
    Forward,
}

/// Outcome of the atomic-embed deletion check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    /// The embed before the caret was removed as one unit
    Atomic { url: String, cursor: Position },
    /// Not an atomic case; ordinary deletion applies
    Default,
}
