//! Cells: numbered tiles and the wildcard special block.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Starting values handed out at grid creation and on regeneration.
pub const FRESH_VALUES: [u32; 2] = [2, 4];

/// Glyph shown for a special block.
pub const SPECIAL_GLYPH: &str = "∞";

/// Slot coordinate: `x` is the column, `y` the row (y=0 is top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// True if `other` shares an edge with this slot.
    pub fn is_orthogonal_neighbour(self, other: Self) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }

    /// True if `other` shares an edge or a corner with this slot.
    pub fn is_neighbour(self, other: Self) -> bool {
        self != other && self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellKind {
    Number(u32),
    /// Wildcard: matches any value while selecting.
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub pos: GridPos,
    pub kind: CellKind,
}

impl Cell {
    /// Numbered cell. `value` is expected to be a positive power of two; this
    /// is not checked here.
    pub const fn number(pos: GridPos, value: u32) -> Self {
        Self {
            pos,
            kind: CellKind::Number(value),
        }
    }

    pub const fn special(pos: GridPos) -> Self {
        Self {
            pos,
            kind: CellKind::Special,
        }
    }

    /// Numeric value, or `None` for a special block.
    pub fn value(&self) -> Option<u32> {
        match self.kind {
            CellKind::Number(v) => Some(v),
            CellKind::Special => None,
        }
    }

    /// Replace the value. A special block stops being special.
    pub fn set_value(&mut self, value: u32) {
        self.kind = CellKind::Number(value);
    }

    pub fn is_special(&self) -> bool {
        self.kind == CellKind::Special
    }

    /// Holding one of the starting values; eligible for spawn and seeding overwrites.
    pub fn is_fresh(&self) -> bool {
        matches!(self.kind, CellKind::Number(v) if FRESH_VALUES.contains(&v))
    }

    /// Whether this cell may join a path whose match value is `target`.
    /// `None` means the path has no numeric cell yet, so anything goes.
    pub fn matches(&self, target: Option<u32>) -> bool {
        match (self.kind, target) {
            (CellKind::Special, _) | (_, None) => true,
            (CellKind::Number(v), Some(t)) => v == t,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CellKind::Number(v) => write!(f, "{v}"),
            CellKind::Special => f.write_str(SPECIAL_GLYPH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_value_turns_special_into_number() {
        let mut cell = Cell::special(GridPos::new(1, 2));
        assert_eq!(cell.value(), None);
        cell.set_value(12);
        assert_eq!(cell.kind, CellKind::Number(12));
        assert!(!cell.is_special());
        assert_eq!(cell.pos, GridPos::new(1, 2));
    }

    #[test]
    fn fresh_means_two_or_four() {
        let p = GridPos::new(0, 0);
        assert!(Cell::number(p, 2).is_fresh());
        assert!(Cell::number(p, 4).is_fresh());
        assert!(!Cell::number(p, 8).is_fresh());
        assert!(!Cell::number(p, 6).is_fresh());
        assert!(!Cell::special(p).is_fresh());
    }

    #[test]
    fn wildcard_matching() {
        let p = GridPos::new(0, 0);
        assert!(Cell::special(p).matches(Some(8)));
        assert!(Cell::special(p).matches(None));
        assert!(Cell::number(p, 8).matches(None));
        assert!(Cell::number(p, 8).matches(Some(8)));
        assert!(!Cell::number(p, 4).matches(Some(8)));
    }

    #[test]
    fn neighbours() {
        let c = GridPos::new(2, 2);
        assert!(c.is_orthogonal_neighbour(GridPos::new(2, 3)));
        assert!(!c.is_orthogonal_neighbour(GridPos::new(3, 3)));
        assert!(c.is_neighbour(GridPos::new(3, 3)));
        assert!(!c.is_neighbour(c));
        assert!(!c.is_neighbour(GridPos::new(4, 2)));
    }

    #[test]
    fn display() {
        let p = GridPos::new(0, 0);
        assert_eq!(Cell::number(p, 64).to_string(), "64");
        assert_eq!(Cell::special(p).to_string(), "∞");
    }
}
