//! Grid store: fixed-size board of cells, every slot always occupied.

use crate::cell::{Cell, GridPos};
use crate::error::GridError;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Random starting value: 2 or 4 with equal odds.
pub fn fresh_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.random_bool(0.5) { 2 } else { 4 }
}

/// Board of `width` x `height` cells. y=0 is top; rows are stored [0..height].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// rows[y][x] = cell.
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Grid filled with random starting values.
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        let rows = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| Cell::number(GridPos::new(x, y), fresh_value(rng)))
                    .collect()
            })
            .collect();
        Self {
            width,
            height,
            rows,
        }
    }

    /// Grid from explicit numeric rows (top row first).
    pub fn from_rows(values: &[Vec<u32>]) -> Result<Self, GridError> {
        let expected = values.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(GridError::Shape {
                row: 0,
                len: 0,
                expected: 1,
            });
        }
        if let Some((row, r)) = values.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(GridError::Shape {
                row,
                len: r.len(),
                expected,
            });
        }
        let rows = values
            .iter()
            .enumerate()
            .map(|(y, r)| {
                r.iter()
                    .enumerate()
                    .map(|(x, &v)| Cell::number(GridPos::new(x, y), v))
                    .collect()
            })
            .collect();
        Ok(Self {
            width: expected,
            height: values.len(),
            rows,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    fn check(&self, x: usize, y: usize) -> Result<(), GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Result<&Cell, GridError> {
        self.check(x, y)?;
        Ok(&self.rows[y][x])
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Result<&mut Cell, GridError> {
        self.check(x, y)?;
        Ok(&mut self.rows[y][x])
    }

    #[inline]
    pub fn at(&self, pos: GridPos) -> Result<&Cell, GridError> {
        self.get(pos.x, pos.y)
    }

    /// Replace the slot. The cell's position is overwritten with the slot's.
    pub fn set(&mut self, x: usize, y: usize, mut cell: Cell) -> Result<(), GridError> {
        self.check(x, y)?;
        cell.pos = GridPos::new(x, y);
        self.rows[y][x] = cell;
        Ok(())
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    pub fn positions_where(&self, pred: impl Fn(&Cell) -> bool) -> Vec<GridPos> {
        self.iter().filter(|c| pred(c)).map(|c| c.pos).collect()
    }

    /// Uniformly random fresh cell, if any.
    pub fn random_fresh<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<GridPos> {
        self.positions_where(Cell::is_fresh).choose(rng).copied()
    }

    /// Numeric values row by row; specials show as `None`.
    pub fn values(&self) -> Vec<Vec<Option<u32>>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(Cell::value).collect())
            .collect()
    }
}
