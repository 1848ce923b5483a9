//! Merge resolver: collapse a finished path into its first cell.

use crate::cell::GridPos;
use crate::event::{GameEvent, SoundCue};
use crate::grid::{Grid, fresh_value};
use crate::selection::Path;
use rand::Rng;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub anchor: GridPos,
    /// New anchor value; also the score awarded.
    pub value: u32,
    /// Path length.
    pub consumed: usize,
}

/// Merge `path` into its first cell. Returns `None` when there is nothing to
/// merge: fewer than two cells, or no numeric cell to take a value from.
///
/// The anchor gets `value x len`; every later path entry is regenerated to a
/// fresh 2 or 4, in path order. A slot visited twice is regenerated twice, and
/// if the path returned to the anchor, the anchor is regenerated as well.
pub fn resolve<R: Rng + ?Sized>(
    grid: &mut Grid,
    path: &Path,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<MergeOutcome> {
    if path.len() < 2 {
        return None;
    }
    let base = path.match_value()?;
    let len = u32::try_from(path.len()).unwrap_or(u32::MAX);
    let value = base.saturating_mul(len);

    let anchor = path.first();
    write(grid, anchor, value, events);
    for &pos in &path.cells()[1..] {
        write(grid, pos, fresh_value(rng), events);
    }
    events.push(GameEvent::Sound { cue: SoundCue::Merge });
    debug!(%anchor, base, len, value, "merged");
    Some(MergeOutcome {
        anchor,
        value,
        consumed: path.len(),
    })
}

fn write(grid: &mut Grid, pos: GridPos, value: u32, events: &mut Vec<GameEvent>) {
    // Path positions come from the grid, so the lookup only fails on a stale path.
    if let Ok(cell) = grid.get_mut(pos.x, pos.y) {
        cell.set_value(value);
        events.push(GameEvent::CellChanged { pos, cell: *cell });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::selection::SelectionTracker;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn path_over(grid: &Grid, cells: &[(usize, usize)]) -> Path {
        let mut t = SelectionTracker::default();
        let (x, y) = cells[0];
        t.start(grid.get(x, y).unwrap());
        for &(x, y) in &cells[1..] {
            t.extend(grid.get(x, y).unwrap());
        }
        t.finish().unwrap()
    }

    #[test]
    fn three_twos_make_six() {
        let mut grid = Grid::from_rows(&vec![vec![2; 5]; 6]).unwrap();
        let path = path_over(&grid, &[(0, 0), (1, 0), (1, 1)]);
        let mut rng = StdRng::seed_from_u64(3);
        let mut events = Vec::new();
        let out = resolve(&mut grid, &path, &mut rng, &mut events).unwrap();
        assert_eq!(out.value, 6);
        assert_eq!(out.anchor, GridPos::new(0, 0));
        assert_eq!(grid.get(0, 0).unwrap().value(), Some(6));
        assert!(grid.get(1, 0).unwrap().is_fresh());
        assert!(grid.get(1, 1).unwrap().is_fresh());
        assert!(events.contains(&GameEvent::Sound { cue: SoundCue::Merge }));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::CellChanged { .. }))
                .count(),
            3
        );
    }

    #[test]
    fn single_cell_path_does_nothing() {
        let mut grid = Grid::from_rows(&[vec![2, 2]]).unwrap();
        let before = grid.clone();
        let path = path_over(&grid, &[(0, 0)]);
        let mut events = Vec::new();
        let out = resolve(&mut grid, &path, &mut StdRng::seed_from_u64(0), &mut events);
        assert_eq!(out, None);
        assert_eq!(grid, before);
        assert!(events.is_empty());
    }

    #[test]
    fn special_anchor_takes_path_value() {
        let mut grid = Grid::from_rows(&[vec![8, 8, 8]]).unwrap();
        grid.set(0, 0, Cell::special(GridPos::new(0, 0))).unwrap();
        let path = path_over(&grid, &[(0, 0), (1, 0), (2, 0)]);
        let out = resolve(&mut grid, &path, &mut StdRng::seed_from_u64(0), &mut Vec::new()).unwrap();
        assert_eq!(out.value, 24);
        assert_eq!(grid.get(0, 0).unwrap().value(), Some(24));
        assert!(!grid.get(0, 0).unwrap().is_special());
    }

    #[test]
    fn all_special_path_is_not_merged() {
        let mut grid = Grid::from_rows(&[vec![2, 2]]).unwrap();
        grid.set(0, 0, Cell::special(GridPos::new(0, 0))).unwrap();
        grid.set(1, 0, Cell::special(GridPos::new(1, 0))).unwrap();
        let path = path_over(&grid, &[(0, 0), (1, 0)]);
        assert_eq!(path.len(), 2);
        let out = resolve(&mut grid, &path, &mut StdRng::seed_from_u64(0), &mut Vec::new());
        assert_eq!(out, None);
        assert!(grid.get(0, 0).unwrap().is_special());
    }

    #[test]
    fn returning_to_anchor_regenerates_it() {
        let mut grid = Grid::from_rows(&[vec![16, 16]]).unwrap();
        let path = path_over(&grid, &[(0, 0), (1, 0), (0, 0)]);
        let out = resolve(&mut grid, &path, &mut StdRng::seed_from_u64(9), &mut Vec::new()).unwrap();
        assert_eq!(out.value, 48);
        assert!(grid.get(0, 0).unwrap().is_fresh());
    }
}
