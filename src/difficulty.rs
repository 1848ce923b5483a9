//! Difficulty controller: level-ups and high-value seeding.

use crate::cell::GridPos;
use crate::event::{GameEvent, SoundCue};
use crate::grid::Grid;
use rand::Rng;
use tracing::info;

/// Values seeded into fresh cells on a level-up.
pub const SEED_VALUES: [u32; 4] = [8, 16, 32, 64];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difficulty {
    level: u32,
    step: u64,
}

impl Difficulty {
    pub fn new(step: u64) -> Self {
        Self { level: 1, step }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Score that must be exceeded to leave the current level.
    pub fn threshold(&self) -> u64 {
        u64::from(self.level).saturating_mul(self.step)
    }

    /// One check per drag-end. Rises by at most one level, however far past
    /// the threshold `score` is; then seeds `level` fresh cells with higher
    /// values. Returns the seeded positions on a level-up.
    pub fn check<R: Rng + ?Sized>(
        &mut self,
        score: u64,
        grid: &mut Grid,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> Option<Vec<GridPos>> {
        if score <= self.threshold() {
            return None;
        }
        self.level += 1;
        info!(level = self.level, score, "level up");
        events.push(GameEvent::LevelChanged { level: self.level });
        events.push(GameEvent::Sound {
            cue: SoundCue::LevelUp,
        });

        let mut seeded = Vec::new();
        for _ in 0..self.level {
            let Some(pos) = grid.random_fresh(rng) else {
                continue;
            };
            let value = SEED_VALUES[rng.random_range(0..SEED_VALUES.len())];
            if let Ok(cell) = grid.get_mut(pos.x, pos.y) {
                cell.set_value(value);
                events.push(GameEvent::CellChanged { pos, cell: *cell });
                seeded.push(pos);
            }
        }
        Some(seeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn threshold_is_strict() {
        let mut grid = Grid::from_rows(&[vec![2, 2, 2]]).unwrap();
        let mut d = Difficulty::new(1000);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(d.check(1000, &mut grid, &mut rng, &mut Vec::new()), None);
        assert_eq!(d.level(), 1);
        assert!(d.check(1001, &mut grid, &mut rng, &mut Vec::new()).is_some());
        assert_eq!(d.level(), 2);
    }

    #[test]
    fn level_two_seeds_two_cells() {
        let mut grid = Grid::from_rows(&vec![vec![2; 5]; 6]).unwrap();
        let mut d = Difficulty::new(1000);
        let mut events = Vec::new();
        let seeded = d
            .check(1001, &mut grid, &mut StdRng::seed_from_u64(4), &mut events)
            .unwrap();
        assert_eq!(seeded.len(), 2);
        assert_ne!(seeded[0], seeded[1]);
        let high: Vec<u32> = grid
            .iter()
            .filter_map(|c| c.value())
            .filter(|v| *v > 4)
            .collect();
        assert_eq!(high.len(), 2);
        assert!(high.iter().all(|v| SEED_VALUES.contains(v)));
        assert!(events.contains(&GameEvent::LevelChanged { level: 2 }));
    }

    #[test]
    fn rises_one_level_even_far_past_threshold() {
        let mut grid = Grid::from_rows(&vec![vec![2; 5]; 6]).unwrap();
        let mut d = Difficulty::new(1000);
        d.check(50_000, &mut grid, &mut StdRng::seed_from_u64(1), &mut Vec::new());
        assert_eq!(d.level(), 2);
        assert_eq!(d.threshold(), 2000);
    }

    #[test]
    fn seeding_tolerates_too_few_fresh_cells() {
        let mut grid = Grid::from_rows(&[vec![2, 64]]).unwrap();
        let mut d = Difficulty::new(10);
        let seeded = d
            .check(11, &mut grid, &mut StdRng::seed_from_u64(8), &mut Vec::new())
            .unwrap();
        assert_eq!(seeded, vec![GridPos::new(0, 0)]);
        assert_eq!(d.level(), 2);
    }
}
