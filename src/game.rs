//! Game state: grid, drag path, score, level, and the pointer handlers.

use crate::cell::{Cell, GridPos};
use crate::config::GameConfig;
use crate::difficulty::Difficulty;
use crate::error::ConfigError;
use crate::event::GameEvent;
use crate::grid::Grid;
use crate::merge::{self, MergeOutcome};
use crate::report::SessionReport;
use crate::selection::{Path, SelectionTracker};
use crate::spawner;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::trace;

/// Pointer position in logical pixels, origin at the grid's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What one completed drag did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragOutcome {
    pub merge: Option<MergeOutcome>,
    pub special: Option<GridPos>,
    /// New level, if this drag levelled up.
    pub level_up: Option<u32>,
}

/// Whole session. Every handler runs to completion; collaborators read the
/// queued events afterwards with [`GameState::drain_events`].
#[derive(Debug)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    selection: SelectionTracker,
    difficulty: Difficulty,
    score: u64,
    merges: u32,
    drags: u32,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl GameState {
    /// New session with a random grid.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let grid = Grid::random(config.width, config.height, &mut rng);
        Ok(Self::assemble(config, grid, rng))
    }

    /// New session over a prepared grid. The grid's size wins over the config's.
    pub fn with_grid(mut config: GameConfig, grid: Grid) -> Result<Self, ConfigError> {
        config.width = grid.width();
        config.height = grid.height();
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self::assemble(config, grid, rng))
    }

    fn assemble(config: GameConfig, grid: Grid, rng: StdRng) -> Self {
        Self {
            selection: SelectionTracker::new(config.selection),
            difficulty: Difficulty::new(config.level_step),
            config,
            grid,
            score: 0,
            merges: 0,
            drags: 0,
            rng,
            events: Vec::new(),
        }
    }

    /// Start over: fresh grid, score 0, level 1. The RNG keeps its stream.
    pub fn reset(&mut self) {
        self.grid = Grid::random(self.config.width, self.config.height, &mut self.rng);
        self.selection = SelectionTracker::new(self.config.selection);
        self.difficulty = Difficulty::new(self.config.level_step);
        self.score = 0;
        self.merges = 0;
        self.drags = 0;
        self.events.clear();
        self.events.push(GameEvent::ScoreChanged { score: 0 });
        self.events.push(GameEvent::LevelChanged { level: 1 });
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.difficulty.level()
    }

    pub fn is_dragging(&self) -> bool {
        self.selection.is_dragging()
    }

    pub fn path(&self) -> Option<&Path> {
        self.selection.path()
    }

    /// Queued notifications, oldest first.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Cell under a pointer position; `None` off the grid.
    pub fn cell_at_position(&self, p: Point) -> Option<&Cell> {
        let pitch = self.config.pitch();
        let (fx, fy) = ((p.x / pitch).floor(), (p.y / pitch).floor());
        // Also rejects NaN.
        if !(fx >= 0.0 && fy >= 0.0) {
            trace!(x = p.x, y = p.y, "pointer off grid");
            return None;
        }
        self.grid.get(fx as usize, fy as usize).ok()
    }

    /// Centre of a slot in logical pixels.
    pub fn slot_centre(&self, pos: GridPos) -> Point {
        let pitch = self.config.pitch();
        let half = self.config.cell_size / 2.0;
        Point::new(pos.x as f32 * pitch + half, pos.y as f32 * pitch + half)
    }

    fn path_changed(&mut self) {
        let path = self
            .selection
            .path()
            .map(|p| p.cells().to_vec())
            .unwrap_or_default();
        self.events.push(GameEvent::PathChanged { path });
    }

    /// Pointer down. Returns true if a path was started.
    pub fn on_drag_start(&mut self, p: Point) -> bool {
        let Some(cell) = self.cell_at_position(p).copied() else {
            return false;
        };
        self.selection.start(&cell);
        self.path_changed();
        true
    }

    /// Pointer moved while held. Returns true if the path grew.
    pub fn on_drag_move(&mut self, p: Point) -> bool {
        if !self.selection.is_dragging() {
            return false;
        }
        let Some(cell) = self.cell_at_position(p).copied() else {
            return false;
        };
        let grew = self.selection.extend(&cell);
        if grew {
            self.path_changed();
        }
        grew
    }

    /// Pointer up. Merges a path of two or more, then rolls for a special block
    /// and checks the level, whether or not anything merged. `None` if no drag
    /// was in progress.
    pub fn on_drag_end(&mut self) -> Option<DragOutcome> {
        let path = self.selection.finish()?;
        self.drags += 1;

        let merge = merge::resolve(&mut self.grid, &path, &mut self.rng, &mut self.events);
        if let Some(m) = &merge {
            self.score = self.score.saturating_add(u64::from(m.value));
            self.merges += 1;
            self.events.push(GameEvent::ScoreChanged { score: self.score });
        }
        self.path_changed();

        let special = spawner::roll_special(
            &mut self.grid,
            self.config.special_chance,
            &mut self.rng,
            &mut self.events,
        );
        let level_up = self
            .difficulty
            .check(self.score, &mut self.grid, &mut self.rng, &mut self.events)
            .map(|_| self.difficulty.level());

        Some(DragOutcome {
            merge,
            special,
            level_up,
        })
    }

    /// Snapshot for the session-end collaborator. Does not end anything itself.
    pub fn end_session(&self) -> SessionReport {
        SessionReport {
            score: self.score,
            level: self.level(),
            merges: self.merges,
            drags: self.drags,
        }
    }
}
