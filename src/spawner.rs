//! Special block roll after every drag.

use crate::cell::{Cell, GridPos};
use crate::event::{GameEvent, SoundCue};
use crate::grid::Grid;
use rand::Rng;
use tracing::info;

/// With probability `chance`, turn a random fresh cell into a special block.
/// Returns where it landed. No fresh cell means no spawn.
pub fn roll_special<R: Rng + ?Sized>(
    grid: &mut Grid,
    chance: f64,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<GridPos> {
    if !rng.random_bool(chance) {
        return None;
    }
    let pos = grid.random_fresh(rng)?;
    let cell = Cell::special(pos);
    grid.set(pos.x, pos.y, cell).ok()?;
    events.push(GameEvent::CellChanged { pos, cell });
    events.push(GameEvent::SpecialSpawned { pos });
    events.push(GameEvent::Sound {
        cue: SoundCue::Special,
    });
    info!(%pos, "special block spawned");
    Some(pos)
}
